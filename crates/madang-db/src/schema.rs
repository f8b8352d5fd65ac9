//! # Schema Bootstrap
//!
//! Creates the three Madang tables when they are missing.
//!
//! ## What This Is (and Isn't)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Bootstrap                                   │
//! │                                                                         │
//! │  Fresh file          ──► CREATE TABLE Customer / Book / Orders         │
//! │  Existing madang.db  ──► nothing happens (IF NOT EXISTS)               │
//! │                                                                         │
//! │  There is no version table and no ALTER: a database created            │
//! │  elsewhere is used exactly as it is.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No foreign keys are declared: references between the tables are kept by
//! the application.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// `CREATE TABLE` statements, in dependency order.
pub const TABLES: [(&str, &str); 3] = [
    (
        "Customer",
        "CREATE TABLE IF NOT EXISTS Customer (
            custid  INTEGER PRIMARY KEY,
            name    TEXT,
            address TEXT,
            phone   TEXT
        )",
    ),
    (
        "Book",
        "CREATE TABLE IF NOT EXISTS Book (
            bookid    INTEGER PRIMARY KEY,
            bookname  TEXT,
            publisher TEXT,
            price     INTEGER
        )",
    ),
    (
        "Orders",
        "CREATE TABLE IF NOT EXISTS Orders (
            orderid   INTEGER PRIMARY KEY,
            custid    INTEGER,
            bookid    INTEGER,
            saleprice NUMERIC,
            orderdate DATE
        )",
    ),
];

/// Creates every missing table.
///
/// Idempotent: safe to run on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> DbResult<()> {
    for (table, ddl) in TABLES {
        debug!(table, "Ensuring table exists");
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| DbError::SchemaFailed(format!("{}: {}", table, e)))?;
    }

    Ok(())
}

/// Lists the Madang tables that are not present in the database.
///
/// ## Usage
/// [`Database::new`](crate::Database::new) warns with this list when
/// bootstrap is disabled.
pub async fn missing_tables(pool: &SqlitePool) -> DbResult<Vec<&'static str>> {
    let mut missing = Vec::new();

    for (table, _) in TABLES {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")
                .bind(table)
                .fetch_one(pool)
                .await?;

        if count == 0 {
            missing.push(table);
        }
    }

    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_bootstrap_creates_all_tables() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(missing_tables(db.pool()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_disabled_leaves_database_empty() {
        let db = Database::new(DbConfig::in_memory().bootstrap_schema(false))
            .await
            .unwrap();
        assert_eq!(
            missing_tables(db.pool()).await.unwrap(),
            vec!["Customer", "Book", "Orders"]
        );
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent_and_keeps_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query("INSERT INTO Customer (custid, name) VALUES (1, 'Park Ji-sung')")
            .execute(db.pool())
            .await
            .unwrap();

        db.bootstrap_schema().await.unwrap();

        assert_eq!(db.customers().count().await.unwrap(), 1);
    }
}
