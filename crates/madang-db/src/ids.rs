//! # Id Allocation Query
//!
//! Runs `SELECT MAX(<column>) AS maxid FROM <table>` and applies
//! [`madang_core::next_id`].
//!
//! ## Known Race
//! ```text
//! Session A: SELECT MAX(custid) → 7      Session B: SELECT MAX(custid) → 7
//! Session A: INSERT custid = 8  ✓        Session B: INSERT custid = 8  ✗ UNIQUE
//! ```
//! The allocation and the insert are separate statements and no lock is
//! held between them. Within one process actions never overlap, so the race
//! only shows up across processes; the losing insert is rolled back and
//! reported as [`DbError::UniqueViolation`].

use madang_core::{next_id, IdTarget};
use sqlx::SqlitePool;
use tracing::debug;

use crate::accessor::{run_query, SqlValue};
use crate::error::{DbError, DbResult};
use crate::pool::Database;

/// Allocates the next id for `target` (not reserved; see module docs).
pub async fn allocate(pool: &SqlitePool, target: IdTarget) -> DbResult<i64> {
    // Identifiers come from the IdTarget whitelist, never from input
    let sql = format!(
        "SELECT MAX({}) AS maxid FROM {}",
        target.column(),
        target.table()
    );

    let table = run_query(pool, &sql, &[]).await?;

    let current_max = match table.value(0, "maxid") {
        None | Some(SqlValue::Null) => None,
        Some(SqlValue::Integer(max)) => Some(*max),
        Some(other) => {
            return Err(DbError::Decode {
                column: format!("{}.{}", target.table(), target.column()),
                reason: format!("expected an integer id, found {:?}", other),
            })
        }
    };

    let id = next_id(current_max);
    debug!(table = target.table(), ?current_max, id, "Allocated id");
    Ok(id)
}

impl Database {
    /// Next free id for `target`, computed as `MAX + 1`.
    pub async fn next_id(&self, target: IdTarget) -> DbResult<i64> {
        allocate(self.pool(), target).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use madang_core::NewCustomer;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_tables_start_at_one() {
        let db = test_db().await;
        assert_eq!(db.next_id(IdTarget::Customer).await.unwrap(), 1);
        assert_eq!(db.next_id(IdTarget::Order).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_next_id_follows_max_not_count() {
        let db = test_db().await;
        sqlx::query("INSERT INTO Orders (orderid, custid, bookid) VALUES (10, 1, 1), (3, 1, 1)")
            .execute(db.pool())
            .await
            .unwrap();

        assert_eq!(db.next_id(IdTarget::Order).await.unwrap(), 11);
    }

    #[tokio::test]
    async fn test_back_to_back_allocation_repeats_id() {
        // No insert between the two reads: both callers get the same id.
        // This is the documented allocator race, not a uniqueness guarantee.
        let db = test_db().await;
        let first = db.next_id(IdTarget::Order).await.unwrap();
        let second = db.next_id(IdTarget::Order).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_raced_id_fails_on_insert_and_rolls_back() {
        let db = test_db().await;
        let stale = db.next_id(IdTarget::Customer).await.unwrap();

        db.customers()
            .register(&NewCustomer {
                name: "Kim Yuna".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let err = db
            .run_execute(
                "INSERT INTO Customer (custid, name, address, phone) VALUES (?1, ?2, ?3, ?4)",
                &[stale.into(), "Jang Mi-ran".into(), "".into(), "".into()],
            )
            .await
            .unwrap_err();

        assert!(err.is_constraint());
        assert_eq!(db.customers().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_non_integer_id_is_decode_error() {
        // An externally created table with text ids
        let db = test_db().await;
        sqlx::query("DROP TABLE Orders")
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query("CREATE TABLE Orders (orderid TEXT)")
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query("INSERT INTO Orders (orderid) VALUES ('A-1')")
            .execute(db.pool())
            .await
            .unwrap();

        let err = db.next_id(IdTarget::Order).await.unwrap_err();
        assert!(matches!(err, DbError::Decode { .. }));
    }
}
