//! # Storage Accessor
//!
//! The two primitives every other database call is expressed in.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Accessor Contract                                  │
//! │                                                                         │
//! │  run_query(sql, params)                                                │
//! │       └──► ResultTable { columns: [..], rows: [[SqlValue; n]; m] }     │
//! │                                                                         │
//! │  run_execute(sql, params)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN ──► statement ──┬── ok ──► COMMIT   ──► rows affected           │
//! │                        └── err ─► ROLLBACK ──► statement error         │
//! │                                                                         │
//! │  Parameters are ALWAYS bound (?1, ?2, ...). User input never becomes   │
//! │  part of the SQL text.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column, Executor, Row, Sqlite, SqlitePool, Statement, TypeInfo, ValueRef};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;

// =============================================================================
// Values
// =============================================================================

/// A dynamically typed SQLite value, used for both parameters and cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl SqlValue {
    /// The value as an integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as text, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Integer(i64::from(v))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

/// Dates are stored as `YYYY-MM-DD` text.
impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Text(v.format("%Y-%m-%d").to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

// =============================================================================
// Result Table
// =============================================================================

/// Rows of a query with their column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
}

impl ResultTable {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Position of a named column.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Cell at `row` in the named column.
    pub fn value(&self, row: usize, column: &str) -> Option<&SqlValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }
}

// =============================================================================
// Accessor Functions
// =============================================================================

/// Runs a read query and collects every row.
pub async fn run_query(pool: &SqlitePool, sql: &str, params: &[SqlValue]) -> DbResult<ResultTable> {
    debug!(sql = %compact(sql), params = params.len(), "run_query");

    let statement = pool.prepare(sql).await?;
    let columns: Vec<String> = statement
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let fetched = bind_values(statement.query(), params).fetch_all(pool).await?;

    let mut rows = Vec::with_capacity(fetched.len());
    for row in &fetched {
        rows.push(decode_row(row, columns.len())?);
    }

    debug!(rows = rows.len(), "run_query complete");
    Ok(ResultTable { columns, rows })
}

/// Runs one write statement in its own transaction.
///
/// ## Returns
/// * `Ok(n)` - Committed, `n` rows affected
/// * `Err(_)` - Rolled back; the statement's error (not the rollback's)
pub async fn run_execute(pool: &SqlitePool, sql: &str, params: &[SqlValue]) -> DbResult<u64> {
    debug!(sql = %compact(sql), params = params.len(), "run_execute");

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    match bind_values(sqlx::query(sql), params).execute(&mut *tx).await {
        Ok(done) => {
            tx.commit()
                .await
                .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
            Ok(done.rows_affected())
        }
        Err(err) => {
            warn!(error = %err, "Statement failed, rolling back");
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Rollback failed");
            }
            Err(err.into())
        }
    }
}

impl Database {
    /// See [`run_query`].
    pub async fn run_query(&self, sql: &str, params: &[SqlValue]) -> DbResult<ResultTable> {
        run_query(self.pool(), sql, params).await
    }

    /// See [`run_execute`].
    pub async fn run_execute(&self, sql: &str, params: &[SqlValue]) -> DbResult<u64> {
        run_execute(self.pool(), sql, params).await
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn bind_values<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &[SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlValue::Null => query.bind(None::<String>),
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Real(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.clone()),
            SqlValue::Blob(v) => query.bind(v.clone()),
        };
    }
    query
}

/// Decodes by the value's storage class, not the declared column type:
/// a NUMERIC column may hold integers, reals or text.
fn decode_row(row: &SqliteRow, width: usize) -> DbResult<Vec<SqlValue>> {
    let mut cells = Vec::with_capacity(width);

    for idx in 0..width {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            cells.push(SqlValue::Null);
            continue;
        }

        let storage_class = raw.type_info().name().to_string();
        let cell = match storage_class.as_str() {
            "INTEGER" | "BOOLEAN" => SqlValue::Integer(row.try_get_unchecked::<i64, _>(idx)?),
            "REAL" => SqlValue::Real(row.try_get_unchecked::<f64, _>(idx)?),
            "BLOB" => SqlValue::Blob(row.try_get_unchecked::<Vec<u8>, _>(idx)?),
            _ => SqlValue::Text(row.try_get_unchecked::<String, _>(idx)?),
        };
        cells.push(cell);
    }

    Ok(cells)
}

/// Single-line form of a SQL statement for log fields.
fn compact(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_query_returns_named_columns() {
        let db = test_db().await;
        db.run_execute(
            "INSERT INTO Book (bookid, bookname) VALUES (?1, ?2)",
            &[1.into(), "Football History".into()],
        )
        .await
        .unwrap();

        let table = db
            .run_query("SELECT bookid, bookname FROM Book WHERE bookid = ?1", &[1.into()])
            .await
            .unwrap();

        assert_eq!(table.columns, vec!["bookid", "bookname"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.value(0, "bookid").and_then(SqlValue::as_i64), Some(1));
        assert_eq!(
            table.value(0, "bookname").and_then(SqlValue::as_str),
            Some("Football History")
        );
    }

    #[tokio::test]
    async fn test_empty_result_still_has_columns() {
        let db = test_db().await;
        let table = db
            .run_query("SELECT custid, name FROM Customer WHERE name = ?1", &["Nobody".into()])
            .await
            .unwrap();

        assert!(table.is_empty());
        assert_eq!(table.columns, vec!["custid", "name"]);
    }

    #[tokio::test]
    async fn test_numeric_column_keeps_storage_class() {
        let db = test_db().await;
        for (id, price) in [(1, "15000"), (2, "12.5"), (3, "free"), (4, "")] {
            db.run_execute(
                "INSERT INTO Orders (orderid, custid, bookid, saleprice) VALUES (?1, 1, 1, ?2)",
                &[SqlValue::Integer(id), price.into()],
            )
            .await
            .unwrap();
        }

        let table = db
            .run_query("SELECT saleprice FROM Orders ORDER BY orderid", &[])
            .await
            .unwrap();

        assert_eq!(table.rows[0][0], SqlValue::Integer(15000));
        assert_eq!(table.rows[1][0], SqlValue::Real(12.5));
        assert_eq!(table.rows[2][0], SqlValue::Text("free".to_string()));
        assert_eq!(table.rows[3][0], SqlValue::Text(String::new()));
    }

    #[tokio::test]
    async fn test_failed_execute_rolls_back_and_reports() {
        let db = test_db().await;
        db.run_execute(
            "INSERT INTO Customer (custid, name) VALUES (?1, ?2)",
            &[1.into(), "Kim Yuna".into()],
        )
        .await
        .unwrap();

        let err = db
            .run_execute(
                "INSERT INTO Customer (custid, name) VALUES (?1, ?2)",
                &[1.into(), "Jang Mi-ran".into()],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert!(err.to_string().contains("Customer.custid"));

        // The connection is usable again and only the first row exists
        let table = db.run_query("SELECT name FROM Customer", &[]).await.unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0][0], SqlValue::Text("Kim Yuna".to_string()));
    }

    #[tokio::test]
    async fn test_bound_text_is_never_interpreted_as_sql() {
        let db = test_db().await;
        let hostile = "x'; DROP TABLE Customer; --";

        let table = db
            .run_query("SELECT custid FROM Customer WHERE name = ?1", &[hostile.into()])
            .await
            .unwrap();
        assert!(table.is_empty());

        // Table still exists
        assert!(db.run_query("SELECT COUNT(*) AS n FROM Customer", &[]).await.is_ok());
    }

    #[tokio::test]
    async fn test_bad_sql_is_query_failure() {
        let db = test_db().await;
        let err = db.run_query("SELECT * FROM NoSuchTable", &[]).await.unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(_)));
    }

    #[test]
    fn test_option_and_date_conversions() {
        assert_eq!(SqlValue::from(None::<String>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some("a")), SqlValue::Text("a".to_string()));

        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert_eq!(SqlValue::from(date), SqlValue::Text("2024-07-01".to_string()));
    }
}
