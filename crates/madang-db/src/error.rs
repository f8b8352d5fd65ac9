//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds categorization                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in the shell) ← Message shown verbatim                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Taxonomy
//! - `ConnectionFailed` is fatal at startup.
//! - `QueryFailed` aborts the current action.
//! - `UniqueViolation` / `ConstraintViolation` abort the current action after
//!   the write transaction was rolled back (e.g. duplicate custid from two
//!   sessions allocating the same `MAX + 1`).
//!
//! Nothing is retried.

use madang_core::ValidationError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique / primary key constraint violation.
    ///
    /// ## When This Occurs
    /// - Two sessions allocated the same custid or orderid
    #[error("Duplicate {field}: UNIQUE constraint failed")]
    UniqueViolation { field: String },

    /// Any other constraint (NOT NULL, CHECK, FOREIGN KEY).
    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created or opened
    /// - File permissions issue
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Schema bootstrap failed.
    #[error("Schema bootstrap failed: {0}")]
    SchemaFailed(String),

    /// Query execution failed.
    ///
    /// ## When This Occurs
    /// - Missing table or column in an externally provided database
    /// - Runtime SQL error
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Commit or rollback failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// The single connection could not be acquired in time.
    #[error("Database connection busy")]
    ConnectionBusy,

    /// A value had a type the caller did not expect.
    #[error("Unexpected value in column {column}: {reason}")]
    Decode { column: String, reason: String },

    /// Input rejected before any statement ran.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Whether this is one of the constraint failures a write can hit.
    pub fn is_constraint(&self) -> bool {
        matches!(
            self,
            DbError::UniqueViolation { .. } | DbError::ConstraintViolation { .. }
        )
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::ConnectionBusy
/// sqlx::Error::ColumnDecode   → DbError::Decode
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                // "UNIQUE constraint failed: Customer.custid"
                // "NOT NULL constraint failed: Orders.custid"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: field.to_string(),
                    }
                } else if msg.contains("constraint failed") {
                    DbError::ConstraintViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::ConnectionBusy,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::ColumnDecode { index, source } => DbError::Decode {
                column: index,
                reason: source.to_string(),
            },

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DbError::UniqueViolation {
            field: "Customer.custid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Duplicate Customer.custid: UNIQUE constraint failed"
        );
        assert!(err.is_constraint());

        let err = DbError::not_found("Customer", "7");
        assert_eq!(err.to_string(), "Customer not found: 7");
        assert!(!err.is_constraint());
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[test]
    fn test_pool_timeout_maps_to_busy() {
        let err: DbError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, DbError::ConnectionBusy));
    }
}
