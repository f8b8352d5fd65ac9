//! # API Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Madang Manager                         │
//! │                                                                         │
//! │  > order                                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Handler                                                 │  │
//! │  │  Result<Outcome, ApiError>                                       │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Precondition? ─── CoreError::BookNotSelected ─────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Database Error? ─ DbError::UniqueViolation ──── ApiError ────► │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ✗ Duplicate Customer.custid: UNIQUE constraint failed                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The message is always the underlying error's text, unchanged. The code
//! only decides how the status line is labelled.

use madang_core::{CoreError, ValidationError};
use madang_db::DbError;
use serde::Serialize;
use thiserror::Error;

/// Error returned from shell commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "name is required"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message, shown verbatim
    pub message: String,
}

/// Error codes for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input rejected before any statement ran
    ValidationError,

    /// Action preconditions not met (no customer, no book)
    Precondition,

    /// Write rejected by a constraint and rolled back
    Conflict,

    /// The database could not be opened
    ConnectionFailed,

    /// Any other database failure
    DatabaseError,

    /// Terminal I/O or other internal failure
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        let code = match &err {
            DbError::Validation(_) => ErrorCode::ValidationError,
            DbError::UniqueViolation { .. } | DbError::ConstraintViolation { .. } => {
                ErrorCode::Conflict
            }
            DbError::ConnectionFailed(_) => ErrorCode::ConnectionFailed,
            _ => ErrorCode::DatabaseError,
        };

        tracing::error!(?code, error = %err, "Database operation failed");
        ApiError::new(code, err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            other => ApiError::new(ErrorCode::Precondition, other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::internal(err.to_string())
    }
}
