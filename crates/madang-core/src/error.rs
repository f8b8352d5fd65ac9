//! # Error Types
//!
//! Domain-specific error types for madang-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  madang-core errors (this file)                                        │
//! │  ├── CoreError        - Preconditions of an action not met             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  madang-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  madang-cli errors (in app)                                            │
//! │  └── ApiError         - What the shell shows the user                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → status line            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A customer that does not exist is NOT an error here: it is the
//! [`CustomerLookup::NotFound`](crate::types::CustomerLookup::NotFound)
//! outcome.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors raised before any statement is executed.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An order was submitted without a resolved customer.
    ///
    /// ## When This Occurs
    /// - No lookup has been performed yet
    /// - The last lookup was empty or did not find the customer
    #[error("No customer selected: look up or register a customer first")]
    CustomerNotResolved,

    /// An order was submitted without a book choice.
    #[error("No book selected")]
    BookNotSelected,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty after trimming.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., a book choice without a numeric id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
