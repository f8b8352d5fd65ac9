//! # Validation Module
//!
//! Input normalization for the three forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      What Gets Checked                                  │
//! │                                                                         │
//! │  Lookup name        → trimmed; blank means "no lookup"                 │
//! │  Registration name  → trimmed; blank is rejected (Required)            │
//! │  Address / phone    → passed through untouched                         │
//! │  Book choice        → "<bookid>,<bookname>" → bookid                   │
//! │  Sale price         → NOT checked (stored as typed)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::BOOK_CHOICE_SEPARATOR;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Strips leading and trailing whitespace from a customer name.
///
/// Applied both before storing and before looking up, so `"  Alice  "`
/// and `"Alice"` address the same customer.
#[inline]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_string()
}

/// Validates a registration name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use madang_core::validation::validate_customer_name;
///
/// assert_eq!(validate_customer_name("  Kim Yuna ").unwrap(), "Kim Yuna");
/// assert!(validate_customer_name("   ").is_err());
/// ```
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    let name = normalize_name(name);

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(name)
}

/// Extracts the book id from a dropdown choice.
///
/// A bare id (`"3"`) is accepted as well as the full label
/// (`"3,Olympic Stories"`).
///
/// ## Example
/// ```rust
/// use madang_core::validation::parse_book_choice;
///
/// assert_eq!(parse_book_choice("3,Olympic Stories").unwrap(), 3);
/// assert_eq!(parse_book_choice("10").unwrap(), 10);
/// assert!(parse_book_choice(",Nameless").is_err());
/// ```
pub fn parse_book_choice(choice: &str) -> ValidationResult<i64> {
    let id_part = choice
        .split(BOOK_CHOICE_SEPARATOR)
        .next()
        .unwrap_or_default()
        .trim();

    if id_part.is_empty() {
        return Err(ValidationError::InvalidFormat {
            field: "book".to_string(),
            reason: "missing book id".to_string(),
        });
    }

    id_part
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "book".to_string(),
            reason: format!("'{}' is not a book id", id_part),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
