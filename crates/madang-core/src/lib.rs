//! # madang-core: Pure Domain Logic for Madang Manager
//!
//! Types and rules for the bookstore customer/order desk, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Madang Manager Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Terminal Shell (madang-cli)                     │   │
//! │  │     Lookup view ──► Order entry view ──► Registration view      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ dispatch(Action)                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ madang-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │    ids    │  │validation │  │   error   │  │   │
//! │  │   │ Customer  │  │  MAX + 1  │  │ names     │  │ CoreError │  │   │
//! │  │   │ Book      │  │  IdTarget │  │ book pick │  │           │  │   │
//! │  │   │ Order     │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  madang-db (Database Layer)                     │   │
//! │  │           SQLite accessor, repositories, schema bootstrap       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Customer, Book, Order, lookup outcomes
//! - [`ids`] - The `MAX(id) + 1` allocation rule
//! - [`validation`] - Name normalization, book choice parsing
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use madang_core::ids::next_id;
//! use madang_core::validation::normalize_name;
//!
//! assert_eq!(next_id(None), 1);
//! assert_eq!(next_id(Some(41)), 42);
//! assert_eq!(normalize_name("  Alice  "), "Alice");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ids;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use ids::{next_id, IdTarget};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default database file name, matching the historical `madang.db`.
pub const DEFAULT_DATABASE_FILE: &str = "madang.db";

/// Separator between book id and name in an order-entry choice.
///
/// Choices render as `"<bookid>,<bookname>"`, e.g. `"3,Olympic Stories"`.
pub const BOOK_CHOICE_SEPARATOR: char = ',';
