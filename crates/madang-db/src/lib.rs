//! # madang-db: Database Layer for Madang Manager
//!
//! Every SQL statement of the bookstore desk lives in this crate.
//! It uses SQLite through sqlx with a single connection for the whole process.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Madang Data Flow                                 │
//! │                                                                         │
//! │  Shell command (lookup / order / register)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    madang-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │   Accessor   │  │   │
//! │  │   │   (pool.rs)   │    │               │    │ (accessor.rs)│  │   │
//! │  │   │               │    │ CustomerRepo  │    │              │  │   │
//! │  │   │ 1 connection  │◄───│ BookRepo      │───►│ run_query    │  │   │
//! │  │   │ Schema        │    │ OrderRepo     │    │ run_execute  │  │   │
//! │  │   │ bootstrap     │    │ ids (MAX+1)   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   madang.db  (Customer, Book, Orders)                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection creation and configuration
//! - [`accessor`] - Query / execute primitives with bound parameters
//! - [`schema`] - Table bootstrap
//! - [`ids`] - `MAX + 1` id allocation
//! - [`error`] - Database error types
//! - [`repository`] - Customer, book and order repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use madang_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("madang.db")).await?;
//!
//! let lookup = db.customers().lookup("Park Ji-sung").await?;
//! let books = db.books().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod accessor;
pub mod error;
pub mod ids;
pub mod pool;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use accessor::{ResultTable, SqlValue};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::book::BookRepository;
pub use repository::customer::CustomerRepository;
pub use repository::order::OrderRepository;
