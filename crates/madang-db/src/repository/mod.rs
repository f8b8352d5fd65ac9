//! # Repository Module
//!
//! Database repository implementations for Madang Manager.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Shell command                                                         │
//! │       │                                                                 │
//! │       │  db.customers().lookup(" Alice ")                              │
//! │       ▼                                                                 │
//! │  CustomerRepository                                                    │
//! │  ├── lookup(&self, name)          → CustomerLookup                     │
//! │  ├── register(&self, new)         → Registration                       │
//! │  └── order_history(&self, name)   → Vec<OrderHistoryRow>               │
//! │       │                                                                 │
//! │       │  run_query / run_execute (bound parameters)                    │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository) - Lookup and registration
//! - [`BookRepository`](book::BookRepository) - Catalogue for the order dropdown
//! - [`OrderRepository`](order::OrderRepository) - Order entry

pub mod book;
pub mod customer;
pub mod order;
