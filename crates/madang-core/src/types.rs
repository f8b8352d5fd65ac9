//! # Domain Types
//!
//! Core domain types used throughout Madang Manager.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │      Book       │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  custid (i64)   │   │  bookid (i64)   │   │  orderid (i64)  │       │
//! │  │  name           │   │  bookname       │   │  custid  (→)    │       │
//! │  │  address?       │   └─────────────────┘   │  bookid  (→)    │       │
//! │  │  phone?         │                         │  saleprice?     │       │
//! │  └─────────────────┘                         │  orderdate?     │       │
//! │                                              └─────────────────┘       │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │  CustomerLookup (outcome)    │   │  OrderHistoryRow             │   │
//! │  │  Empty | NotFound            │   │  Customer ⋈ Orders ⋈ Book    │   │
//! │  │  NoHistory { custid }        │   │  one row per order           │   │
//! │  │  WithHistory { custid, rows }│   └──────────────────────────────┘   │
//! │  └──────────────────────────────┘                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! All ids are surrogate integers allocated by the `MAX + 1` rule in
//! [`crate::ids`]. Names are NOT unique: two customers may share one.

use serde::{Deserialize, Serialize};

use crate::BOOK_CHOICE_SEPARATOR;

// =============================================================================
// Customer
// =============================================================================

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Surrogate id (`MAX + 1`).
    pub custid: i64,

    /// Display name, stored trimmed.
    pub name: String,

    /// Free-form postal address.
    pub address: Option<String>,

    /// Free-form phone number.
    pub phone: Option<String>,
}

/// Registration form input.
///
/// Only `name` is required; it is trimmed before storage. Address and phone
/// are stored exactly as typed, including empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Result of a successful registration.
///
/// The shell threads this value into the next render so the lookup field is
/// pre-filled with the new customer's name exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub custid: i64,

    /// The trimmed name that was stored.
    pub name: String,
}

// =============================================================================
// Book
// =============================================================================

/// A book from the externally maintained catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Book {
    pub bookid: i64,
    pub bookname: String,
}

impl Book {
    /// Label used by the order-entry dropdown: `"<bookid>,<bookname>"`.
    ///
    /// ## Example
    /// ```rust
    /// use madang_core::Book;
    ///
    /// let book = Book { bookid: 3, bookname: "Olympic Stories".to_string() };
    /// assert_eq!(book.choice_label(), "3,Olympic Stories");
    /// ```
    pub fn choice_label(&self) -> String {
        format!("{}{}{}", self.bookid, BOOK_CHOICE_SEPARATOR, self.bookname)
    }
}

// =============================================================================
// Order
// =============================================================================

/// Order form input.
///
/// `saleprice` is the raw text from the price field. It is NOT validated:
/// empty or non-numeric text goes to storage as-is and SQLite's NUMERIC
/// affinity decides what is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub custid: i64,
    pub bookid: i64,
    pub saleprice: String,
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub orderid: i64,
    pub custid: i64,
    pub bookid: i64,

    /// Price as text (whatever the engine kept, rendered as text).
    pub saleprice: Option<String>,

    /// Date as stored, read as text.
    ///
    /// Orders entered here hold the local day as `YYYY-MM-DD`. Rows loaded
    /// from elsewhere may hold NULL or a datetime and are kept as they are.
    pub orderdate: Option<String>,
}

/// One row of a customer's order history (Customer ⋈ Orders ⋈ Book).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderHistoryRow {
    pub custid: i64,
    pub name: String,
    pub bookname: String,
    pub orderdate: Option<String>,
    pub saleprice: Option<String>,
}

impl OrderHistoryRow {
    /// Column headers, in display order.
    pub const COLUMNS: [&'static str; 5] = ["custid", "name", "bookname", "orderdate", "saleprice"];

    /// The row as display cells, aligned with [`Self::COLUMNS`].
    pub fn cells(&self) -> [String; 5] {
        [
            self.custid.to_string(),
            self.name.clone(),
            self.bookname.clone(),
            self.orderdate.clone().unwrap_or_default(),
            self.saleprice.clone().unwrap_or_default(),
        ]
    }
}

// =============================================================================
// Customer Lookup Outcome
// =============================================================================

/// Outcome of looking a customer up by name.
///
/// ## State Machine
/// ```text
/// name.trim() == ""           ──► Empty        (no query run)
/// no Customer row             ──► NotFound     (no order query run)
/// Customer row, no orders     ──► NoHistory { custid }
/// Customer row + order rows   ──► WithHistory { custid, rows }
/// ```
///
/// When several customers share a name, `custid` is the lowest one and
/// `rows` holds the orders of every customer with that name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CustomerLookup {
    /// The name field was blank.
    #[default]
    Empty,

    /// No customer has this name.
    NotFound,

    /// The customer exists but has no orders.
    NoHistory { custid: i64 },

    /// The customer exists and has orders.
    WithHistory {
        custid: i64,
        rows: Vec<OrderHistoryRow>,
    },
}

impl CustomerLookup {
    /// The resolved customer id, if any.
    pub fn custid(&self) -> Option<i64> {
        match self {
            CustomerLookup::NoHistory { custid } | CustomerLookup::WithHistory { custid, .. } => {
                Some(*custid)
            }
            CustomerLookup::Empty | CustomerLookup::NotFound => None,
        }
    }

    /// Whether a customer was resolved (orders may be entered).
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.custid().is_some()
    }

    /// Order history rows (empty unless `WithHistory`).
    pub fn history(&self) -> &[OrderHistoryRow] {
        match self {
            CustomerLookup::WithHistory { rows, .. } => rows,
            _ => &[],
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
