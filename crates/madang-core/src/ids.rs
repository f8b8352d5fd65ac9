//! # Identifier Allocation Rule
//!
//! Customer and order ids are plain integers allocated as `MAX(id) + 1`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    MAX + 1 Allocation                                   │
//! │                                                                         │
//! │  SELECT MAX(custid) AS maxid FROM Customer                             │
//! │       │                                                                 │
//! │       ├── NULL (empty table) ──► 1                                      │
//! │       └── 7                  ──► 8                                      │
//! │                                                                         │
//! │  The read and the following INSERT are separate statements with no    │
//! │  lock between them. Two sessions reading the same MAX both get the     │
//! │  same id; the second INSERT then fails on the primary key.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This module only holds the pure rule and the whitelist of allocatable
//! columns; `madang-db` runs the query.

use serde::{Deserialize, Serialize};

/// A table/column pair that ids are allocated for.
///
/// The names are fixed strings, so they are safe to format into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdTarget {
    /// `Customer.custid`
    Customer,
    /// `Orders.orderid`
    Order,
}

impl IdTarget {
    /// Table holding the id column.
    pub const fn table(self) -> &'static str {
        match self {
            IdTarget::Customer => "Customer",
            IdTarget::Order => "Orders",
        }
    }

    /// The integer id column.
    pub const fn column(self) -> &'static str {
        match self {
            IdTarget::Customer => "custid",
            IdTarget::Order => "orderid",
        }
    }
}

/// Computes the next id from the current maximum.
///
/// ## Example
/// ```rust
/// use madang_core::ids::next_id;
///
/// assert_eq!(next_id(None), 1);
/// assert_eq!(next_id(Some(0)), 1);
/// assert_eq!(next_id(Some(10)), 11);
/// ```
#[inline]
pub fn next_id(current_max: Option<i64>) -> i64 {
    match current_max {
        Some(max) => max + 1,
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_table_starts_at_one() {
        assert_eq!(next_id(None), 1);
    }

    #[test]
    fn test_target_names() {
        assert_eq!(IdTarget::Customer.table(), "Customer");
        assert_eq!(IdTarget::Customer.column(), "custid");
        assert_eq!(IdTarget::Order.table(), "Orders");
        assert_eq!(IdTarget::Order.column(), "orderid");
    }

    proptest! {
        #[test]
        fn next_id_is_one_past_max(max in 0i64..i64::MAX) {
            prop_assert_eq!(next_id(Some(max)), max + 1);
        }

        #[test]
        fn sequential_allocation_is_dense(count in 1usize..200) {
            let mut current = None;
            for expected in 1..=count as i64 {
                let id = next_id(current);
                prop_assert_eq!(id, expected);
                current = Some(id);
            }
        }
    }
}
