//! # Order Repository
//!
//! Records a sale for a resolved customer.
//!
//! ## Order Entry
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Order Entry                                     │
//! │                                                                         │
//! │  NewOrder { custid, bookid, saleprice: "15000" }   orderdate: today    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT MAX(orderid) + 1          (not reserved, see ids module)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT INTO Orders … VALUES (?1, ?2, ?3, ?4, ?5)   own transaction    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Order (read back as stored)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sale Price
//! The price is free text and is bound as text. The column's NUMERIC affinity
//! stores "15000" as an integer and "12.5" as a real; "free" or "" stay text.
//! Reads cast it back to text, so what the operator typed comes back out.

use chrono::{Local, NaiveDate};
use madang_core::{IdTarget, NewOrder, Order};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::accessor::run_execute;
use crate::error::{DbError, DbResult};
use crate::ids;

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts an order dated `orderdate`.
    ///
    /// No existence check is made on `custid` or `bookid`.
    pub async fn enter(&self, new: &NewOrder, orderdate: NaiveDate) -> DbResult<Order> {
        let orderid = ids::allocate(&self.pool, IdTarget::Order).await?;

        debug!(
            orderid,
            custid = new.custid,
            bookid = new.bookid,
            saleprice = %new.saleprice,
            "Inserting order"
        );

        run_execute(
            &self.pool,
            "INSERT INTO Orders (orderid, custid, bookid, saleprice, orderdate) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            &[
                orderid.into(),
                new.custid.into(),
                new.bookid.into(),
                new.saleprice.clone().into(),
                orderdate.into(),
            ],
        )
        .await?;

        info!(orderid, custid = new.custid, "Order recorded");

        self.get_by_id(orderid)
            .await?
            .ok_or_else(|| DbError::not_found("Order", orderid.to_string()))
    }

    /// Inserts an order dated with the local calendar date.
    pub async fn enter_today(&self, new: &NewOrder) -> DbResult<Order> {
        self.enter(new, Local::now().date_naive()).await
    }

    /// Gets an order by id.
    pub async fn get_by_id(&self, orderid: i64) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT orderid, custid, bookid,
                   CAST(saleprice AS TEXT) AS saleprice,
                   CAST(orderdate AS TEXT) AS orderdate
            FROM Orders
            WHERE orderid = ?1
            "#,
        )
        .bind(orderid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Counts orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn order(saleprice: &str) -> NewOrder {
        NewOrder {
            custid: 1,
            bookid: 1,
            saleprice: saleprice.to_string(),
        }
    }

    #[tokio::test]
    async fn test_enter_assigns_sequential_ids_and_stores_date() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

        let first = db.orders().enter(&order("6000"), date).await.unwrap();
        let second = db.orders().enter(&order("21000"), date).await.unwrap();

        assert_eq!(first.orderid, 1);
        assert_eq!(second.orderid, 2);
        assert_eq!(second.orderdate.as_deref(), Some("2024-07-01"));
        assert_eq!(db.orders().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_price_text_is_passed_through() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

        for price in ["15000", "free", ""] {
            let stored = db.orders().enter(&order(price), date).await.unwrap();
            assert_eq!(stored.saleprice.as_deref(), Some(price));
        }
    }

    #[tokio::test]
    async fn test_enter_does_not_check_references() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let before = Local::now().date_naive();
        let stored = db
            .orders()
            .enter_today(&NewOrder {
                custid: 404,
                bookid: 404,
                saleprice: "1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(stored.custid, 404);
        let after = Local::now().date_naive();
        let stored_date = stored.orderdate.unwrap();
        assert!(stored_date == before.to_string() || stored_date == after.to_string());
    }

    #[tokio::test]
    async fn test_dates_read_as_stored() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query(
            "INSERT INTO Orders (orderid, custid, bookid, saleprice, orderdate) \
             VALUES (1, 1, 1, 6000, NULL), (2, 1, 1, 7000, '2014-07-01 00:00:00')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let undated = db.orders().get_by_id(1).await.unwrap().unwrap();
        assert_eq!(undated.orderdate, None);

        let timestamped = db.orders().get_by_id(2).await.unwrap().unwrap();
        assert_eq!(timestamped.orderdate.as_deref(), Some("2014-07-01 00:00:00"));
    }
}
