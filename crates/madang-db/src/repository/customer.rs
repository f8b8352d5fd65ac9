//! # Customer Repository
//!
//! Customer lookup by name and customer registration.
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Lookup Resolves a Name                           │
//! │                                                                         │
//! │  "  Alice "  ──trim──►  "Alice"                                        │
//! │       │                                                                 │
//! │       ├── "" ─────────────────────────────────────► Empty              │
//! │       ▼                                                                 │
//! │  SELECT … FROM Customer WHERE name = ?1 ORDER BY custid LIMIT 1        │
//! │       │                                                                 │
//! │       ├── no row ─────────────────────────────────► NotFound           │
//! │       ▼                                                                 │
//! │  SELECT … FROM Customer ⋈ Orders ⋈ Book WHERE name = ?1                │
//! │         ORDER BY custid, orderid                                       │
//! │       │                                                                 │
//! │       ├── no rows ────────────────────────────────► NoHistory{custid}  │
//! │       └── rows ──► custid of the Customer row ────► WithHistory        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Duplicate Names
//! Registration does not check for an existing name. When names collide the
//! lowest custid wins and the history lists the orders of every customer
//! carrying that name. This ambiguity comes with a name-keyed lookup and is
//! kept as-is.

use madang_core::validation::{normalize_name, validate_customer_name};
use madang_core::{Customer, CustomerLookup, IdTarget, NewCustomer, OrderHistoryRow, Registration};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::accessor::run_execute;
use crate::error::DbResult;
use crate::ids;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Resolves a customer by name (see module docs for the flow).
    ///
    /// "Not found" is an outcome, not an error.
    pub async fn lookup(&self, name: &str) -> DbResult<CustomerLookup> {
        let name = normalize_name(name);

        if name.is_empty() {
            return Ok(CustomerLookup::Empty);
        }

        debug!(name = %name, "Looking up customer");

        let Some(customer) = self.find_by_name(&name).await? else {
            debug!(name = %name, "Customer not found");
            return Ok(CustomerLookup::NotFound);
        };

        let rows = self.order_history(&name).await?;

        let custid = customer.custid;
        let lookup = if rows.is_empty() {
            CustomerLookup::NoHistory { custid }
        } else {
            CustomerLookup::WithHistory { custid, rows }
        };

        debug!(custid = ?lookup.custid(), orders = lookup.history().len(), "Lookup resolved");
        Ok(lookup)
    }

    /// Customer with exactly this (trimmed) name; lowest custid on ties.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT custid, name, address, phone
            FROM Customer
            WHERE name = ?1
            ORDER BY custid
            LIMIT 1
            "#,
        )
        .bind(normalize_name(name))
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Every order placed by a customer with this (trimmed) name.
    ///
    /// Ordered by custid then orderid, so results do not depend on the
    /// engine's scan order.
    pub async fn order_history(&self, name: &str) -> DbResult<Vec<OrderHistoryRow>> {
        let rows = sqlx::query_as::<_, OrderHistoryRow>(
            r#"
            SELECT
                c.custid,
                c.name,
                COALESCE(b.bookname, '') AS bookname,
                CAST(o.orderdate AS TEXT) AS orderdate,
                CAST(o.saleprice AS TEXT) AS saleprice
            FROM Customer c
            JOIN Orders o ON c.custid = o.custid
            JOIN Book b ON o.bookid = b.bookid
            WHERE c.name = ?1
            ORDER BY c.custid, o.orderid
            "#,
        )
        .bind(normalize_name(name))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Gets a customer by id.
    pub async fn get_by_id(&self, custid: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT custid, name, address, phone FROM Customer WHERE custid = ?1",
        )
        .bind(custid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Registers a new customer.
    ///
    /// ## Steps
    /// 1. Trim the name; blank → `DbError::Validation`, nothing executed
    /// 2. Allocate `MAX(custid) + 1`
    /// 3. INSERT in its own transaction (rolled back on failure)
    ///
    /// ## Returns
    /// The new custid and stored name, used by the shell to pre-fill the
    /// next lookup.
    pub async fn register(&self, new: &NewCustomer) -> DbResult<Registration> {
        let name = validate_customer_name(&new.name)?;

        let custid = ids::allocate(&self.pool, IdTarget::Customer).await?;

        debug!(custid, name = %name, "Inserting customer");

        run_execute(
            &self.pool,
            "INSERT INTO Customer (custid, name, address, phone) VALUES (?1, ?2, ?3, ?4)",
            &[
                custid.into(),
                name.clone().into(),
                new.address.clone().into(),
                new.phone.clone().into(),
            ],
        )
        .await?;

        info!(custid, name = %name, "Customer registered");
        Ok(Registration { custid, name })
    }

    /// Counts customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Customer")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
