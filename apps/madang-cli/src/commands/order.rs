//! # Order Commands
//!
//! Filling in and submitting the order entry form.
//!
//! ## Form Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Form Lifecycle                                 │
//! │                                                                         │
//! │  lookup <name> ──► customer resolved                                   │
//! │                          │                                              │
//! │  book 3 ─────────────────┤   price 15000                               │
//! │                          ▼                                              │
//! │                     ┌──────────┐   order    ┌──────────────────────┐   │
//! │                     │  Filled  │──────────►│ Order row inserted   │    │
//! │                     │   form   │           │ form cleared         │    │
//! │                     └──────────┘           │ lookup re-run        │    │
//! │                          │                  └──────────────────────┘   │
//! │                     failure: form kept, error shown verbatim           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use madang_core::validation::parse_book_choice;
use madang_core::{CoreError, NewOrder, ValidationError};
use madang_db::Database;
use tracing::{debug, info};

use super::Outcome;
use crate::error::ApiError;
use crate::state::{Notice, ViewState};

/// Chooses the book to order, by id or by its `"bookid,bookname"` label.
///
/// `None` clears the choice.
pub async fn select_book(
    db: &Database,
    view: &mut ViewState,
    choice: Option<&str>,
) -> Result<Outcome, ApiError> {
    let Some(choice) = choice else {
        view.order_form.book = None;
        return Ok(Outcome::Redraw);
    };

    let bookid = parse_book_choice(choice)?;

    if view.books.is_empty() {
        view.books = db.books().list().await?;
    }

    let book = view
        .find_book(bookid)
        .cloned()
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: "book".to_string(),
            reason: format!("no book with id {}", bookid),
        })?;

    debug!(bookid, "Book selected");
    view.set_notice(Notice::info(format!("Selected {}", book.choice_label())));
    view.order_form.book = Some(book);
    Ok(Outcome::Redraw)
}

/// Stores the price text unchanged.
pub fn set_price(view: &mut ViewState, price: String) -> Outcome {
    view.order_form.price = price;
    Outcome::Redraw
}

/// Records an order for the resolved customer, dated today.
///
/// ## Preconditions
/// - The last lookup resolved a customer
/// - A book is selected
///
/// The price is not checked; an empty or non-numeric price is stored as is.
pub async fn submit_order(db: &Database, view: &mut ViewState) -> Result<Outcome, ApiError> {
    let custid = view
        .resolved_custid()
        .ok_or(CoreError::CustomerNotResolved)?;
    let book = view
        .order_form
        .book
        .as_ref()
        .ok_or(CoreError::BookNotSelected)?;

    let new = NewOrder {
        custid,
        bookid: book.bookid,
        saleprice: view.order_form.price.clone(),
    };

    let order = db.orders().enter_today(&new).await?;

    info!(orderid = order.orderid, custid, "Order entered from shell");
    let message = format!(
        "Order {} recorded ({} on {}).",
        order.orderid,
        book_label(view, order.bookid),
        order.orderdate.as_deref().unwrap_or_default()
    );
    view.order_form.clear();
    view.set_notice(Notice::success(message));

    Ok(Outcome::Rerun { carry_over: None })
}

fn book_label(view: &ViewState, bookid: i64) -> String {
    view.find_book(bookid)
        .map(|b| b.bookname.clone())
        .unwrap_or_else(|| format!("book {}", bookid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{dispatch, rerender, Action};
    use crate::error::ErrorCode;
    use crate::state::NoticeLevel;
    use madang_core::{Book, CustomerLookup, NewCustomer};
    use madang_db::DbConfig;

    async fn test_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for (bookid, bookname) in [(1, "History of Football"), (3, "Understanding Football")] {
            db.books()
                .insert(&Book {
                    bookid,
                    bookname: bookname.to_string(),
                })
                .await
                .unwrap();
        }
        db.customers()
            .register(&NewCustomer {
                name: "Park Ji-sung".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_select_book_by_label_or_id() {
        let db = test_db().await;
        let mut view = ViewState::new();

        select_book(&db, &mut view, Some("3,Understanding Football"))
            .await
            .unwrap();
        assert_eq!(view.order_form.book.as_ref().map(|b| b.bookid), Some(3));

        select_book(&db, &mut view, Some("1")).await.unwrap();
        assert_eq!(view.order_form.book.as_ref().map(|b| b.bookid), Some(1));

        select_book(&db, &mut view, None).await.unwrap();
        assert!(view.order_form.book.is_none());
    }

    #[tokio::test]
    async fn test_select_unknown_or_malformed_book_fails() {
        let db = test_db().await;
        let mut view = ViewState::new();

        let err = select_book(&db, &mut view, Some("42")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "book has invalid format: no book with id 42");

        let err = select_book(&db, &mut view, Some("abc,Title")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_order_requires_book() {
        let db = test_db().await;
        let mut view = ViewState::new();
        crate::commands::lookup::lookup(&db, &mut view, "Park Ji-sung")
            .await
            .unwrap();

        let err = submit_order(&db, &mut view).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Precondition);
        assert_eq!(err.message, "No book selected");
        assert_eq!(db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_order_then_refresh_shows_row_and_clears_form() {
        let db = test_db().await;
        let mut view = ViewState::new();

        dispatch(&db, &mut view, Action::Lookup("Park Ji-sung".to_string())).await;
        dispatch(&db, &mut view, Action::SelectBook(Some("3".to_string()))).await;
        dispatch(&db, &mut view, Action::SetPrice("15000".to_string())).await;

        let outcome = dispatch(&db, &mut view, Action::SubmitOrder).await;
        assert_eq!(outcome, Outcome::Rerun { carry_over: None });
        assert_eq!(view.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Success));
        assert_eq!(view.order_form.book, None);
        assert_eq!(view.order_form.price, "");

        rerender(&db, &mut view, None).await.unwrap();
        let CustomerLookup::WithHistory { custid, rows } = &view.lookup else {
            panic!("expected history, got {:?}", view.lookup);
        };
        assert_eq!(*custid, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].bookname, "Understanding Football");
        assert_eq!(rows[0].saleprice.as_deref(), Some("15000"));
    }

    #[tokio::test]
    async fn test_non_numeric_price_is_accepted() {
        let db = test_db().await;
        let mut view = ViewState::new();

        dispatch(&db, &mut view, Action::Lookup("Park Ji-sung".to_string())).await;
        dispatch(&db, &mut view, Action::SelectBook(Some("1".to_string()))).await;
        dispatch(&db, &mut view, Action::SetPrice("free".to_string())).await;
        dispatch(&db, &mut view, Action::SubmitOrder).await;

        rerender(&db, &mut view, None).await.unwrap();
        assert_eq!(view.lookup.history()[0].saleprice.as_deref(), Some("free"));
    }
}
