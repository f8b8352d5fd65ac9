//! # Lookup Commands
//!
//! Customer lookup by name and the book list.

use madang_core::validation::normalize_name;
use madang_core::CustomerLookup;
use madang_db::Database;
use tracing::info;

use super::Outcome;
use crate::error::ApiError;
use crate::state::{Notice, NoticeLevel, ViewState};

/// Looks up `name` and stores the outcome in the view.
///
/// A name nobody has is a normal outcome, shown by [`status`]. A failed
/// query leaves the lookup `Empty`, so no customer stays resolved for a
/// name that was never confirmed.
pub async fn lookup(db: &Database, view: &mut ViewState, name: &str) -> Result<Outcome, ApiError> {
    let result = db.customers().lookup(name).await;

    view.lookup_name = name.to_string();
    view.lookup = CustomerLookup::Empty;
    view.lookup = result?;

    info!(
        name = %normalize_name(name),
        custid = ?view.lookup.custid(),
        orders = view.lookup.history().len(),
        "Lookup complete"
    );

    Ok(Outcome::Redraw)
}

/// Reloads the catalogue and prints it as `bookid,bookname` choices.
pub async fn list_books(db: &Database, view: &mut ViewState) -> Result<Outcome, ApiError> {
    view.books = db.books().list().await?;

    if view.books.is_empty() {
        return Ok(Outcome::Print("No books in the catalogue.\n".to_string()));
    }

    let mut text = String::from("Book choices:\n");
    for book in &view.books {
        text.push_str("  ");
        text.push_str(&book.choice_label());
        text.push('\n');
    }

    Ok(Outcome::Print(text))
}

/// Status line describing the current lookup outcome.
pub fn status(view: &ViewState) -> Option<Notice> {
    let name = normalize_name(&view.lookup_name);

    match &view.lookup {
        CustomerLookup::Empty => None,
        CustomerLookup::WithHistory { rows, .. } => Some(Notice::success(format!(
            "Found {} order(s) for '{}'.",
            rows.len(),
            name
        ))),
        CustomerLookup::NoHistory { custid } => Some(Notice {
            level: NoticeLevel::Warning,
            message: format!(
                "No order history for '{}' (custid {}). New orders can be entered below.",
                name, custid
            ),
        }),
        CustomerLookup::NotFound => Some(Notice::error(format!(
            "Customer '{}' does not exist. Register the customer first.",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{dispatch, Action};
    use madang_core::{Book, NewCustomer};
    use madang_db::DbConfig;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_lookup_outcomes_drive_status() {
        let db = test_db().await;
        db.customers()
            .register(&NewCustomer {
                name: "Kim Yuna".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let mut view = ViewState::new();

        lookup(&db, &mut view, "").await.unwrap();
        assert_eq!(status(&view), None);

        lookup(&db, &mut view, "Nobody").await.unwrap();
        let notice = status(&view).unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.contains("'Nobody'"));

        lookup(&db, &mut view, " Kim Yuna ").await.unwrap();
        assert_eq!(view.lookup_name, " Kim Yuna ");
        assert_eq!(view.resolved_custid(), Some(1));
        let notice = status(&view).unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("custid 1"));
    }

    #[tokio::test]
    async fn test_failed_lookup_unresolves_previous_customer() {
        let db = test_db().await;
        for name in ["Alice", "Bob"] {
            db.customers()
                .register(&NewCustomer {
                    name: name.to_string(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }
        let mut view = ViewState::new();

        lookup(&db, &mut view, "Alice").await.unwrap();
        assert_eq!(view.resolved_custid(), Some(1));

        // Bob's customer row resolves, then the history query fails
        sqlx::query("DROP TABLE Orders")
            .execute(db.pool())
            .await
            .unwrap();

        let outcome = dispatch(&db, &mut view, Action::Lookup("Bob".to_string())).await;
        assert_eq!(outcome, Outcome::Redraw);
        assert_eq!(view.lookup_name, "Bob");
        assert_eq!(view.lookup, CustomerLookup::Empty);
        assert_eq!(view.resolved_custid(), None);
        assert_eq!(view.notice.as_ref().unwrap().level, NoticeLevel::Error);

        view.order_form.book = Some(Book {
            bookid: 1,
            bookname: "Football History".to_string(),
        });
        view.order_form.price = "9000".to_string();
        dispatch(&db, &mut view, Action::SubmitOrder).await;
        assert_eq!(
            view.notice.unwrap().message,
            "No customer selected: look up or register a customer first"
        );
    }

    #[tokio::test]
    async fn test_list_books_prints_choices() {
        let db = test_db().await;
        let mut view = ViewState::new();

        assert_eq!(
            list_books(&db, &mut view).await.unwrap(),
            Outcome::Print("No books in the catalogue.\n".to_string())
        );

        db.books()
            .insert(&Book {
                bookid: 9,
                bookname: "Olympic Stories".to_string(),
            })
            .await
            .unwrap();

        let Outcome::Print(text) = list_books(&db, &mut view).await.unwrap() else {
            panic!("expected printed list");
        };
        assert!(text.contains("  9,Olympic Stories\n"));
        assert_eq!(view.books.len(), 1);
    }
}
