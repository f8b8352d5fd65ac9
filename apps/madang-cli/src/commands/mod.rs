//! # Commands Module
//!
//! One handler per user action.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (Action, dispatch, rerender)
//! ├── lookup.rs    ◄─── Customer lookup, book list
//! ├── order.rs     ◄─── Book choice, price, order submit
//! └── register.rs  ◄─── Customer registration
//! ```
//!
//! ## How an Action Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Action Flow                                          │
//! │                                                                         │
//! │  "register Alice | Seoul | 010"                                        │
//! │         │  shell::parse_command                                         │
//! │         ▼                                                               │
//! │  Action::Register(NewCustomer)                                         │
//! │         │  dispatch(&db, &mut view, action)                             │
//! │         ▼                                                               │
//! │  register::register ──► Outcome::Rerun { carry_over: Some("Alice") }   │
//! │         │  rerender(&db, &mut view, carry_over)                         │
//! │         ▼                                                               │
//! │  view.lookup_name = "Alice", lookup re-run, books reloaded             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  render::render(&view, today)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The carry-over is a value moved from the registration result into the
//! next [`rerender`] call. It pre-fills the lookup once and is gone after.

pub mod lookup;
pub mod order;
pub mod register;

use madang_core::{CustomerLookup, NewCustomer};
use madang_db::Database;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::{Notice, ViewState};

/// A single user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Look a customer up by name
    Lookup(String),

    /// Reload and list the book choices
    ListBooks,

    /// Choose a book (`None` clears the choice)
    SelectBook(Option<String>),

    /// Set the sale price text
    SetPrice(String),

    /// Record an order for the resolved customer
    SubmitOrder,

    /// Register a new customer
    Register(NewCustomer),

    /// Redraw the views
    Show,

    /// Dump the view state as JSON
    State,

    Help,

    Quit,
}

/// What the shell does after a handler returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the views as they are
    Redraw,

    /// Refresh from the database, then print the views
    Rerun { carry_over: Option<String> },

    /// Print this text instead of the views
    Print(String),

    Quit,
}

/// Runs the handler for `action`.
///
/// Clears the previous notice first. A failing handler leaves its message
/// as an error notice and the views are redrawn.
pub async fn dispatch(db: &Database, view: &mut ViewState, action: Action) -> Outcome {
    debug!(?action, "Dispatching action");
    view.notice = None;

    let result = match action {
        Action::Lookup(name) => lookup::lookup(db, view, &name).await,
        Action::ListBooks => lookup::list_books(db, view).await,
        Action::SelectBook(choice) => order::select_book(db, view, choice.as_deref()).await,
        Action::SetPrice(price) => Ok(order::set_price(view, price)),
        Action::SubmitOrder => order::submit_order(db, view).await,
        Action::Register(new) => register::register(db, view, new).await,
        Action::Show => Ok(Outcome::Redraw),
        Action::State => serde_json::to_string_pretty(view)
            .map(Outcome::Print)
            .map_err(|e| ApiError::internal(e.to_string())),
        Action::Help => Ok(Outcome::Print(HELP.to_string())),
        Action::Quit => Ok(Outcome::Quit),
    };

    result.unwrap_or_else(|err| {
        warn!(code = ?err.code, message = %err.message, "Action failed");
        view.set_notice(Notice::from(&err));
        Outcome::Redraw
    })
}

/// Refreshes everything the views read from the database.
///
/// `carry_over`, when present, replaces the lookup field before the lookup
/// is re-run.
pub async fn rerender(
    db: &Database,
    view: &mut ViewState,
    carry_over: Option<String>,
) -> Result<(), ApiError> {
    if let Some(name) = carry_over {
        debug!(name = %name, "Pre-filling lookup from carry-over");
        view.lookup_name = name;
    }

    view.books = db.books().list().await?;

    // A selection whose book vanished from the catalogue is dropped
    if let Some(selected) = &view.order_form.book {
        if view.find_book(selected.bookid).is_none() {
            view.order_form.book = None;
        }
    }

    // Cleared first: a failed re-run must not keep the previous customer
    view.lookup = CustomerLookup::Empty;
    view.lookup = db.customers().lookup(&view.lookup_name).await?;
    Ok(())
}

pub const HELP: &str = "\
Commands:
  lookup <name>                          Look up a customer and their orders
  books                                  List the book choices
  book <bookid | bookid,bookname | none> Choose the book to order
  price <text>                           Set the sale price
  order                                  Record the order for the looked-up customer
  register <name> | <address> | <phone>  Register a new customer
  show                                   Redraw the views
  state                                  Print the view state as JSON
  help                                   Show this help
  quit                                   Exit
";

// =============================================================================
// Unit Tests
// =============================================================================
