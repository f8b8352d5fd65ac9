//! # View State
//!
//! Everything the three views show, in one struct owned by the shell loop.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ViewState                                       │
//! │                                                                         │
//! │  lookup_name ──► lookup: CustomerLookup ──► resolved custid            │
//! │                                                  │                      │
//! │  books ──► order_form { book, price } ◄──────────┘ (order needs both)  │
//! │                                                                         │
//! │  registration { name, address, phone }                                 │
//! │                                                                         │
//! │  notice: result of the last action (success / warning / error)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers take `&mut ViewState`; nothing else holds view data between
//! actions.

use madang_core::{Book, CustomerLookup};
use serde::Serialize;

use crate::error::ApiError;

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Status line produced by the last action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl From<&ApiError> for Notice {
    fn from(err: &ApiError) -> Self {
        Notice::error(err.message.clone())
    }
}

/// Order entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderForm {
    /// Selected catalogue entry
    pub book: Option<Book>,

    /// Sale price exactly as typed
    pub price: String,
}

impl OrderForm {
    pub fn clear(&mut self) {
        *self = OrderForm::default();
    }
}

/// Registration form, kept after a failed submit so it can be corrected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationForm {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Complete state of the three views.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    /// Lookup field content, as typed
    pub lookup_name: String,

    /// Outcome of the last lookup
    pub lookup: CustomerLookup,

    /// Book choices, ordered by bookid
    pub books: Vec<Book>,

    pub order_form: OrderForm,

    pub registration: RegistrationForm,

    /// Result of the last action
    pub notice: Option<Notice>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Customer an order would be recorded for.
    pub fn resolved_custid(&self) -> Option<i64> {
        self.lookup.custid()
    }

    /// Catalogue entry with this id, if loaded.
    pub fn find_book(&self, bookid: i64) -> Option<&Book> {
        self.books.iter().find(|b| b.bookid == bookid)
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }
}
