//! # State Module
//!
//! State of the terminal app.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐    │
//! │  │    Database      │ │    ViewState     │ │    AppConfig         │    │
//! │  │  (madang-db)     │ │                  │ │                      │    │
//! │  │  • 1 connection  │ │  • lookup        │ │  • database path     │    │
//! │  │  • repositories  │ │  • order form    │ │  • bootstrap flag    │    │
//! │  │                  │ │  • registration  │ │  • connect timeout   │    │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘    │
//! │                                                                         │
//! │  All three are owned by the shell loop and passed down by reference.   │
//! │  Actions run one at a time, so no locking is involved.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod view;

pub use config::{AppConfig, Cli, DB_PATH_ENV};
pub use view::{Notice, NoticeLevel, OrderForm, RegistrationForm, ViewState};
