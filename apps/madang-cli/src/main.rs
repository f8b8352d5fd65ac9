//! # Madang Manager Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Madang Manager                                   │
//! │                                                                         │
//! │  stdin ──► shell ──► commands ──► madang-db ──► madang.db (SQLite)     │
//! │                │                                                        │
//! │                └──► render ──► stdout          logs ──► stderr         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exits with status 1 and the error message when startup fails.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match madang_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("madang: {}", err);
            ExitCode::FAILURE
        }
    }
}
