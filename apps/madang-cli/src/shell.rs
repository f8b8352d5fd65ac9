//! # Interactive Shell
//!
//! Reads one command per line, runs it, prints the result.
//!
//! ## Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Shell Loop                                      │
//! │                                                                         │
//! │  startup: rerender(None) ──► render ──► prompt                         │
//! │                                            │                            │
//! │        ┌───────────────────────────────────┘                            │
//! │        ▼                                                                │
//! │  read line ──► parse_command ──► dispatch ──► Outcome                  │
//! │                                                 │                       │
//! │        Redraw ──────────────────────────────────┼──► render            │
//! │        Rerun { carry_over } ──► rerender ───────┼──► render            │
//! │        Print(text) ─────────────────────────────┼──► text              │
//! │        Quit / end of input ─────────────────────┴──► exit              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each line is handled to completion before the next one is read.

use chrono::Local;
use madang_core::NewCustomer;
use madang_db::Database;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::commands::{self, Action, Outcome};
use crate::error::ApiError;
use crate::render;
use crate::state::{Notice, ViewState};

const PROMPT: &str = "madang> ";

/// Separator between the fields of `register`.
const FIELD_SEPARATOR: char = '|';

/// Result of handling one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Text to print before the next prompt
    Output(String),
    Quit,
}

/// Parses one input line.
///
/// ## Returns
/// * `Ok(None)` - Blank line
/// * `Ok(Some(action))` - A command
/// * `Err(_)` - Unknown command
pub fn parse_command(line: &str) -> Result<Option<Action>, ApiError> {
    let line = line.trim_end_matches(['\r', '\n']).trim_start();
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest),
        None => (line, ""),
    };

    let action = match verb.to_ascii_lowercase().as_str() {
        "lookup" | "l" => Action::Lookup(rest.to_string()),
        "books" => Action::ListBooks,
        "book" | "b" => match rest.trim() {
            "" | "none" => Action::SelectBook(None),
            choice => Action::SelectBook(Some(choice.to_string())),
        },
        "price" | "p" => Action::SetPrice(rest.to_string()),
        "order" | "o" => Action::SubmitOrder,
        "register" | "r" => Action::Register(parse_registration(rest)),
        "show" => Action::Show,
        "state" => Action::State,
        "help" | "?" => Action::Help,
        "quit" | "exit" | "q" => Action::Quit,
        other => {
            return Err(ApiError::validation(format!(
                "Unknown command '{}'. Type 'help' for the list of commands.",
                other
            )))
        }
    };

    Ok(Some(action))
}

/// `name | address | phone`; missing fields are empty.
///
/// The spaces padding each separator are not part of the field.
fn parse_registration(rest: &str) -> NewCustomer {
    let mut fields = rest.splitn(3, FIELD_SEPARATOR).map(str::trim);

    NewCustomer {
        name: fields.next().unwrap_or_default().to_string(),
        address: fields.next().unwrap_or_default().to_string(),
        phone: fields.next().unwrap_or_default().to_string(),
    }
}

/// Handles one input line against the view.
pub async fn step(db: &Database, view: &mut ViewState, line: &str) -> Step {
    let action = match parse_command(line) {
        Ok(Some(action)) => action,
        Ok(None) => return Step::Output(String::new()),
        Err(err) => {
            view.set_notice(Notice::from(&err));
            return Step::Output(draw(view));
        }
    };

    match commands::dispatch(db, view, action).await {
        Outcome::Redraw => Step::Output(draw(view)),
        Outcome::Rerun { carry_over } => {
            if let Err(err) = commands::rerender(db, view, carry_over).await {
                view.set_notice(Notice::from(&err));
            }
            Step::Output(draw(view))
        }
        Outcome::Print(text) => Step::Output(text),
        Outcome::Quit => Step::Quit,
    }
}

/// Renders the views with today's local date in the order form.
fn draw(view: &ViewState) -> String {
    render::render(view, Local::now().date_naive())
}

/// Runs the shell until `quit` or end of input.
pub async fn run<R, W>(db: &Database, view: &mut ViewState, input: R, out: &mut W) -> Result<(), ApiError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if let Err(err) = commands::rerender(db, view, None).await {
        view.set_notice(Notice::from(&err));
    }
    writeln!(out, "{}", draw(view))?;
    writeln!(out, "Type 'help' for the list of commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            debug!("End of input");
            break;
        };

        match step(db, view, &line).await {
            Step::Output(text) if text.is_empty() => {}
            Step::Output(text) => writeln!(out, "{}", text.trim_end())?,
            Step::Quit => break,
        }
    }

    writeln!(out)?;
    info!("Shell closed");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
