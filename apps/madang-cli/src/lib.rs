//! # Madang CLI Library
//!
//! Terminal front end for the Madang bookstore desk: customer lookup with
//! order history, order entry and customer registration.
//!
//! ## Module Organization
//! ```text
//! madang_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Flags, environment, data directory
//! │   └── view.rs     ◄─── ViewState (forms, lookup outcome, notice)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Action, dispatch, rerender
//! │   ├── lookup.rs   ◄─── Customer lookup, book list
//! │   ├── order.rs    ◄─── Order form and submit
//! │   └── register.rs ◄─── Customer registration
//! ├── shell.rs        ◄─── Line parsing and the input loop
//! ├── render.rs       ◄─── Text views
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod shell;
pub mod state;

use clap::Parser;
use madang_db::Database;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use state::{AppConfig, Cli, ViewState};

/// Runs the application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,madang=debug,sqlx=warn; override with RUST_LOG      │
/// │                                                                         │
/// │  2. Resolve Configuration ────────────────────────────────────────────► │
/// │     • --db  >  MADANG_DB_PATH  >  platform data directory               │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • One SQLite connection for the whole session                       │
/// │     • Create missing tables unless --no-bootstrap                       │
/// │     • Failure here is fatal                                             │
/// │                                                                         │
/// │  4. Run the Shell ────────────────────────────────────────────────────► │
/// │     • stdin lines → actions → views on stdout                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), ApiError> {
    let cli = Cli::parse();

    init_tracing();

    info!("Starting Madang Manager");

    let config = AppConfig::from_cli(&cli)?;
    config.ensure_data_dir()?;
    info!(db_path = %config.database_path.display(), "Database path determined");

    let db = Database::new(config.db_config()).await?;

    let mut view = ViewState::new();
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    let result = shell::run(&db, &mut view, stdin, &mut stdout).await;

    db.close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=madang_db=trace` - Show trace for the database crate only
/// - Default: `info,madang=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,madang=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
