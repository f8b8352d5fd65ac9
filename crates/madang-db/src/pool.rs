//! # Database Connection
//!
//! Opening and configuring the single SQLite connection.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Connection Per Process                         │
//! │                                                                         │
//! │  Shell startup                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Open + bootstrap schema                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────┐                                             │
//! │  │  SqlitePool (max 1)   │  never expires, never reconnects            │
//! │  │  ┌─────┐              │                                             │
//! │  │  │Conn │              │                                             │
//! │  │  └─────┘              │                                             │
//! │  └───────────────────────┘                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lookup ─► order ─► register ─► lookup ...  (strictly one at a time)   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pool is capped at one connection so every statement of the process
//! goes through the same SQLite handle, opened once at startup.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::book::BookRepository;
use crate::repository::customer::CustomerRepository;
use crate::repository::order::OrderRepository;
use crate::schema;

/// Special path understood as "private in-memory database".
const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("./madang.db")
///     .connect_timeout(Duration::from_secs(5))
///     .bootstrap_schema(false);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// How long to wait for the connection to open / become free.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Whether to create missing tables on connect.
    /// Default: true
    pub bootstrap_schema: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            connect_timeout: Duration::from_secs(30),
            bootstrap_schema: true,
        }
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to create missing tables on connect.
    pub fn bootstrap_schema(mut self, bootstrap: bool) -> Self {
        self.bootstrap_schema = bootstrap;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// Every call yields a separate, empty database.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            connect_timeout: Duration::from_secs(5),
            bootstrap_schema: true,
        }
    }

    /// Whether this configuration points at an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        if self.is_in_memory() {
            return SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()));
        }

        Ok(SqliteConnectOptions::new()
            .filename(&self.database_path)
            // WAL mode: crash-safe writes without blocking readers
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning is cheap and shares the same underlying connection.
#[derive(Debug, Clone)]
pub struct Database {
    /// Pool capped at a single connection.
    pool: SqlitePool,
}

impl Database {
    /// Opens the database connection.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Opens exactly one connection, kept for the process lifetime
    /// 3. Creates missing tables (if enabled)
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError::ConnectionFailed)` - Fatal: the shell cannot start
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening database connection"
        );

        let connect_options = config.connect_options()?;

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!("Database connection open");

        let db = Database { pool };

        if config.bootstrap_schema {
            db.bootstrap_schema().await?;
        } else {
            let missing = schema::missing_tables(&db.pool).await?;
            if !missing.is_empty() {
                warn!(tables = ?missing, "Bootstrap disabled and tables are missing");
            }
        }

        Ok(db)
    }

    /// Creates any missing table. Existing tables are left untouched.
    pub async fn bootstrap_schema(&self) -> DbResult<()> {
        info!("Bootstrapping schema");
        schema::ensure_schema(&self.pool).await?;
        Ok(())
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the customer repository.
    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.pool.clone())
    }

    /// Returns the book repository.
    pub fn books(&self) -> BookRepository {
        BookRepository::new(self.pool.clone())
    }

    /// Returns the order repository.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Closes the connection. Every later operation fails.
    pub async fn close(&self) {
        info!("Closing database connection");
        self.pool.close().await;
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
