//! # Configuration
//!
//! Process configuration resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`, `--no-bootstrap`)
//! 2. Environment variables (`MADANG_DB_PATH`)
//! 3. Platform data directory (`…/madang.db`)
//!
//! Configuration is read-only after startup.

use clap::Parser;
use directories::ProjectDirs;
use madang_core::DEFAULT_DATABASE_FILE;
use madang_db::DbConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ApiError;

/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "MADANG_DB_PATH";

/// Madang Manager: bookstore customer and order desk
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "madang", version, about)]
pub struct Cli {
    /// Database file path (overrides MADANG_DB_PATH)
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Do not create missing tables on startup
    #[arg(long)]
    pub no_bootstrap: bool,

    /// Seconds to wait for the database connection
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub connect_timeout: u64,
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Create missing tables on connect
    pub bootstrap_schema: bool,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl AppConfig {
    /// Resolves configuration from flags and the process environment.
    pub fn from_cli(cli: &Cli) -> Result<Self, ApiError> {
        Self::resolve(cli, std::env::var(DB_PATH_ENV).ok())
    }

    /// Resolves configuration from flags and an explicit env value.
    pub fn resolve(cli: &Cli, env_db_path: Option<String>) -> Result<Self, ApiError> {
        let database_path = match (&cli.db, env_db_path) {
            (Some(path), _) => path.clone(),
            (None, Some(path)) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_database_path()?,
        };

        Ok(AppConfig {
            database_path,
            bootstrap_schema: !cli.no_bootstrap,
            connect_timeout_secs: cli.connect_timeout,
        })
    }

    /// Creates the parent directory of the database file if needed.
    pub fn ensure_data_dir(&self) -> Result<(), ApiError> {
        if let Some(parent) = self.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Database configuration for [`madang_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .bootstrap_schema(self.bootstrap_schema)
    }
}

/// Platform-specific database location.
///
/// - **macOS**: `~/Library/Application Support/com.madang.manager/madang.db`
/// - **Windows**: `%APPDATA%\madang\manager\data\madang.db`
/// - **Linux**: `~/.local/share/manager/madang.db`
fn default_database_path() -> Result<PathBuf, ApiError> {
    let dirs = ProjectDirs::from("com", "madang", "manager")
        .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?;

    Ok(dirs.data_dir().join(DEFAULT_DATABASE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_env() {
        let cli = Cli {
            db: Some(PathBuf::from("/tmp/flag.db")),
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, Some("/tmp/env.db".to_string())).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/flag.db"));
    }

    #[test]
    fn test_env_wins_over_default() {
        let config = AppConfig::resolve(&Cli::default(), Some("/tmp/env.db".to_string())).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/env.db"));
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let config = AppConfig::resolve(&Cli::default(), Some("  ".to_string()));
        // Falls through to the platform directory (may be unavailable in CI)
        if let Ok(config) = config {
            assert!(config.database_path.ends_with(DEFAULT_DATABASE_FILE));
        }
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::parse_from(["madang", "--db", "shop.db", "--no-bootstrap"]);
        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.database_path, PathBuf::from("shop.db"));
        assert!(!config.bootstrap_schema);
        assert_eq!(config.connect_timeout_secs, 30);

        let db = config.db_config();
        assert!(!db.bootstrap_schema);
        assert_eq!(db.connect_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_ensure_data_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            database_path: dir.path().join("nested").join("madang.db"),
            bootstrap_schema: true,
            connect_timeout_secs: 5,
        };

        config.ensure_data_dir().unwrap();
        assert!(dir.path().join("nested").is_dir());
    }
}
