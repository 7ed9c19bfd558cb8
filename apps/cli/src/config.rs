//! # Configuration
//!
//! Settings resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. `--db` flag
//! 2. Environment variables (`SWEETSHOP_*`)
//! 3. Defaults (this file), with the database in the platform data dir
//!
//! Configuration is read-only after startup.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use sweetshop_db::DbConfig;
use thiserror::Error;

pub const ENV_DB_PATH: &str = "SWEETSHOP_DB_PATH";
pub const ENV_SLOT_QUOTA: &str = "SWEETSHOP_SLOT_QUOTA";
pub const ENV_CURRENCY_SYMBOL: &str = "SWEETSHOP_CURRENCY_SYMBOL";

const DEFAULT_CURRENCY_SYMBOL: &str = "₹";
const DB_FILE_NAME: &str = "sweetshop.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite file holding the inventory slot.
    pub db_path: PathBuf,

    /// Largest inventory payload the database will accept, in bytes.
    /// Default: None (unlimited)
    pub slot_quota_bytes: Option<usize>,

    /// Prefix for every displayed price.
    /// Default: "₹"
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            db_path: default_db_path(),
            slot_quota_bytes: None,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl AppConfig {
    /// Creates configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SWEETSHOP_DB_PATH`: Database file
    /// - `SWEETSHOP_SLOT_QUOTA`: Slot quota in bytes (e.g., "5242880")
    /// - `SWEETSHOP_CURRENCY_SYMBOL`: Price prefix (e.g., "$")
    pub fn from_env() -> Result<Self, ConfigError> {
        AppConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.trim().is_empty()) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(ENV_SLOT_QUOTA) {
            let quota = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_SLOT_QUOTA,
                    value: raw.clone(),
                })?;
            config.slot_quota_bytes = Some(quota);
        }

        if let Some(symbol) = lookup(ENV_CURRENCY_SYMBOL) {
            config.currency_symbol = symbol;
        }

        Ok(config)
    }

    /// Overrides the database path (the `--db` flag).
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    /// Renders a price for display, e.g. `₹50.00`.
    pub fn format_price(&self, value: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, value)
    }

    /// Database configuration for this run.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.db_path.clone()).slot_quota_bytes(self.slot_quota_bytes)
    }

    /// Creates the directory the database file lives in.
    pub fn ensure_data_dir(&self) -> Result<(), ConfigError> {
        match self.db_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => ensure_dir(dir),
            _ => Ok(()),
        }
    }
}

fn ensure_dir(dir: &Path) -> Result<(), ConfigError> {
    std::fs::create_dir_all(dir).map_err(|source| ConfigError::DataDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.sweetshop.inventory/sweetshop.db`
/// - **Windows**: `%APPDATA%\sweetshop\inventory\data\sweetshop.db`
/// - **Linux**: `~/.local/share/inventory/sweetshop.db`
///
/// Falls back to the working directory when no home directory is known.
fn default_db_path() -> PathBuf {
    match ProjectDirs::from("com", "sweetshop", "inventory") {
        Some(dirs) => dirs.data_dir().join(DB_FILE_NAME),
        None => PathBuf::from(DB_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.slot_quota_bytes, None);
        assert!(config.db_path.ends_with(DB_FILE_NAME));
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/tmp/shop.db"),
            (ENV_SLOT_QUOTA, " 4096 "),
            (ENV_CURRENCY_SYMBOL, "$"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.slot_quota_bytes, Some(4096));
        assert_eq!(config.format_price(8.5), "$8.50");
    }

    #[test]
    fn test_invalid_quota() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_SLOT_QUOTA, "lots")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: ENV_SLOT_QUOTA, ref value } if value == "lots"
        ));
    }

    #[test]
    fn test_flag_beats_env() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_DB_PATH, "/tmp/env.db")]))
            .unwrap()
            .with_db_path("/tmp/flag.db");
        assert_eq!(config.db_path, PathBuf::from("/tmp/flag.db"));
    }

    #[test]
    fn test_format_price() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.format_price(50.0), "₹50.00");
        assert_eq!(config.format_price(2450.0), "₹2450.00");
        assert_eq!(config.format_price(0.126), "₹0.13");
    }

    #[test]
    fn test_db_config_carries_quota() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_SLOT_QUOTA, "10")]))
            .unwrap()
            .with_db_path("/tmp/x.db");
        let db = config.db_config();
        assert_eq!(db.slot_quota_bytes, Some(10));
        assert_eq!(db.database_path, PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn test_ensure_data_dir_creates_parent() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::from_lookup(lookup(&[]))
            .unwrap()
            .with_db_path(dir.path().join("nested/deeper/sweetshop.db"));

        config.ensure_data_dir().unwrap();
        assert!(dir.path().join("nested/deeper").is_dir());
    }
}
