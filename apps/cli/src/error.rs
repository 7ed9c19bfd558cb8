//! # CLI Error Type
//!
//! Everything that makes `sweetshop` exit non-zero.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  Startup                                                               │
//! │    ├── bad SWEETSHOP_* value ────────► ConfigError ──┐                 │
//! │    └── database won't open ──────────► DbError ──────┤                 │
//! │                                                      │                 │
//! │  Command                                             ▼                 │
//! │    ├── add form invalid ─────────────► Rejected ──► CliError          │
//! │    ├── purchase / restock refused ───► Rejected      │                 │
//! │    └── engine returned false/None ───► Rejected      │                 │
//! │                                                      ▼                 │
//! │                               main: print to stderr, exit code 1      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Rejected` carries the same text the shop user would see in the browser
//! notification.

use sweetshop_core::ValidationError;
use sweetshop_db::DbError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Argument that parsed but is not an allowed value.
    #[error("{0}")]
    InvalidArgument(#[from] ValidationError),

    /// The operation ran and was refused. One message per line.
    #[error("{}", .0.join("\n"))]
    Rejected(Vec<String>),

    #[error("Export failed: {0}")]
    Export(#[from] serde_json::Error),
}

impl CliError {
    pub fn rejected(message: impl Into<String>) -> Self {
        CliError::Rejected(vec![message.into()])
    }
}

pub type CliResult<T> = Result<T, CliError>;
