//! # Sweet Shop CLI Library
//!
//! Command-line front end for the sweet shop inventory. The binary in
//! `main.rs` only calls [`run`].
//!
//! ## Module Organization
//! ```text
//! sweetshop_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── config.rs       ◄─── AppConfig (env, --db, data dir)
//! ├── commands.rs     ◄─── One handler per subcommand
//! ├── render.rs       ◄─── Tables and totals as text
//! └── error.rs        ◄─── CliError → exit code
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;

use clap::Parser;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::AppConfig;
use error::CliResult;
use sweetshop_db::Database;

/// Runs the `sweetshop` command line.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Command Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: warn, sweetshop crates at info                           │
/// │                                                                         │
/// │  2. Parse Arguments ──────────────────────────────────────────────────► │
/// │                                                                         │
/// │  3. Resolve Configuration ────────────────────────────────────────────► │
/// │     • SWEETSHOP_* variables, then --db                                  │
/// │     • Create the data directory                                         │
/// │                                                                         │
/// │  4. Open Database ────────────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │                                                                         │
/// │  5. Run One Command ──────────────────────────────────────────────────► │
/// │     • Output to stdout, exit 0                                          │
/// │     • Refusal or failure to stderr, exit 1                              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match execute(cli).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Opens the database named by the configuration, runs `cli.command`, and
/// closes the database again.
pub async fn execute(cli: Cli) -> CliResult<String> {
    let mut config = AppConfig::from_env()?;
    if let Some(path) = cli.db {
        config = config.with_db_path(path);
    }
    config.ensure_data_dir()?;

    info!(db_path = %config.db_path.display(), "Opening inventory");
    let db = Database::new(config.db_config()).await?;

    let result = commands::dispatch(&db.sweets(), &config, cli.command).await;
    db.close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=sweetshop_db=trace` - Trace the storage engine only
/// - Default: WARN, INFO for the sweetshop crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,sweetshop=info,sqlx=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn run_in(dir: &TempDir, args: &[&str]) -> CliResult<String> {
        let db = dir.path().join("data/sweetshop.db");
        let db = db.to_string_lossy().into_owned();
        let argv = ["sweetshop", "--db", db.as_str()]
            .into_iter()
            .chain(args.iter().copied());
        execute(Cli::try_parse_from(argv).unwrap()).await
    }

    #[tokio::test]
    async fn test_state_persists_between_invocations() {
        let dir = TempDir::new().unwrap();

        let out = run_in(&dir, &["purchase", "1001", "3"]).await.unwrap();
        assert_eq!(out, "Purchased 3 Kaju Katli(s)\n");

        let add = [
            "add", "--name", "Peda", "--category", "Milk-Based", "--price", "9", "--quantity", "3",
        ];
        let out = run_in(&dir, &add).await.unwrap();
        assert_eq!(out, "Peda added successfully! (id 1004)\n");

        let listing = run_in(&dir, &["list", "--search", "kaju"]).await.unwrap();
        assert!(listing.lines().nth(1).unwrap().ends_with(" 17"));

        let listing = run_in(&dir, &["list", "--category", "Milk-Based"]).await.unwrap();
        assert!(listing.contains("Peda"));
        assert!(listing.lines().any(|l| l.contains("Peda") && l.ends_with("LOW")));
    }

    #[tokio::test]
    async fn test_refusal_is_an_error() {
        let dir = TempDir::new().unwrap();

        let err = run_in(&dir, &["purchase", "1002", "16"]).await.unwrap_err();
        assert_eq!(err.to_string(), "Insufficient stock! Only 15 available");

        let err = run_in(&dir, &["add", "--name", "Peda"]).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Category is required\nValid price is required\nValid quantity is required"
        );
    }
}
