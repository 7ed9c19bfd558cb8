//! # Sweet Shop CLI Entry Point
//!
//! All logic lives in the `sweetshop_cli` library so it can be tested.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    sweetshop_cli::run().await
}
