//! Hashed-field lookup tool.
//!
//! Opens a SQLite database read-only, introspects one table, and prints the
//! rows whose hashed phone, address or identifier fields match a plaintext
//! query.
//!
//! # Security Guarantees
//! - Read-only database access; missing files are never created
//! - All query values are bound parameters
//! - Query plaintext is not logged above DEBUG

use clap::Parser;
use hashlookup::{Cli, run};
use hashlookup_core::init_logging;
use std::process::ExitCode;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.global.verbose, cli.global.quiet) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let mut stdout = std::io::stdout();
    match run(&cli, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Lookup failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
