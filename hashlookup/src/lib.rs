//! Library module for the hashlookup binary.
//!
//! Exposes the CLI definition and the run orchestration so both can be
//! exercised from integration tests. `main.rs` only wires logging and exit
//! codes around [`run`].

use clap::{Args, Parser};
use hashlookup_core::{
    LookupConfig, LookupMode, MatchSpec, Result, config::DEFAULT_OUTPUT_DIR, create_backend,
    error::redact_database_location, output, run_lookup,
};
use std::io::Write;
use std::path::PathBuf;

/// CLI argument structure
#[derive(Debug, Parser)]
#[command(name = "hashlookup")]
#[command(about = "Look up database rows by hashed identifying fields")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "
hashlookup - find rows whose hashed fields match a plaintext query

The table is introspected on every run and columns are classified by name:
- *_sha / *_sha256 columns hold SHA-256 hex digests
- a row_hashes column holds a JSON array of digests
- columns containing addr, street or city hold plaintext addresses

MODES:
  phone    digest the query digits, with and without a leading '+'
  address  case-insensitive substring match on each address column
  hash     digest the query as-is and match hash columns and row_hashes

EXAMPLES:
  hashlookup people.db Users phone '+7 999 123-45-67'
  hashlookup people.db Users address main
  hashlookup people.db Users hash --json ann@example.com
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Database location
    #[arg(help = "SQLite file path, sqlite:// URL or :memory:")]
    pub database: String,

    /// Table to search
    #[arg(help = "Table name (resolved case-insensitively)")]
    pub table: String,

    /// Lookup mode
    #[arg(value_parser = parse_mode, help = "Lookup mode: phone, address or hash")]
    pub mode: LookupMode,

    /// Plaintext query
    #[arg(allow_hyphen_values = true, help = "Plaintext value to look up")]
    pub query: String,

    /// Write results as JSON
    #[arg(long, help = "Write results to <output-dir>/<query>.json instead of the console")]
    pub json: bool,

    /// JSON output directory
    #[arg(
        long,
        env = "HASHLOOKUP_OUTPUT_DIR",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Directory for JSON result files"
    )]
    pub output_dir: PathBuf,
}

/// Logging flags accepted anywhere on the command line
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true, help = "Suppress all logs except errors")]
    pub quiet: bool,
}

/// Parses a mode argument; only the exact lowercase names are accepted.
fn parse_mode(value: &str) -> std::result::Result<LookupMode, String> {
    value.parse::<LookupMode>().map_err(|e| e.to_string())
}

impl Cli {
    /// Builds the lookup configuration from parsed arguments.
    pub fn lookup_config(&self) -> LookupConfig {
        LookupConfig::default().with_output_dir(self.output_dir.clone())
    }

    /// Builds the match specification from parsed arguments.
    pub fn match_spec(&self) -> MatchSpec {
        MatchSpec::new(self.mode, self.query.clone())
    }
}

/// Runs one lookup and reports the result to `out`.
///
/// The database connection is closed before results are reported,
/// whether the lookup succeeded or not.
///
/// # Errors
/// Returns the first usage, open, schema, query or output error.
pub async fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let config = cli.lookup_config();
    let spec = cli.match_spec();

    tracing::info!(
        "Opening {} for {} lookup",
        redact_database_location(&cli.database),
        spec.mode
    );
    let backend = create_backend(&cli.database, &config).await?;

    let outcome = run_lookup(backend.as_ref(), &cli.table, &spec).await;
    backend.close().await;
    let rows = outcome?;

    if cli.json {
        let path = output::write_json(&rows, &config.output_dir, &spec.raw_query).await?;
        writeln!(out, "Wrote {}", path.display()).map_err(|e| {
            hashlookup_core::LookupError::output_failed("Failed to write results", e)
        })?;
    } else {
        output::render_console(&rows, out)?;
    }

    Ok(())
}
