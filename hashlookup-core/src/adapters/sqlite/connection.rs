//! SQLite connection handling.
//!
//! # Location Formats
//! - Plain file path: `people.db`, `/var/data/people.sqlite`, `C:\data\x.db`
//! - URL: `sqlite:///path/to/people.db` or `sqlite://./relative.db`
//! - In-memory: `sqlite::memory:` or `:memory:` (mostly useful for tests)

use super::SqliteBackend;
use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

impl SqliteBackend {
    /// Opens the database at `location`.
    ///
    /// The file must already exist; it is never created.
    ///
    /// # Errors
    /// Returns a usage error for URLs of other database engines and a
    /// database-open error if the file cannot be opened.
    pub async fn open(location: &str, config: &LookupConfig) -> Result<Self> {
        validate_sqlite_location(location)?;
        let options = connect_options(location, config)?;

        tracing::debug!(
            "Opening SQLite database {} (read_only={})",
            crate::error::redact_database_location(location),
            config.read_only
        );

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(0)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| LookupError::open_failed("Failed to open SQLite database", e))?;

        Ok(Self::from_pool(pool, location))
    }

    /// Wraps an existing pool, e.g. one prepared by a test.
    pub fn from_pool(pool: SqlitePool, location: impl Into<String>) -> Self {
        Self {
            pool,
            location: location.into(),
        }
    }

    /// Checks if the backend points at an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        is_memory_location(&self.location)
    }
}

/// Validates that a location can only mean a SQLite database.
///
/// # Errors
/// Returns a usage error for empty locations and for URLs with a scheme
/// other than `sqlite`.
pub fn validate_sqlite_location(location: &str) -> Result<()> {
    if location.is_empty() {
        return Err(LookupError::usage("database path cannot be empty"));
    }

    if let Some((scheme, _)) = location.split_once("://")
        && !scheme.eq_ignore_ascii_case("sqlite")
    {
        return Err(LookupError::usage(format!(
            "unsupported database scheme '{}': only SQLite databases are supported",
            scheme
        )));
    }

    Ok(())
}

fn is_memory_location(location: &str) -> bool {
    location.contains(":memory:") || location.contains("mode=memory")
}

/// Returns what follows a `sqlite:` prefix, matched case-insensitively.
fn strip_sqlite_scheme(location: &str) -> Option<&str> {
    let prefix = location.get(..7)?;
    prefix
        .eq_ignore_ascii_case("sqlite:")
        .then(|| &location[7..])
}

/// Builds connect options. URLs go through the sqlx parser, plain paths are
/// used as file names verbatim so that `?` or `#` in a path stay literal.
fn connect_options(location: &str, config: &LookupConfig) -> Result<SqliteConnectOptions> {
    let options = if location == ":memory:" {
        SqliteConnectOptions::from_str("sqlite::memory:")
    } else if let Some(rest) = strip_sqlite_scheme(location) {
        SqliteConnectOptions::from_str(&format!("sqlite:{}", rest))
    } else {
        Ok(SqliteConnectOptions::new().filename(location))
    }
    .map_err(|e| LookupError::open_failed("Invalid SQLite database location", e))?;

    Ok(options
        .read_only(config.read_only && !is_memory_location(location))
        .create_if_missing(false))
}
