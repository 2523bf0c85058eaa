//! Database backends for hash lookups.
//!
//! Strategies only talk to a [`LookupBackend`], which keeps them testable
//! against an in-memory mock. The production backend is SQLite.
//!
//! # Module Structure
//! - `sqlite`: SQLite backend (connection, introspection, row decoding)

use crate::config::LookupConfig;
use crate::models::Row;
use crate::query::MatchQuery;
use crate::schema::TableLayout;
use crate::Result;
use async_trait::async_trait;

pub mod sqlite;

/// Capability a lookup strategy needs from the database.
///
/// # Object Safety
/// This trait is object-safe, allowing for dynamic dispatch through
/// `Box<dyn LookupBackend>`.
#[async_trait]
pub trait LookupBackend: Send + Sync {
    /// Reads the current column layout of `table`.
    ///
    /// The schema is read fresh on every call; nothing is cached.
    ///
    /// # Errors
    /// Returns a schema error if the table does not exist, or a query error
    /// if the catalog cannot be read.
    async fn describe_columns(&self, table: &str) -> Result<TableLayout>;

    /// Executes a match query and decodes every returned row.
    ///
    /// # Errors
    /// Returns a query error if preparation or execution fails.
    async fn fetch_rows(&self, query: &MatchQuery) -> Result<Vec<Row>>;

    /// Releases the connection. Further calls will fail.
    async fn close(&self) {}
}

/// Opens the backend for a database location.
///
/// # Arguments
/// * `location` - File path, `sqlite://` URL or `:memory:`
/// * `config` - Lookup configuration (timeouts, read-only mode)
///
/// # Errors
/// Returns a usage error for non-SQLite URLs and a database-open error if
/// the file cannot be opened.
pub async fn create_backend(
    location: &str,
    config: &LookupConfig,
) -> Result<Box<dyn LookupBackend>> {
    config.validate()?;
    let backend = sqlite::SqliteBackend::open(location, config).await?;
    Ok(Box::new(backend))
}
