//! SQLite lookup backend.
//!
//! # Module Structure
//! - `connection`: Opening the database file (read-only, single connection)
//! - `introspection`: Table resolution and column enumeration
//! - `rows`: Executing match queries and rendering cells as text
//!
//! # Security Guarantees
//! - Opened read-only by default, never created if missing
//! - Table names are resolved through `sqlite_master` with a bound parameter
//! - Query values are always bound, never spliced into SQL

pub mod connection;
pub mod introspection;
pub mod rows;


use super::LookupBackend;
use crate::Result;
use crate::models::Row;
use crate::query::MatchQuery;
use crate::schema::TableLayout;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub use connection::validate_sqlite_location;
pub use rows::cell_text;

/// SQLite backend holding the single connection used for one run.
pub struct SqliteBackend {
    /// Connection pool, limited to one connection
    pub pool: SqlitePool,
    /// Database location as given (kept for diagnostics)
    pub location: String,
}

impl std::fmt::Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend")
            .field(
                "location",
                &crate::error::redact_database_location(&self.location),
            )
            .field("is_closed", &self.pool.is_closed())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LookupBackend for SqliteBackend {
    async fn describe_columns(&self, table: &str) -> Result<TableLayout> {
        introspection::describe_columns(&self.pool, table).await
    }

    async fn fetch_rows(&self, query: &MatchQuery) -> Result<Vec<Row>> {
        rows::fetch_rows(&self.pool, query).await
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
