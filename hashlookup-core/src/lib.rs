//! Hash-matching query engine for hashlookup.
//!
//! Finds rows in a SQLite table whose hashed identifying fields (phone
//! numbers, addresses, generic identifiers) match a plaintext query.
//!
//! # Security Guarantees
//! - The database is opened read-only and never created
//! - Table and column names in generated SQL come from the live catalog only
//! - Query text and digests are always bound parameters
//! - Query plaintext is never included in error messages
//!
//! # Architecture
//! - `schema` classifies columns by naming convention
//! - `query` builds parameterized match queries from a table layout
//! - `lookup` holds one strategy per mode, written against the
//!   `adapters::LookupBackend` trait
//! - `output` renders the aggregated rows for the console or a JSON file

pub mod adapters;
pub mod aggregate;
pub mod config;
pub mod error;
pub mod hasher;
pub mod logging;
pub mod lookup;
pub mod models;
pub mod output;
pub mod query;
pub mod schema;

// Re-export commonly used types
pub use adapters::{LookupBackend, create_backend};
pub use config::LookupConfig;
pub use error::{LookupError, Result};
pub use logging::init_logging;
pub use lookup::run_lookup;
pub use models::{LookupMode, MatchSpec, Row};
pub use schema::{ColumnDescriptor, TableLayout};
