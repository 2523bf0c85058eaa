//! Generic identifier lookup by digest.
//!
//! Tables may store digests two ways: one per `*_sha`/`*_sha256` column, or
//! several per row in a `row_hashes` JSON array. Both are searched and the
//! results concatenated, array matches first. A row found both ways is
//! returned twice.

use crate::Result;
use crate::adapters::LookupBackend;
use crate::aggregate::ResultSet;
use crate::hasher::digest;
use crate::models::Row;
use crate::query::{hash_array_match, hash_columns_match};

/// Finds rows holding the digest of `raw_query` in their hash array or in
/// any hash column.
///
/// A table with neither yields an empty result.
///
/// # Errors
/// Schema and query errors from the backend.
pub async fn lookup_hash<B>(backend: &B, table: &str, raw_query: &str) -> Result<Vec<Row>>
where
    B: LookupBackend + ?Sized,
{
    let query_digest = digest(raw_query);
    let layout = backend.describe_columns(table).await?;
    let mut results = ResultSet::new();

    let array_column = layout.hash_array_column();
    if let Some(column) = array_column {
        let query = hash_array_match(&layout, column, &query_digest);
        results.extend(backend.fetch_rows(&query).await?);
    }

    let hash_columns = layout.hash_columns();
    let scalar_query = hash_columns_match(
        &layout,
        &hash_columns,
        std::slice::from_ref(&query_digest),
        "scalar hash lookup",
    );
    if let Some(query) = &scalar_query {
        results.extend(backend.fetch_rows(query).await?);
    }

    if array_column.is_none() && scalar_query.is_none() {
        tracing::info!(
            "Table '{}' has no hash columns and no {} column",
            layout.table,
            crate::schema::HASH_ARRAY_COLUMN
        );
    }

    Ok(results.into_rows())
}
