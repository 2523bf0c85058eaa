//! Address substring lookup.

use crate::Result;
use crate::adapters::LookupBackend;
use crate::aggregate::ResultSet;
use crate::models::Row;
use crate::query::address_match;

/// Finds rows whose address-like columns contain `raw_query`,
/// case-insensitively.
///
/// Each address-like column is queried on its own so that every row can be
/// tagged with the column that matched (`matched_col`). A row matching two
/// columns is therefore returned twice, once per column, in column order.
///
/// # Errors
/// Schema and query errors from the backend.
pub async fn lookup_address<B>(backend: &B, table: &str, raw_query: &str) -> Result<Vec<Row>>
where
    B: LookupBackend + ?Sized,
{
    let layout = backend.describe_columns(table).await?;
    let address_columns = layout.address_columns();

    if address_columns.is_empty() {
        tracing::info!("Table '{}' has no address-like columns", layout.table);
    }

    let mut results = ResultSet::new();
    for column in address_columns {
        let query = address_match(&layout, column, raw_query);
        results.extend(backend.fetch_rows(&query).await?);
    }

    Ok(results.into_rows())
}
