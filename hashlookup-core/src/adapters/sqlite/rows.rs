//! Match query execution and cell rendering.

use crate::Result;
use crate::error::LookupError;
use crate::models::Row;
use crate::query::MatchQuery;
use base64::Engine;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _, SqlitePool, TypeInfo, ValueRef};

/// Runs a match query with its bound parameters and decodes every row.
pub(crate) async fn fetch_rows(pool: &SqlitePool, query: &MatchQuery) -> Result<Vec<Row>> {
    tracing::debug!(
        "Running {} ({} bound parameters)",
        query.label,
        query.params.len()
    );
    tracing::trace!("SQL: {}", query.sql);

    let mut statement = sqlx::query(&query.sql);
    for param in &query.params {
        statement = statement.bind(param.as_str());
    }

    let rows = statement
        .fetch_all(pool)
        .await
        .map_err(|e| LookupError::query_failed(format!("{} failed", query.label), e))?;

    tracing::debug!("{} returned {} rows", query.label, rows.len());

    Ok(rows.iter().map(row_to_record).collect())
}

/// Converts a result row to a [`Row`], reading cells by position so that a
/// duplicated column name (such as an injected `matched_col`) keeps the
/// later value.
fn row_to_record(row: &SqliteRow) -> Row {
    let mut record = Row::default();
    for (index, column) in row.columns().iter().enumerate() {
        record.insert(column.name(), cell_text(row, index));
    }
    record
}

/// Renders one cell as text.
///
/// SQLite is dynamically typed, so the storage class of each value decides
/// the rendering: NULL becomes `""`, BLOBs are decoded as UTF-8 or, failing
/// that, rendered as `base64:<data>`. TEXT, INTEGER and REAL values are
/// converted by SQLite itself, so `1.0` stays `1.0` and `1e20` reads
/// `1.0e+20`.
pub fn cell_text(row: &SqliteRow, index: usize) -> String {
    let is_blob = match row.try_get_raw(index) {
        Ok(value) if value.is_null() => return String::new(),
        Ok(value) => value.type_info().name() == "BLOB",
        Err(_) => return String::new(),
    };

    if is_blob {
        return row
            .try_get::<Vec<u8>, _>(index)
            .map(|bytes| {
                String::from_utf8(bytes).unwrap_or_else(|e| {
                    let encoded = base64::engine::general_purpose::STANDARD.encode(e.as_bytes());
                    format!("base64:{}", encoded)
                })
            })
            .unwrap_or_default();
    }

    row.try_get_unchecked::<String, _>(index).unwrap_or_default()
}
