//! SQLite table introspection.
//!
//! # SQLite System Tables
//! - `sqlite_master`: resolves the user-supplied table name to its catalog name
//! - `pragma_table_info()`: enumerates columns in declaration order

use crate::Result;
use crate::error::LookupError;
use crate::schema::TableLayout;
use sqlx::SqlitePool;

/// Resolves `table` and classifies its columns.
///
/// Table names are matched case-insensitively, as SQLite itself does, and
/// both tables and views qualify.
pub(crate) async fn describe_columns(pool: &SqlitePool, table: &str) -> Result<TableLayout> {
    let canonical: Option<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master \
         WHERE type IN ('table', 'view') AND name = ? COLLATE NOCASE \
         LIMIT 1",
    )
    .bind(table)
    .fetch_optional(pool)
    .await
    .map_err(|e| LookupError::query_failed("Failed to read sqlite_master", e))?;

    let Some(canonical) = canonical else {
        tracing::debug!("Table '{}' not present in sqlite_master", table);
        return Err(LookupError::table_not_found(table));
    };

    let column_names: Vec<String> =
        sqlx::query_scalar("SELECT name FROM pragma_table_info(?) ORDER BY cid")
            .bind(canonical.as_str())
            .fetch_all(pool)
            .await
            .map_err(|e| {
                LookupError::query_failed(
                    format!("Failed to enumerate columns of '{}'", canonical),
                    e,
                )
            })?;

    if column_names.is_empty() {
        return Err(LookupError::table_not_found(table));
    }

    let layout = TableLayout::new(canonical, column_names);

    tracing::debug!(
        "Table '{}': {} columns, {} hash, {} address-like, hash array: {}",
        layout.table,
        layout.columns.len(),
        layout.hash_columns().len(),
        layout.address_columns().len(),
        layout.hash_array_column().is_some()
    );

    Ok(layout)
}
