//! Accumulation of rows from several query executions.

use crate::models::Row;

/// Rows gathered across one lookup, in execution order.
///
/// Nothing is deduplicated: a row returned by two sub-queries is kept twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    rows: Vec<Row>,
}

impl ResultSet {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the rows of one query execution.
    pub fn extend(&mut self, rows: impl IntoIterator<Item = Row>) {
        self.rows.extend(rows);
    }

    /// Number of rows collected so far.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no rows were collected.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Hands the rows over to the caller.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}
