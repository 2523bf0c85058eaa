//! Column classification by naming convention.
//!
//! The tool does not enforce a schema. It inspects column names only:
//! - `*_sha` / `*_sha256` columns hold one digest each,
//! - names containing `addr`, `street` or `city` hold address text,
//! - a `row_hashes` column holds a JSON array of digests for the row.
//!
//! All matching is case-insensitive. A column may carry several roles.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Reserved name of the JSON hash-array column.
pub const HASH_ARRAY_COLUMN: &str = "row_hashes";

/// Pre-compiled column name patterns.
struct ColumnPatterns {
    hash_suffix: regex::Regex,
    address_like: regex::Regex,
}

impl ColumnPatterns {
    fn instance() -> &'static Self {
        static PATTERNS: OnceLock<ColumnPatterns> = OnceLock::new();
        PATTERNS.get_or_init(Self::compile)
    }

    #[allow(clippy::expect_used)]
    fn compile() -> Self {
        Self {
            hash_suffix: regex::Regex::new(r"(?i)_sha(256)?$").expect("Invalid hash suffix pattern"),
            address_like: regex::Regex::new(r"(?i)(addr|street|city)")
                .expect("Invalid address pattern"),
        }
    }
}

/// A table column and the roles its name implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name exactly as declared
    pub name: String,
    /// Name ends with `_sha` or `_sha256`
    pub is_hash_column: bool,
    /// Name contains `addr`, `street` or `city`
    pub is_address_like: bool,
    /// Name is `row_hashes`
    pub is_hash_array: bool,
}

impl ColumnDescriptor {
    /// Classifies a column by its name.
    ///
    /// # Example
    /// ```rust
    /// use hashlookup_core::schema::ColumnDescriptor;
    ///
    /// let column = ColumnDescriptor::classify("Phone_SHA256");
    /// assert!(column.is_hash_column);
    /// assert!(!column.is_address_like);
    /// ```
    pub fn classify(name: impl Into<String>) -> Self {
        let name = name.into();
        let patterns = ColumnPatterns::instance();

        Self {
            is_hash_column: patterns.hash_suffix.is_match(&name),
            is_address_like: patterns.address_like.is_match(&name),
            is_hash_array: name.eq_ignore_ascii_case(HASH_ARRAY_COLUMN),
            name,
        }
    }
}

/// Introspected layout of one table.
///
/// `table` is the name as recorded in the database catalog, not as typed by
/// the user. Generated SQL only ever uses identifiers from a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    /// Catalog name of the table
    pub table: String,
    /// Columns in declaration order
    pub columns: Vec<ColumnDescriptor>,
}

impl TableLayout {
    /// Builds a layout by classifying each column name.
    pub fn new<I, S>(table: impl Into<String>, column_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.into(),
            columns: column_names
                .into_iter()
                .map(ColumnDescriptor::classify)
                .collect(),
        }
    }

    /// Columns holding a single digest, in declaration order.
    pub fn hash_columns(&self) -> Vec<&ColumnDescriptor> {
        self.columns.iter().filter(|c| c.is_hash_column).collect()
    }

    /// Address-like columns, in declaration order.
    pub fn address_columns(&self) -> Vec<&ColumnDescriptor> {
        self.columns.iter().filter(|c| c.is_address_like).collect()
    }

    /// The hash-array column, if the table has one.
    pub fn hash_array_column(&self) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.is_hash_array)
    }
}
