//! Core data models for lookups and their results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column injected by address lookups to record which column matched.
pub const MATCHED_COL: &str = "matched_col";

/// Lookup mode selecting the matching strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// Phone number, normalized to digits and hashed in two variants
    Phone,
    /// Case-insensitive substring match on address-like columns
    Address,
    /// Digest of the raw query against hash columns and hash arrays
    Hash,
}

impl LookupMode {
    /// All modes, in CLI help order.
    pub const ALL: [LookupMode; 3] = [LookupMode::Phone, LookupMode::Address, LookupMode::Hash];

    /// Returns the CLI spelling of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            LookupMode::Phone => "phone",
            LookupMode::Address => "address",
            LookupMode::Hash => "hash",
        }
    }
}

impl std::fmt::Display for LookupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LookupMode {
    type Err = crate::error::LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LookupMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| {
                crate::error::LookupError::usage(format!(
                    "unknown mode '{}' (expected phone, address or hash)",
                    s
                ))
            })
    }
}

/// The validated {mode, query} pair driving one lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpec {
    /// Matching strategy
    pub mode: LookupMode,
    /// Query text exactly as supplied by the user
    pub raw_query: String,
}

impl MatchSpec {
    /// Creates a match specification.
    pub fn new(mode: LookupMode, raw_query: impl Into<String>) -> Self {
        Self {
            mode,
            raw_query: raw_query.into(),
        }
    }
}

/// One result row: column name to value rendered as text.
///
/// NULL cells are stored as empty strings. Keys are kept sorted so that
/// console and JSON output are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, String>);

impl Row {
    /// Returns the value of a column, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Iterates over `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of columns in the row.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sets a column value. Later writes to the same column win.
    pub(crate) fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
