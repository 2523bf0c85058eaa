//! Phone number lookup.
//!
//! Stored phone digests may have been computed with or without a leading
//! `+`, so both variants are hashed and matched in one query.

use crate::Result;
use crate::adapters::LookupBackend;
use crate::aggregate::ResultSet;
use crate::hasher::digest;
use crate::models::Row;
use crate::query::hash_columns_match;

/// Normalized form of a phone query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneCandidates {
    /// ASCII digits of the query, in order
    pub digits: String,
    /// Whether a `+` appeared anywhere in the query
    pub had_plus: bool,
}

impl PhoneCandidates {
    /// Strips everything but ASCII digits, remembering any `+`.
    ///
    /// A query without digits is kept as-is: its variants are `""` and
    /// `"+"`, which are hashed and matched like any other.
    ///
    /// # Example
    /// ```rust
    /// use hashlookup_core::lookup::PhoneCandidates;
    ///
    /// let candidates = PhoneCandidates::parse("+7 999 123-45-67");
    /// assert_eq!(candidates.variants(), ["+79991234567", "79991234567"]);
    /// ```
    pub fn parse(raw_query: &str) -> Self {
        Self {
            digits: raw_query.chars().filter(char::is_ascii_digit).collect(),
            had_plus: raw_query.contains('+'),
        }
    }

    /// Plaintext variants to hash. The form matching the input comes first;
    /// both are always included.
    pub fn variants(&self) -> Vec<String> {
        let plain = self.digits.clone();
        let plus = format!("+{}", self.digits);
        if self.had_plus {
            vec![plus, plain]
        } else {
            vec![plain, plus]
        }
    }
}

/// Finds rows where any hash column equals the digest of either phone
/// variant. Each matching row is returned once.
///
/// A table without hash columns yields an empty result.
///
/// # Errors
/// Schema and query errors from the backend.
pub async fn lookup_phone<B>(backend: &B, table: &str, raw_query: &str) -> Result<Vec<Row>>
where
    B: LookupBackend + ?Sized,
{
    let candidates = PhoneCandidates::parse(raw_query);
    if candidates.digits.is_empty() {
        tracing::warn!("Phone query contains no digits; matching empty phone digests");
    }
    let digests: Vec<String> = candidates.variants().iter().map(|v| digest(v)).collect();

    let layout = backend.describe_columns(table).await?;
    let hash_columns = layout.hash_columns();

    let Some(query) = hash_columns_match(&layout, &hash_columns, &digests, "phone hash lookup")
    else {
        tracing::info!("Table '{}' has no hash columns", layout.table);
        return Ok(Vec::new());
    };

    let mut results = ResultSet::new();
    results.extend(backend.fetch_rows(&query).await?);
    Ok(results.into_rows())
}
