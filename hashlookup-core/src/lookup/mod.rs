//! Lookup strategies, one per [`LookupMode`].
//!
//! Every strategy follows the same shape: introspect the table, derive the
//! values to match, run one or more parameterized queries through the
//! backend, and concatenate the results in execution order.
//!
//! # Module Structure
//! - `phone`: digits-only and `+`-prefixed digest variants against hash columns
//! - `address`: per-column substring match, tagged with `matched_col`
//! - `hash`: single digest against hash arrays and hash columns

pub mod address;
pub mod hash;
pub mod phone;


use crate::Result;
use crate::adapters::LookupBackend;
use crate::models::{LookupMode, MatchSpec, Row};

pub use address::lookup_address;
pub use hash::lookup_hash;
pub use phone::{PhoneCandidates, lookup_phone};

/// Runs the strategy selected by `spec.mode` against `table`.
///
/// Schema and query failures abort the lookup; no partial result is
/// returned. Zero matches is a successful, empty result.
///
/// # Errors
/// Propagates usage, schema and query errors from the strategy.
pub async fn run_lookup<B>(backend: &B, table: &str, spec: &MatchSpec) -> Result<Vec<Row>>
where
    B: LookupBackend + ?Sized,
{
    tracing::info!("Starting {} lookup on table '{}'", spec.mode, table);

    let rows = match spec.mode {
        LookupMode::Phone => lookup_phone(backend, table, &spec.raw_query).await?,
        LookupMode::Address => lookup_address(backend, table, &spec.raw_query).await?,
        LookupMode::Hash => lookup_hash(backend, table, &spec.raw_query).await?,
    };

    tracing::info!("{} lookup found {} rows", spec.mode, rows.len());
    Ok(rows)
}
