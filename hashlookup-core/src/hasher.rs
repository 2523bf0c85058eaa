//! SHA-256 digests in the format stored by the hash columns.

use sha2::{Digest, Sha256};

/// Length of a rendered digest in hex characters.
pub const DIGEST_HEX_LEN: usize = 64;

/// Hashes the exact bytes of `plaintext` and returns a lowercase hex digest.
///
/// No case folding or trimming is applied; callers normalize first.
///
/// # Example
/// ```rust
/// use hashlookup_core::hasher::digest;
///
/// assert_eq!(
///     digest("abc"),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
pub fn digest(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    hex::encode(hasher.finalize())
}
