//! Payload hashing for `ETag` values.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of a payload.
///
/// Identical payloads always produce the same tag, so callers can compare
/// `ETag` attributes instead of fetching payloads.
#[must_use]
pub fn etag(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
