//! Store key derivation for cache entries.

use sha2::{Digest, Sha256};

/// Hash a fetch URL into a fixed-width token usable inside store key names.
///
/// Raw URLs can be arbitrarily long and contain characters that some store
/// backends reject as key material, so entries are addressed by the SHA-256
/// of the URL instead.
pub fn url_token(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}

/// Store key holding the cached document for `url`.
pub fn content_key(url: &str) -> String {
    format!("pagesplice.cache.{}.content", url_token(url))
}

/// Store key holding the RFC 3339 fetch timestamp for `url`.
pub fn fetched_at_key(url: &str) -> String {
    format!("pagesplice.cache.{}.fetched-at", url_token(url))
}
