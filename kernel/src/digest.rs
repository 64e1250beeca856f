//! Catalog fingerprints: SHA-256 over a domain tag and a payload.

use sha2::{Digest, Sha256};

/// Domain tag for hint catalog digests. Null-terminated.
pub const DOMAIN_HINT_CATALOG: &[u8] = b"TANUKI::HINT_CATALOG::V1\0";

/// A `sha256:<hex>` fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogDigest(String);

impl std::fmt::Display for CatalogDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute `sha256(domain || data)`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> CatalogDigest {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    CatalogDigest(format!("sha256:{}", hex::encode(hasher.finalize())))
}
