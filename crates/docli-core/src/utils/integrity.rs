//! Subresource integrity helpers.

/// Hash algorithm the CDN's flat file index reports digests in
pub const SRI_ALGORITHM: &str = "sha256";

/// Tag a CDN digest with its algorithm so it can be used as an SRI value
pub fn sri_integrity(digest: &str) -> String {
    format!("{}-{}", SRI_ALGORITHM, digest)
}
