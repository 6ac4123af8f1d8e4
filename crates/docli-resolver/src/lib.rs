//! Package-to-CDN-asset resolution for docli
//!
//! Turns a `PackageSpec` into a version-pinned, integrity-checked
//! `ResolvedPackage` using the npm registry and the jsDelivr data API.
//! Registry responses are cached for the lifetime of the resolver.

pub mod fallback;
pub mod resolve;

// Re-export main types
pub use fallback::{default_file, DEFAULT_FILE_FIELDS};
pub use resolve::Resolver;
pub use tokio_util::sync::CancellationToken;

use docli_core::error::DocliError;

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, DocliError>;
