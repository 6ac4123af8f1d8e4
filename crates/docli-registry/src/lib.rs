//! npm registry and jsDelivr data API client for docli
//!
//! This crate fetches package metadata from the npm registry and flattened
//! file listings from the jsDelivr data API, and provides the in-memory cache
//! the resolver keeps them in.

pub mod api;
pub mod cache;
pub mod client;

// Re-export main types
pub use api::{CdnFileListing, FlatFile, FlatListingResponse, PackageMetadata, VersionAssets};
pub use cache::{CacheStats, ResolverCache};
pub use client::{
    Endpoints, RegistryClient, DEFAULT_CDN_ASSET_URL, DEFAULT_CDN_DATA_URL, DEFAULT_REGISTRY_URL,
    DEFAULT_TIMEOUT,
};

use docli_core::error::DocliError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, DocliError>;
