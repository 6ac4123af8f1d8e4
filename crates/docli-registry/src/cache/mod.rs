//! In-memory cache for package metadata and CDN file listings
//!
//! Entries live as long as the cache. Upstream registries never change what
//! they publish for a version, so nothing expires.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::api::{CdnFileListing, PackageMetadata};

#[derive(Debug, Default)]
struct CacheMaps {
    /// Keyed by package name
    metadata: HashMap<String, Arc<PackageMetadata>>,
    /// Keyed by `package@version`
    listings: HashMap<String, Arc<CdnFileListing>>,
}

/// Metadata and listing maps behind a single lock.
///
/// The lock is only held for one map operation; callers must not keep it
/// across a network call.
#[derive(Debug, Default)]
pub struct ResolverCache {
    maps: Mutex<CacheMaps>,
}

impl ResolverCache {
    /// Create new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of a file listing
    pub fn listing_key(package_name: &str, version: &str) -> String {
        format!("{}@{}", package_name, version)
    }

    /// Get cached metadata of a package
    pub fn metadata(&self, package_name: &str) -> Option<Arc<PackageMetadata>> {
        self.maps.lock().metadata.get(package_name).cloned()
    }

    /// Store metadata, replacing any previous entry
    pub fn insert_metadata(
        &self,
        package_name: &str,
        metadata: PackageMetadata,
    ) -> Arc<PackageMetadata> {
        let metadata = Arc::new(metadata);
        self.maps
            .lock()
            .metadata
            .insert(package_name.to_string(), Arc::clone(&metadata));
        metadata
    }

    /// Get cached file listing of a package version
    pub fn listing(&self, package_name: &str, version: &str) -> Option<Arc<CdnFileListing>> {
        self.maps
            .lock()
            .listings
            .get(&Self::listing_key(package_name, version))
            .cloned()
    }

    /// Store a file listing, replacing any previous entry
    pub fn insert_listing(
        &self,
        package_name: &str,
        version: &str,
        listing: CdnFileListing,
    ) -> Arc<CdnFileListing> {
        let listing = Arc::new(listing);
        self.maps
            .lock()
            .listings
            .insert(Self::listing_key(package_name, version), Arc::clone(&listing));
        listing
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let maps = self.maps.lock();
        CacheStats {
            metadata_entries: maps.metadata.len(),
            listing_entries: maps.listings.len(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached metadata documents
    pub metadata_entries: usize,
    /// Number of cached file listings
    pub listing_entries: usize,
}
