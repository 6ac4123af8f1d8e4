//! Package-to-CDN-asset resolver
//!
//! A resolution is: metadata (cached per package) -> latest version ->
//! explicit or default file -> sanitized path -> CDN listing (cached per
//! package@version) -> integrity and link. Any failing step aborts the
//! resolution; nothing is retried.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use docli_core::error::DocliError;
use docli_core::types::{PackageSpec, ResolvedPackage};
use docli_core::utils::{sanitize_file_path, sri_integrity};
use docli_registry::{CdnFileListing, PackageMetadata, RegistryClient, ResolverCache};

use crate::fallback::default_file;
use crate::ResolverResult;

/// Resolves package specs into CDN asset references.
///
/// Shareable across tasks; concurrent resolutions only contend on the cache
/// lock, never on each other's network calls.
#[derive(Debug)]
pub struct Resolver {
    /// Registry client for metadata and listings
    registry_client: Arc<RegistryClient>,
    /// Responses fetched so far
    cache: Arc<ResolverCache>,
}

impl Resolver {
    /// Create resolver with a fresh cache
    pub fn from_client(registry_client: RegistryClient) -> Self {
        Self {
            registry_client: Arc::new(registry_client),
            cache: Arc::new(ResolverCache::new()),
        }
    }

    /// Cache backing this resolver
    pub fn cache(&self) -> &ResolverCache {
        &self.cache
    }

    /// Resolve a spec into a version-pinned, integrity-checked asset
    pub async fn resolve(
        &self,
        spec: &PackageSpec,
        cancel: &CancellationToken,
    ) -> ResolverResult<ResolvedPackage> {
        let package_name = spec.registry_name();

        let metadata = self.metadata(package_name, cancel).await?;

        let version = metadata
            .latest_version()
            .ok_or_else(|| DocliError::NoLatestVersion {
                package: package_name.to_string(),
            })?
            .to_string();

        let file = match spec.explicit_file() {
            Some(file) => file,
            None => Self::default_file(&metadata, package_name, &version)?,
        };
        let file = sanitize_file_path(file).map_err(|e| e.for_package(package_name))?;

        let listing = self.listing(package_name, &version, cancel).await?;

        let hash = listing
            .hash_of(&file)
            .ok_or_else(|| DocliError::FileNotOnCdn {
                file: file.clone(),
                name: spec.name.clone(),
                package: package_name.to_string(),
                version: version.clone(),
            })?;

        let resolved = ResolvedPackage {
            name: spec.name.clone(),
            package_name: package_name.to_string(),
            integrity: sri_integrity(hash),
            src: self.registry_client.asset_url(package_name, &version, &file),
            file,
            version,
        };

        info!(
            name = %resolved.name,
            package = %resolved.package_name,
            version = %resolved.version,
            file = %resolved.file,
            "resolved package"
        );

        Ok(resolved)
    }

    /// Pick the default file of a version through the fallback chain
    fn default_file<'a>(
        metadata: &'a PackageMetadata,
        package_name: &str,
        version: &str,
    ) -> ResolverResult<&'a str> {
        let assets = metadata
            .version_assets(version)
            .ok_or_else(|| DocliError::VersionAssetsMissing {
                package: package_name.to_string(),
                version: version.to_string(),
            })?;

        let (field, file) = default_file(assets).ok_or_else(|| DocliError::NoDefaultFile {
            package: package_name.to_string(),
            version: version.to_string(),
        })?;

        debug!(package = package_name, version, field, file, "using default file");
        Ok(file)
    }

    /// Cached metadata of a package, fetched on first use.
    ///
    /// The cache lock is released during the fetch, so two concurrent first
    /// lookups of one package may both hit the registry; the later store wins.
    async fn metadata(
        &self,
        package_name: &str,
        cancel: &CancellationToken,
    ) -> ResolverResult<Arc<PackageMetadata>> {
        if let Some(metadata) = self.cache.metadata(package_name) {
            debug!(package = package_name, "metadata cache hit");
            return Ok(metadata);
        }

        debug!(package = package_name, "metadata cache miss");
        let metadata = self
            .registry_client
            .fetch_metadata(package_name, cancel)
            .await?;

        Ok(self.cache.insert_metadata(package_name, metadata))
    }

    /// Cached file listing of a package version, fetched on first use
    async fn listing(
        &self,
        package_name: &str,
        version: &str,
        cancel: &CancellationToken,
    ) -> ResolverResult<Arc<CdnFileListing>> {
        if let Some(listing) = self.cache.listing(package_name, version) {
            debug!(package = package_name, version, "listing cache hit");
            return Ok(listing);
        }

        debug!(package = package_name, version, "listing cache miss");
        let listing = self
            .registry_client
            .fetch_listing(package_name, version, cancel)
            .await?;

        Ok(self.cache.insert_listing(package_name, version, listing))
    }
}
