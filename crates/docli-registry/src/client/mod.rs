//! HTTP client for the npm registry and the jsDelivr data API

use std::time::Duration;

use reqwest::{header, Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::{CdnFileListing, FlatListingResponse, PackageMetadata};
use crate::RegistryResult;
use docli_core::error::DocliError;

/// npm registry serving package metadata documents
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";
/// jsDelivr data API serving flat file indexes
pub const DEFAULT_CDN_DATA_URL: &str = "https://data.jsdelivr.com/v1/package/npm";
/// jsDelivr CDN serving the files themselves
pub const DEFAULT_CDN_ASSET_URL: &str = "https://cdn.jsdelivr.net/npm";
/// Per-request deadline enforced by the transport
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Base URLs of the two registries and the asset CDN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// npm registry base URL
    pub registry_url: String,
    /// jsDelivr data API base URL
    pub cdn_data_url: String,
    /// Base URL of the links put into snippets
    pub cdn_asset_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            cdn_data_url: DEFAULT_CDN_DATA_URL.to_string(),
            cdn_asset_url: DEFAULT_CDN_ASSET_URL.to_string(),
        }
    }
}

/// Read-only client for package metadata and CDN file listings.
///
/// Failed requests are reported, never retried.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Base URLs
    endpoints: Endpoints,
}

impl RegistryClient {
    /// Create client against the public npm registry and jsDelivr
    pub fn new() -> RegistryResult<Self> {
        Self::with_config(Endpoints::default(), DEFAULT_TIMEOUT)
    }

    /// Create client with custom endpoints and request timeout
    pub fn with_config(endpoints: Endpoints, timeout: Duration) -> RegistryResult<Self> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(8)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(timeout)
            .gzip(true)
            .user_agent(concat!("docli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DocliError::Transport {
                url: endpoints.registry_url.clone(),
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(Box::new(e)),
            })?;

        Ok(Self::with_client(client, endpoints))
    }

    /// Wrap a preconfigured HTTP client
    pub fn with_client(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Configured base URLs
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetch the full metadata document of a package
    pub async fn fetch_metadata(
        &self,
        package_name: &str,
        cancel: &CancellationToken,
    ) -> RegistryResult<PackageMetadata> {
        let url = format!(
            "{}/{}",
            self.endpoints.registry_url.trim_end_matches('/'),
            encode_package_name(package_name)
        );

        self.get_json(&url, package_name, cancel, |status| {
            DocliError::MetadataUnavailable {
                package: package_name.to_string(),
                status: status.as_u16(),
                reason: reason(status),
            }
        })
        .await
    }

    /// Fetch the flattened file index of one package version
    pub async fn fetch_listing(
        &self,
        package_name: &str,
        version: &str,
        cancel: &CancellationToken,
    ) -> RegistryResult<CdnFileListing> {
        let url = format!(
            "{}/{}@{}/flat",
            self.endpoints.cdn_data_url.trim_end_matches('/'),
            package_name,
            version
        );

        let response: FlatListingResponse = self
            .get_json(&url, package_name, cancel, |status| {
                DocliError::ListingUnavailable {
                    package: package_name.to_string(),
                    version: version.to_string(),
                    status: status.as_u16(),
                    reason: reason(status),
                }
            })
            .await?;

        Ok(CdnFileListing::from(response))
    }

    /// Link to a file on the asset CDN; `file` must be rooted
    pub fn asset_url(&self, package_name: &str, version: &str, file: &str) -> String {
        format!(
            "{}/{}@{}{}",
            self.endpoints.cdn_asset_url.trim_end_matches('/'),
            package_name,
            version,
            file
        )
    }

    /// GET a JSON document, racing the request against `cancel`
    async fn get_json<T, F>(
        &self,
        url: &str,
        package_name: &str,
        cancel: &CancellationToken,
        unavailable: F,
    ) -> RegistryResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce(StatusCode) -> DocliError,
    {
        let cancelled = || DocliError::Cancelled {
            package: package_name.to_string(),
        };

        if cancel.is_cancelled() {
            return Err(cancelled());
        }

        debug!(url, "GET");

        let request = async {
            let response = self
                .client
                .get(url)
                .header(header::ACCEPT, "application/json")
                .send()
                .await
                .map_err(|e| DocliError::transport(url, e.to_string(), e))?;

            let status = response.status();
            debug!(url, status = status.as_u16(), "response");

            if !status.is_success() {
                return Err(unavailable(status));
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| DocliError::transport(url, format!("Failed to read body: {}", e), e))?;

            serde_json::from_slice::<T>(&body).map_err(|e| DocliError::decode(url, e))
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(cancelled()),
            result = request => result,
        }
    }
}

/// Encode package name for URL (handle scoped packages)
fn encode_package_name(name: &str) -> String {
    if name.starts_with('@') {
        // Scoped package: @org/pkg -> @org%2fpkg
        name.replace('/', "%2f")
    } else {
        name.to_string()
    }
}

fn reason(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown").to_string()
}
