//! docli.toml parsing

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::ConfigResult;
use docli_core::error::DocliError;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "docli.toml";

/// Complete docli.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocliToml {
    /// Endpoint and transport settings for the CDN resolver
    #[serde(default)]
    pub resolver: ResolverSection,
}

/// `[resolver]` section; every field falls back to the built-in default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ResolverSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn_data_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn_asset_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Parse TOML string to DocliToml configuration
pub fn parse_docli_toml(content: &str) -> ConfigResult<DocliToml> {
    toml::from_str(content).map_err(|e| DocliError::ConfigValidation {
        field: CONFIG_FILE_NAME.to_string(),
        reason: format!("TOML parsing error: {}", e),
    })
}

/// Load docli.toml from file
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<DocliToml> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DocliError::io(format!("Failed to read {}", path), e))?;

    parse_docli_toml(&content).map_err(|e| match e {
        DocliError::ConfigValidation { field, reason } => DocliError::ConfigValidation {
            field,
            reason: format!("In file {}: {}", path, reason),
        },
        other => other,
    })
}
