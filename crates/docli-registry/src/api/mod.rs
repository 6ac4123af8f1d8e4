//! npm registry and jsDelivr data API response types

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Package metadata document from the npm registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PackageMetadata {
    /// Package name
    #[serde(default)]
    pub name: Option<String>,
    /// Named version pointers such as `latest`
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: Option<HashMap<String, String>>,
    /// Per-version entry points
    #[serde(default)]
    pub versions: HashMap<String, VersionAssets>,
}

/// Candidate entry points of one published version.
///
/// Only string values are kept; the registry carries whatever publishers put
/// in `package.json`, so arrays or objects in these fields count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct VersionAssets {
    /// CDN-optimized bundle for jsDelivr
    #[serde(default, deserialize_with = "string_field")]
    pub jsdelivr: Option<String>,
    /// CDN bundle for unpkg
    #[serde(default, deserialize_with = "string_field")]
    pub unpkg: Option<String>,
    /// ES module entry
    #[serde(default, deserialize_with = "string_field")]
    pub module: Option<String>,
    /// Generic main entry
    #[serde(default, deserialize_with = "string_field")]
    pub main: Option<String>,
}

/// One entry of the jsDelivr flat file index
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FlatFile {
    /// Rooted file path, e.g. `/dist/index.js`
    pub name: String,
    /// Base64 sha256 digest
    pub hash: String,
}

/// Flat file index response from the jsDelivr data API
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FlatListingResponse {
    #[serde(default)]
    pub files: Vec<FlatFile>,
}

/// File path to content hash mapping for one package@version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CdnFileListing {
    files: HashMap<String, String>,
}

impl PackageMetadata {
    /// Version the `latest` dist-tag points at, ignoring empty values
    pub fn latest_version(&self) -> Option<&str> {
        self.dist_tags
            .as_ref()?
            .get("latest")
            .map(String::as_str)
            .filter(|version| !version.is_empty())
    }

    /// Entry points of a specific version
    pub fn version_assets(&self, version: &str) -> Option<&VersionAssets> {
        self.versions.get(version)
    }
}

impl CdnFileListing {
    /// Hash of a rooted file path
    pub fn hash_of(&self, file: &str) -> Option<&str> {
        self.files.get(file).map(String::as_str)
    }

    /// Check if the listing contains a file
    pub fn contains(&self, file: &str) -> bool {
        self.files.contains_key(file)
    }

    /// Number of files in the listing
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the listing has no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl From<FlatListingResponse> for CdnFileListing {
    fn from(response: FlatListingResponse) -> Self {
        Self {
            files: response
                .files
                .into_iter()
                .map(|file| (file.name, file.hash))
                .collect(),
        }
    }
}

impl FromIterator<(String, String)> for CdnFileListing {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

fn string_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}
