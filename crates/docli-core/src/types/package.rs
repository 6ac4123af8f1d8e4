//! Package spec and resolved package types.
//!
//! A `PackageSpec` comes from one entry of the CDN data file. The resolver
//! turns it into a `ResolvedPackage` that templates interpolate.

use serde::{Deserialize, Serialize};

/// Package information from the CDN data file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSpec {
    /// Label that identifies snippets and templates
    pub name: String,
    /// File to include; the package's default import is used when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Registry name when it differs from `name`
    #[serde(default, rename = "pkg", skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
}

/// A fully populated package ready for templating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPackage {
    pub name: String,
    pub package_name: String,
    /// Root-prefixed path of the served file
    pub file: String,
    /// Latest version of the package
    pub version: String,
    /// Subresource integrity value of the file
    pub integrity: String,
    /// CDN include link
    pub src: String,
}

impl PackageSpec {
    /// Create a spec that uses the package's default file
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: None,
            package_name: None,
        }
    }

    /// Serve an explicit file instead of the default import
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Look the package up under a different registry name
    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    /// Registry name, falling back to `name` when unset or empty
    pub fn registry_name(&self) -> &str {
        match self.package_name.as_deref() {
            Some(package_name) if !package_name.is_empty() => package_name,
            _ => &self.name,
        }
    }

    /// Explicitly requested file, ignoring empty values
    pub fn explicit_file(&self) -> Option<&str> {
        self.file.as_deref().filter(|file| !file.is_empty())
    }
}
