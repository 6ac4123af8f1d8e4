//! CDN data file parsing
//!
//! The data file lists the packages to generate include snippets for:
//!
//! ```yaml
//! - name: autocomplete_js
//!   pkg: "@algolia/autocomplete-js"
//! - name: instantsearch_css
//!   pkg: instantsearch.css
//!   file: themes/satellite-min.css
//! ```

use std::collections::HashSet;

use camino::Utf8Path;

use crate::ConfigResult;
use docli_core::error::DocliError;
use docli_core::types::PackageSpec;

/// Serialization format of a data file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Yaml,
    Json,
}

impl DataFormat {
    /// Pick the format from the file extension; anything but `.json` is YAML
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension().map(|ext| ext.to_ascii_lowercase()) {
            Some(ext) if ext == "json" => DataFormat::Json,
            _ => DataFormat::Yaml,
        }
    }
}

/// Parse data file content into package specs
pub fn parse_data_file(
    content: &str,
    format: DataFormat,
    source: &str,
) -> ConfigResult<Vec<PackageSpec>> {
    let data_error = |message: String| DocliError::DataFile {
        path: source.to_string(),
        message,
    };

    if content.trim().is_empty() {
        return Err(data_error("data file is empty".to_string()));
    }

    let specs: Vec<PackageSpec> = match format {
        DataFormat::Yaml => serde_yaml::from_str(content).map_err(|e| data_error(e.to_string()))?,
        DataFormat::Json => serde_json::from_str(content).map_err(|e| data_error(e.to_string()))?,
    };

    let mut seen = HashSet::new();
    for (index, spec) in specs.iter().enumerate() {
        if spec.name.trim().is_empty() {
            return Err(data_error(format!("entry {} has an empty name", index + 1)));
        }
        if !seen.insert(spec.name.as_str()) {
            return Err(data_error(format!("duplicate package name '{}'", spec.name)));
        }
    }

    Ok(specs)
}

/// Read and parse a data file
pub async fn load_data_file(path: &Utf8Path) -> ConfigResult<Vec<PackageSpec>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DocliError::io(format!("Failed to read data file {}", path), e))?;

    parse_data_file(&content, DataFormat::from_path(path), path.as_str())
}
