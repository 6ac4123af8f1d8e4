//! Path utilities for CDN file lookups.
//!
//! File identifiers come from the data file and from several package
//! metadata fields with inconsistent leading-separator conventions. The CDN
//! listing is keyed by rooted, normalized paths, so every candidate goes
//! through `sanitize_file_path` before the lookup.

use crate::error::DocliError;
use thiserror::Error;

/// Rejections produced by `sanitize_file_path`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("file path is empty")]
    Empty,

    #[error("file path {0:?} resolves to root")]
    ResolvesToRoot(String),
}

impl PathError {
    /// Attach the package the path belongs to
    pub fn for_package(self, package: &str) -> DocliError {
        match self {
            PathError::Empty => DocliError::EmptyPath {
                package: package.to_string(),
            },
            PathError::ResolvesToRoot(path) => DocliError::PathResolvesToRoot {
                package: package.to_string(),
                path,
            },
        }
    }
}

/// Trim, root and lexically normalize a file path.
///
/// `.` segments and duplicate separators are dropped, `..` pops the previous
/// segment and never climbs above the root.
pub fn sanitize_file_path(file: &str) -> Result<String, PathError> {
    let trimmed = file.trim();
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }

    let normalized = normalize_rooted(trimmed);
    if normalized == "/" {
        return Err(PathError::ResolvesToRoot(file.to_string()));
    }

    Ok(normalized)
}

/// Normalize `path` as if it were prefixed with `/`
fn normalize_rooted(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {
                // Skip empty and current-directory segments
            },
            ".." => {
                segments.pop();
            },
            other => segments.push(other),
        }
    }

    format!("/{}", segments.join("/"))
}
