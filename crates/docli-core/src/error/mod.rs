//! Error types and result aliases for docli operations.
//!
//! Provides a unified error type that covers all possible error conditions
//! across the docli crates with actionable error messages.

use thiserror::Error;

/// Unified error type for all docli operations
#[derive(Error, Debug)]
pub enum DocliError {
    // Transport errors
    #[error("Request to {url} failed: {message}")]
    Transport {
        url: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Request for package {package} was cancelled")]
    Cancelled { package: String },

    // Registry errors
    #[error("Can't get latest version of package {package} from npm: {status} {reason}")]
    MetadataUnavailable {
        package: String,
        status: u16,
        reason: String,
    },

    #[error("Can't get CDN file listing for {package}@{version}: {status} {reason}")]
    ListingUnavailable {
        package: String,
        version: String,
        status: u16,
        reason: String,
    },

    #[error("Failed to decode response from {url}: {message}")]
    Decode {
        url: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Resolution errors
    #[error("No latest dist-tag found for package {package}")]
    NoLatestVersion { package: String },

    #[error("No pkg information found for {package} version {version}")]
    VersionAssetsMissing { package: String, version: String },

    #[error(
        "No default file import found for {package} version {version}. Add it explicitly to the CDN data file"
    )]
    NoDefaultFile { package: String, version: String },

    #[error("File path for package {package} is empty")]
    EmptyPath { package: String },

    #[error("File path {path:?} for package {package} resolves to root")]
    PathResolvesToRoot { package: String, path: String },

    #[error("File {file} for snippet {name} not found on CDN ({package}@{version})")]
    FileNotOnCdn {
        file: String,
        name: String,
        package: String,
        version: String,
    },

    // Config errors
    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    #[error("Failed to parse data file {path}: {message}")]
    DataFile { path: String, message: String },

    #[error("Template error for {name}: {message}")]
    Template { name: String, message: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for docli operations
pub type DocliResult<T> = Result<T, DocliError>;

impl DocliError {
    /// Create a transport error from any error type
    pub fn transport<E>(url: &str, message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            url: url.to_string(),
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create a decode error from any error type
    pub fn decode<E>(url: &str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            url: url.to_string(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Whether the network call itself could not be completed
    pub fn is_transport(&self) -> bool {
        matches!(self, DocliError::Transport { .. } | DocliError::Cancelled { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            DocliError::Transport { .. } => Some("Check your internet connection and try again"),
            DocliError::MetadataUnavailable { .. } => {
                Some("Check the package name spelling (use `pkg` if it differs from `name`)")
            },
            DocliError::NoDefaultFile { .. } | DocliError::VersionAssetsMissing { .. } => {
                Some("Add a `file` entry for this package to the CDN data file")
            },
            DocliError::FileNotOnCdn { .. } => {
                Some("Check the `file` entry against the files published for this version")
            },
            DocliError::EmptyPath { .. } | DocliError::PathResolvesToRoot { .. } => {
                Some("Point `file` at a file inside the package, e.g. `dist/index.js`")
            },
            DocliError::Template { .. } => {
                Some("Provide exactly one template named after the package, e.g. `<name>.mdx.tmpl`")
            },
            _ => None,
        }
    }
}
