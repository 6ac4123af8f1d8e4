//! Configuration parsing for docli
//!
//! This crate reads the CDN data file (the list of packages to generate
//! snippets for) and layers resolver settings from `docli.toml`, the
//! environment and command line flags.

pub mod data;
pub mod merge;
pub mod settings;

// Re-export main types
pub use data::{load_data_file, parse_data_file, DataFormat};
pub use merge::{ConfigLayering, ConfigLoader, ConfigSource, ResolverSettings};
pub use settings::{DocliToml, ResolverSection};

use docli_core::error::DocliError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, DocliError>;
