//! Utility functions and helpers.
//!
//! Common functionality used across multiple docli crates.

pub mod integrity;
pub mod path;

// Re-export commonly used utilities
pub use integrity::{sri_integrity, SRI_ALGORITHM};
pub use path::{sanitize_file_path, PathError};
