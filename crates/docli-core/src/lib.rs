//! # docli-core
//!
//! Core types and utilities shared across all docli crates.
//!
//! This crate provides:
//! - `PackageSpec` and `ResolvedPackage`, the input and output of CDN resolution
//! - `DocliError` enum for unified error handling
//! - Path sanitizing and integrity string helpers
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (PackageSpec, ResolvedPackage)
//! - `error`: Error types and result aliases
//! - `utils`: Utility functions and helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{DocliError, DocliResult};
pub use types::{PackageSpec, ResolvedPackage};
