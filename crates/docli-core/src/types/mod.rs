//! Core data types for CDN snippet generation.
//!
//! - `PackageSpec`: what a data file entry asks for
//! - `ResolvedPackage`: the version-pinned, integrity-checked asset reference

pub mod package;

// Re-export all public types
pub use package::{PackageSpec, ResolvedPackage};
