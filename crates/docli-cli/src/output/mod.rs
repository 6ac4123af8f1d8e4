//! Terminal output formatting and utilities.
//!
//! This module provides consistent output formatting across all commands,
//! honoring `--quiet` and `--dry-run`.

pub mod colors;
pub mod errors;

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    quiet: bool,
    dry_run: bool,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new(quiet: bool, dry_run: bool) -> Self {
        Self {
            quiet,
            dry_run,
        }
    }

    /// Whether files should be rendered without being written
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Print an info message unless quiet
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }
}
