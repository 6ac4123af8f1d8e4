//! Error message formatting with actionable suggestions.

use docli_core::error::DocliError;

use super::colors::ColorSupport;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    /// Create a new error formatter
    pub fn new() -> Self {
        Self {
            colors: ColorSupport::detect(),
        }
    }

    /// Format an error with its suggestion and cause chain
    pub fn format_error(&self, error: &anyhow::Error) -> String {
        let mut output = String::new();

        output.push_str(&self.colors.red("error"));
        output.push_str(": ");
        output.push_str(&error.to_string());
        output.push('\n');

        let suggestion = error
            .chain()
            .find_map(|cause| cause.downcast_ref::<DocliError>())
            .and_then(DocliError::suggestion);
        if let Some(suggestion) = suggestion {
            output.push('\n');
            output.push_str(&self.colors.dim("help"));
            output.push_str(": ");
            output.push_str(suggestion);
            output.push('\n');
        }

        for cause in error.chain().skip(1) {
            output.push('\n');
            output.push_str(&self.colors.dim("caused by"));
            output.push_str(": ");
            output.push_str(&cause.to_string());
        }

        output
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn plain() -> ErrorFormatter {
        ErrorFormatter {
            colors: ColorSupport::disabled(),
        }
    }

    #[test]
    fn test_format_with_context_and_suggestion() {
        let result: Result<(), DocliError> = Err(DocliError::NoDefaultFile {
            package: "left-pad".to_string(),
            version: "1.3.0".to_string(),
        });
        let error = result.context("resolve package left_pad").unwrap_err();

        let formatted = plain().format_error(&error);

        assert!(formatted.starts_with("error: resolve package left_pad\n"));
        assert!(formatted.contains("help: Add a `file` entry"));
        assert!(formatted.contains("caused by: "));
        assert!(formatted.contains("left-pad"));
    }

    #[test]
    fn test_format_plain_error() {
        let error = anyhow::anyhow!("data file \"cdn.yml\" not found");

        let formatted = plain().format_error(&error);

        assert_eq!(formatted, "error: data file \"cdn.yml\" not found\n");
    }
}
