//! Error handling for the Stackseed CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use stackseed_core::error::{ErrorKind, StackseedError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Arguments that clap accepted but the command cannot use.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `stackseed-core` or the adapters.
    #[error("{0}")]
    Core(#[from] StackseedError),

    /// Writing to the terminal or reading a prompt failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render JSON output")]
    Json(#[from] serde_json::Error),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Wrap a configuration loading failure, keeping the full chain as the
    /// message.
    pub fn config(err: anyhow::Error) -> Self {
        CliError::ConfigError {
            message: format!("{err:#}"),
            source: Some(err.into()),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["Use --help for usage information".into()],

            Self::ConfigError { .. } => {
                let mut suggestions = vec![];
                if let Some(path) = crate::config::AppConfig::config_path() {
                    suggestions.push(format!("Check your config file at {}", path.display()));
                }
                suggestions.push(
                    "Valid keys: generate.overwrite (fail|force|prompt), generate.template_dir, \
                     output.no_color, output.format (auto|human|plain|json)"
                        .into(),
                );
                suggestions
            }

            Self::Core(core) => core.suggestions(),

            Self::IoError { .. } => vec![
                "Check that stdout/stderr are writable".into(),
                "Re-run without --interactive in non-interactive environments".into(),
            ],

            Self::Json(_) => vec![],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.kind() {
                ErrorKind::InvalidArgument | ErrorKind::InvalidTemplate => {
                    ErrorCategory::UserError
                }
                ErrorKind::TargetExists => ErrorCategory::Conflict,
                ErrorKind::IoFailure | ErrorKind::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } | Self::Json(_) => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Conflict      |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::Conflict => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "\u{2717}".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "\u{2192}".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {self}\n"));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::debug!("User error: {}", self),
            ErrorCategory::Conflict => tracing::debug!("Conflict: {}", self),
            ErrorCategory::Configuration => tracing::debug!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid arguments, names, paths or templates.
    UserError,
    /// The target directory is already populated.
    Conflict,
    Configuration,
    /// I/O or internal failure.
    Internal,
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use stackseed_core::{application::ApplicationError, domain::ProjectName};

    use super::*;

    fn target_exists() -> CliError {
        CliError::Core(
            ApplicationError::TargetExists {
                path: PathBuf::from("/tmp/demo"),
            }
            .into(),
        )
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn invalid_name_exits_with_two() {
        let err: CliError = StackseedError::from(ProjectName::parse("").unwrap_err()).into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn target_exists_exits_with_three() {
        assert_eq!(target_exists().exit_code(), 3);
    }

    #[test]
    fn io_failure_exits_with_one() {
        let err = CliError::Core(
            ApplicationError::IoFailure {
                path: PathBuf::from("/tmp/demo/main.py"),
                reason: "disk full".into(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("/tmp/demo/main.py"));
    }

    #[test]
    fn config_error_exits_with_four() {
        let err = CliError::config(anyhow::anyhow!("bad toml"));
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn terminal_io_error_is_internal() {
        let err = CliError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn target_exists_suggests_force() {
        let s = target_exists().format_plain(false);
        assert!(s.contains("Error: Target directory already exists"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--force"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_omits_hint() {
        let s = target_exists().format_plain(true);
        assert!(!s.contains("Use -v / --verbose"));
    }

    #[test]
    fn format_colored_contains_message() {
        let s = target_exists().format_colored(false);
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("/tmp/demo"));
    }
}
