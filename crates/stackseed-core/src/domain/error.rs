// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorKind;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Classifiable (see [`ErrorKind`])
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Argument validation
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid target path '{path}': {reason}")]
    InvalidTargetPath { path: String, reason: String },

    // ========================================================================
    // Template shape
    // ========================================================================
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template '{template}' has no content")]
    EmptyTemplate { template: String },

    #[error("Duplicate path in template: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the project root: {path}")]
    PathEscapesRoot { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Project names need a letter or digit and cannot contain '/', '\\' or quotes"
                    .into(),
                "Examples: Demo, my-app, R&D Portal".into(),
            ],
            Self::InvalidTargetPath { .. } => vec![
                "Pass a directory path usable on this system".into(),
                "Example: stackseed ./demo Demo".into(),
            ],
            Self::EmptyTemplate { template } => vec![
                format!("Template '{template}' contains no files"),
                "Point --template-dir at a populated directory".into(),
            ],
            Self::InvalidTemplate(_)
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. } => vec![
                "The template tree is malformed".into(),
                "Fix the template directory or use the bundled template".into(),
            ],
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidProjectName { .. } | Self::InvalidTargetPath { .. } => {
                ErrorKind::InvalidArgument
            }
            _ => ErrorKind::InvalidTemplate,
        }
    }
}
