//! Application layer errors.
//!
//! These errors represent failures while touching the target, not validation
//! of inputs. Validation errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorKind;

/// Errors that occur during generation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Destination already populated and overwriting was not allowed.
    #[error("Target directory already exists and is not empty: {path}")]
    TargetExists { path: PathBuf },

    /// Destination exists but is a file (or something else that is not a directory).
    #[error("Target path exists and is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Read or write failure.
    #[error("I/O failure at {path}: {reason}")]
    IoFailure { path: PathBuf, reason: String },

    /// Adapter state lock poisoned.
    #[error("Adapter state is unavailable (lock poisoned)")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TargetExists { path } => vec![
                format!("Directory '{}' already contains files", path.display()),
                "Use --force to write over matching files".into(),
                "Use --interactive to be asked before overwriting".into(),
                "Or choose a different target path".into(),
            ],
            Self::NotADirectory { path } => vec![
                format!("'{}' is a file", path.display()),
                "Choose a path that is a directory or does not exist yet".into(),
            ],
            Self::IoFailure { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Files written before the failure were left in place".into(),
            ],
            Self::LockPoisoned => vec!["Try again".into()],
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TargetExists { .. } => ErrorKind::TargetExists,
            Self::NotADirectory { .. } => ErrorKind::InvalidArgument,
            Self::IoFailure { .. } => ErrorKind::IoFailure,
            Self::LockPoisoned => ErrorKind::Internal,
        }
    }
}
