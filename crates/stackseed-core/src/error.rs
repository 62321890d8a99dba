//! Unified error handling for Stackseed Core.
//!
//! Wraps domain and application errors into one type and classifies every
//! failure into one of the generator's error kinds.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Stackseed Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StackseedError {
    /// Errors from the domain layer (validation, template shape).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (target state, I/O).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl StackseedError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec!["This appears to be a bug in Stackseed".into()],
        }
    }

    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(e) => e.kind(),
            Self::Application(e) => e.kind(),
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}

/// Error kinds surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed target path or project name.
    InvalidArgument,
    /// Destination already populated.
    TargetExists,
    /// Read/write failure while generating.
    IoFailure,
    /// The template tree itself is unusable.
    InvalidTemplate,
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InvalidArgument => "invalid-argument",
            Self::TargetExists => "target-exists",
            Self::IoFailure => "io-failure",
            Self::InvalidTemplate => "invalid-template",
            Self::Internal => "internal",
        };
        f.write_str(s)
    }
}

/// Convenient result type alias.
pub type StackseedResult<T> = Result<T, StackseedError>;
