//! Application layer for Stackseed.
//!
//! This layer contains:
//! - **Services**: use case orchestration (`GenerateService`)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Validation and substitution live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{GenerateReport, GenerateRequest, GenerateService, OverwritePolicy};

pub use ports::{Filesystem, TargetState, TemplateSource};

pub use error::ApplicationError;
