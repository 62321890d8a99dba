//! Stackseed Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stackseed
//! project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          stackseed-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (GenerateService)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (TemplateSource, Filesystem)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stackseed-adapters (Infrastructure)  │
//! │ (EmbeddedTemplate, LocalFilesystem, ..) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectName, TemplateTree, RenderCtx)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stackseed_core::prelude::*;
//!
//! let request = GenerateRequest::new(
//!     TargetPath::parse("/tmp/demo")?,
//!     ProjectName::parse("Demo")?,
//! );
//!
//! // Adapters come from `stackseed-adapters`.
//! let service = GenerateService::new(source, filesystem);
//! let report = service.generate(&request)?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

pub mod prelude {
    pub use crate::application::{
        GenerateReport, GenerateRequest, GenerateService, OverwritePolicy,
        ports::{Filesystem, TargetState, TemplateSource},
    };
    pub use crate::domain::{
        ProjectName, ProjectStructure, RenderContext, TargetPath, TemplateEntry, TemplateTree,
    };
    pub use crate::error::{ErrorKind, StackseedError, StackseedResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
