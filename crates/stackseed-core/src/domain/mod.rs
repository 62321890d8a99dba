// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stackseed.
//!
//! Pure logic with no I/O: validated inputs, the template tree, placeholder
//! substitution, and the rendered project plan. Reading templates and writing
//! files happen behind the ports in `crate::application::ports`.
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network, or process calls
//! - **Immutable entities**: template trees are never mutated once built

pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

pub use entities::{
    common::RelativePath,
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
    render::{PROJECT_NAME_TOKEN, RenderContext},
    template::{TemplateEntry, TemplateFile, TemplateTree},
};

pub use error::DomainError;
pub use value_objects::{ProjectName, TargetPath};

pub use validation::DomainValidator;
