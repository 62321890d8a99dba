//! Infrastructure adapters for Stackseed.
//!
//! This crate implements the ports defined in `stackseed-core::application::ports`.
//! It contains all I/O and the template tree bundled into the binary.

pub mod filesystem;
pub mod template_source;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use template_source::{DirectoryTemplate, EmbeddedTemplate};
