//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stackseed-adapters` crate provides implementations.

use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::domain::TemplateTree;
use crate::error::StackseedResult;

/// What currently sits at the target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Missing,
    EmptyDirectory,
    NonEmptyDirectory,
    /// A regular file, or anything else that cannot hold a project.
    NotADirectory,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stackseed_adapters::LocalFilesystem` (production)
/// - `stackseed_adapters::MemoryFilesystem` (testing)
///
/// Paths passed in are already joined onto the target root.
#[cfg_attr(test, automock)]
pub trait Filesystem: Send + Sync {
    /// Classify the target path.
    fn inspect(&self, path: &Path) -> StackseedResult<TargetState>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StackseedResult<()>;

    /// Write bytes to a file, replacing it if it exists.
    fn write_file(&self, path: &Path, contents: &[u8]) -> StackseedResult<()>;

    /// Add the executable bit (no-op where the platform has none).
    fn set_executable(&self, path: &Path) -> StackseedResult<()>;

    /// `true` if a regular file exists at `path`.
    fn is_file(&self, path: &Path) -> bool;
}

/// Port for obtaining the template tree.
///
/// Implemented by:
/// - `stackseed_adapters::EmbeddedTemplate` (bundled with the binary)
/// - `stackseed_adapters::DirectoryTemplate` (a tree on disk)
pub trait TemplateSource: Send + Sync {
    /// Human-readable name for logs and reports.
    fn name(&self) -> &str;

    /// Load the full tree.
    fn load(&self) -> StackseedResult<TemplateTree>;
}
