pub mod common;
pub mod project_structure;
pub mod render;
pub mod template;

pub use common::RelativePath;
pub use project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure};
pub use render::RenderContext;
pub use template::{TemplateEntry, TemplateFile, TemplateTree};
