//! The template tree: the read-only source of every generated project.
//!
//! ```text
//! TemplateTree ──render(ctx, root)──▶ ProjectStructure
//!   ├── Directory(path)                 ├── Directory(rendered path)
//!   └── File(path, bytes, exec)         └── File(rendered path, rendered bytes, exec)
//! ```
//!
//! Rendering is pure: no filesystem access happens here.

use std::collections::HashSet;
use std::path::Path;

use crate::domain::{
    entities::{common::RelativePath, project_structure::ProjectStructure, render::RenderContext},
    error::DomainError,
};

/// One file in a template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: RelativePath,
    pub contents: Vec<u8>,
    pub executable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateEntry {
    Directory(RelativePath),
    File(TemplateFile),
}

impl TemplateEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::Directory(path) => path,
            Self::File(file) => &file.path,
        }
    }
}

/// Immutable set of directories and files used as the copy source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateTree {
    name: String,
    entries: Vec<TemplateEntry>,
}

impl TemplateTree {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: TemplateEntry) {
        self.entries.push(entry);
    }

    pub fn with_directory(mut self, path: RelativePath) -> Self {
        self.push(TemplateEntry::Directory(path));
        self
    }

    pub fn with_file(self, path: RelativePath, contents: Vec<u8>) -> Self {
        self.with_entry_file(path, contents, false)
    }

    pub fn with_executable(self, path: RelativePath, contents: Vec<u8>) -> Self {
        self.with_entry_file(path, contents, true)
    }

    fn with_entry_file(mut self, path: RelativePath, contents: Vec<u8>, executable: bool) -> Self {
        self.push(TemplateEntry::File(TemplateFile {
            path,
            contents,
            executable,
        }));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &TemplateFile> {
        self.entries.iter().filter_map(|e| match e {
            TemplateEntry::File(f) => Some(f),
            TemplateEntry::Directory(_) => None,
        })
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    pub fn directory_count(&self) -> usize {
        self.entries.len() - self.file_count()
    }

    /// A tree must contain at least one file and no path twice.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.file_count() == 0 {
            return Err(DomainError::EmptyTemplate {
                template: self.name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.path()) {
                return Err(DomainError::DuplicatePath {
                    path: entry.path().to_string(),
                });
            }
        }

        Ok(())
    }

    /// Render every entry into a plan rooted at `root`.
    ///
    /// Entry order is preserved. File contents without known placeholders are
    /// copied byte-for-byte.
    pub fn render(
        &self,
        ctx: &RenderContext,
        root: &Path,
    ) -> Result<ProjectStructure, DomainError> {
        let mut structure = ProjectStructure::new(root);

        for entry in &self.entries {
            match entry {
                TemplateEntry::Directory(path) => {
                    structure.add_directory(ctx.render_path(path)?.into_path_buf());
                }
                TemplateEntry::File(file) => {
                    let rendered = ctx.render_bytes(&file.contents);
                    let substituted = matches!(rendered, std::borrow::Cow::Owned(_));
                    structure.add_file(
                        ctx.render_path(&file.path)?.into_path_buf(),
                        rendered.into_owned(),
                        file.executable,
                        substituted,
                    );
                }
            }
        }

        Ok(structure)
    }
}
