use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;

/// Final project structure ready for materialization.
///
/// This is the output of template rendering. It contains no business logic,
/// only data. Entry paths are relative to `root`.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<FsEntry>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn add_file(
        &mut self,
        path: impl Into<PathBuf>,
        contents: Vec<u8>,
        executable: bool,
        substituted: bool,
    ) {
        self.entries.push(FsEntry::File(FileToWrite {
            path: path.into(),
            contents,
            executable,
            substituted,
        }));
    }

    pub fn add_directory(&mut self, path: impl Into<PathBuf>) {
        self.entries
            .push(FsEntry::Directory(DirectoryToCreate { path: path.into() }));
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Project structure is empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();

            if path.is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed {
                    path: path.display().to_string(),
                });
            }
            if path
                .components()
                .any(|c| !matches!(c, Component::Normal(_)))
            {
                return Err(DomainError::PathEscapesRoot {
                    path: path.display().to_string(),
                });
            }
            if !seen.insert(path) {
                return Err(DomainError::DuplicatePath {
                    path: path.display().to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Total bytes across all files.
    pub fn total_bytes(&self) -> u64 {
        self.files().map(|f| f.size() as u64).sum()
    }
}

#[derive(Debug, Clone)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &Path {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: PathBuf,
    pub contents: Vec<u8>,
    pub executable: bool,
    /// At least one placeholder was replaced.
    pub substituted: bool,
}

impl FileToWrite {
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn size(&self) -> usize {
        self.contents.len()
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryToCreate {
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_structure_is_invalid() {
        assert!(ProjectStructure::new("/out").validate().is_err());
    }

    #[test]
    fn absolute_entry_is_invalid() {
        let mut s = ProjectStructure::new("/out");
        s.add_directory(if cfg!(windows) { "C:\\abs" } else { "/abs" });
        assert!(matches!(
            s.validate(),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn totals_and_counts() {
        let mut s = ProjectStructure::new("/out");
        s.add_directory("src");
        s.add_file("src/a.txt", b"abc".to_vec(), false, false);
        s.add_file("b.txt", Vec::new(), false, false);

        assert!(s.validate().is_ok());
        assert_eq!(s.entry_count(), 3);
        assert_eq!(s.directories().count(), 1);
        assert_eq!(s.total_bytes(), 3);
        assert!(s.files().any(FileToWrite::is_empty));
    }
}
