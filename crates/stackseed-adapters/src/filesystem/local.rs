//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use stackseed_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, TargetState},
    },
    error::{StackseedError, StackseedResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn inspect(&self, path: &Path) -> StackseedResult<TargetState> {
        let metadata = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(TargetState::Missing),
            Err(e) => return Err(map_io_error(path, e, "inspect target")),
        };

        if !metadata.is_dir() {
            return Ok(TargetState::NotADirectory);
        }

        let mut entries =
            std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;
        Ok(if entries.next().is_some() {
            TargetState::NonEmptyDirectory
        } else {
            TargetState::EmptyDirectory
        })
    }

    fn create_dir_all(&self, path: &Path) -> StackseedResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> StackseedResult<()> {
        std::fs::write(path, contents).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn set_executable(&self, path: &Path) -> StackseedResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata =
                std::fs::metadata(path).map_err(|e| map_io_error(path, e, "get metadata"))?;
            let mut perms = metadata.permissions();
            perms.set_mode(perms.mode() | 0o111);
            std::fs::set_permissions(path, perms)
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(not(unix))]
        {
            let _ = path;
        }
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StackseedError {
    ApplicationError::IoFailure {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn inspect_classifies_target_states() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();

        assert_eq!(
            fs.inspect(&temp.path().join("missing")).unwrap(),
            TargetState::Missing
        );
        assert_eq!(fs.inspect(temp.path()).unwrap(), TargetState::EmptyDirectory);

        std::fs::write(temp.path().join("file.txt"), "x").unwrap();
        assert_eq!(
            fs.inspect(temp.path()).unwrap(),
            TargetState::NonEmptyDirectory
        );
        assert_eq!(
            fs.inspect(&temp.path().join("file.txt")).unwrap(),
            TargetState::NotADirectory
        );
    }

    #[test]
    fn write_file_writes_raw_bytes() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = temp.path().join("blob.bin");

        fs.write_file(&path, &[0, 159, 146, 150]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![0, 159, 146, 150]);
        assert!(fs.is_file(&path));
    }

    #[test]
    fn write_without_parent_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("no/such/dir/file.txt");

        let err = LocalFilesystem::new().write_file(&path, b"x").unwrap_err();
        assert!(err.to_string().contains("file.txt"));
    }

    #[test]
    #[cfg(unix)]
    fn set_executable_adds_mode_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = temp.path().join("run.sh");
        fs.write_file(&path, b"#!/bin/sh\n").unwrap();
        fs.set_executable(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
