//! Filesystem-based template source.
//!
//! Any directory can serve as a template: every file and subdirectory below
//! it becomes part of the tree, with `.git/` skipped.
//!
//! ```text
//! my-template/
//! ├── README.md                 ← "# {{PROJECT_NAME}}"
//! ├── {{PROJECT_NAME_SNAKE}}/
//! │   └── __init__.py
//! └── scripts/
//!     └── dev.sh                ← executable bit is kept
//! ```

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use stackseed_core::{
    application::{ApplicationError, ports::TemplateSource},
    domain::{DomainError, RelativePath, TemplateEntry, TemplateFile, TemplateTree},
    error::{StackseedError, StackseedResult},
};

/// Loads a [`TemplateTree`] from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryTemplate {
    root: PathBuf,
    name: String,
}

impl DirectoryTemplate {
    /// The directory does not need to exist yet; [`TemplateSource::load`]
    /// reports it if it is missing.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        Self { root, name }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for DirectoryTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self), fields(dir = %self.root.display()))]
    fn load(&self) -> StackseedResult<TemplateTree> {
        if !self.root.is_dir() {
            return Err(DomainError::InvalidTemplate(format!(
                "template directory not found: {}",
                self.root.display()
            ))
            .into());
        }

        let mut tree = TemplateTree::new(self.name.clone());

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_name() != ".git");

        for walk_entry in walker {
            let walk_entry =
                walk_entry.map_err(|e| io_failure(e.path().unwrap_or(self.root.as_path()), &e))?;
            let abs_path = walk_entry.path();
            let rel_raw = abs_path.strip_prefix(&self.root).map_err(|_| {
                DomainError::InvalidTemplate(format!(
                    "failed to relativise '{}' against '{}'",
                    abs_path.display(),
                    self.root.display()
                ))
            })?;
            let path = RelativePath::try_new(rel_raw)?;

            let file_type = walk_entry.file_type();
            if file_type.is_dir() {
                tree.push(TemplateEntry::Directory(path));
            } else if file_type.is_file() {
                let contents = fs::read(abs_path).map_err(|e| io_failure(abs_path, &e))?;
                tree.push(TemplateEntry::File(TemplateFile {
                    path,
                    contents,
                    executable: is_executable(&walk_entry),
                }));
            } else {
                // Symlinks could point outside the template; they are not copied.
                warn!(path = %abs_path.display(), "skipping non-regular file");
            }
        }

        debug!(
            files = tree.file_count(),
            directories = tree.directory_count(),
            "Loaded template directory"
        );
        Ok(tree)
    }
}

/// A template that exists but cannot be read is an I/O failure, not a usage
/// error.
fn io_failure(path: &Path, reason: &dyn fmt::Display) -> StackseedError {
    ApplicationError::IoFailure {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(unix)]
fn is_executable(entry: &walkdir::DirEntry) -> bool {
    use std::os::unix::fs::PermissionsExt;
    entry
        .metadata()
        .is_ok_and(|m| m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(_entry: &walkdir::DirEntry) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use std::fs;

    use stackseed_core::error::ErrorKind;
    use tempfile::TempDir;

    use super::*;

    fn make_template(files: &[(&str, &[u8])]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (path, contents) in files {
            let full = temp.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, contents).unwrap();
        }
        temp
    }

    #[test]
    fn missing_directory_is_invalid_template() {
        let err = DirectoryTemplate::new("/absolutely/does/not/exist")
            .load()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTemplate);
    }

    #[test]
    fn read_errors_are_io_failures_with_the_path() {
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = io_failure(Path::new("/tpl/secret.txt"), &denied);

        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert!(matches!(
            err,
            StackseedError::Application(ApplicationError::IoFailure { ref path, ref reason })
                if path == Path::new("/tpl/secret.txt") && reason == "denied"
        ));
    }

    #[test]
    #[cfg(unix)]
    fn unreadable_file_fails_the_load_as_io() {
        use std::os::unix::fs::PermissionsExt;

        let temp = make_template(&[("secret.txt", b"x")]);
        let secret = temp.path().join("secret.txt");
        fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read(&secret).is_ok() {
            // Running with privileges that bypass file modes.
            return;
        }

        let err = DirectoryTemplate::new(temp.path()).load().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert!(err.to_string().contains("secret.txt"));
    }

    #[test]
    fn loads_files_and_directories_in_order() {
        let temp = make_template(&[
            ("README.md", b"# {{PROJECT_NAME}}"),
            ("src/app.py", b"print('hi')"),
        ]);
        fs::create_dir(temp.path().join("empty")).unwrap();

        let tree = DirectoryTemplate::new(temp.path()).load().unwrap();
        let paths: Vec<String> = tree.entries().iter().map(|e| e.path().to_string()).collect();

        assert_eq!(tree.file_count(), 2);
        assert_eq!(tree.directory_count(), 2);
        assert!(paths.contains(&"empty".to_string()));
        assert_eq!(paths[0], "README.md");
    }

    #[test]
    fn git_directory_is_skipped() {
        let temp = make_template(&[("a.txt", b"a"), (".git/HEAD", b"ref: refs/heads/main")]);

        let tree = DirectoryTemplate::new(temp.path()).load().unwrap();
        assert_eq!(tree.file_count(), 1);
        assert!(tree.entries().iter().all(|e| !e.path().to_string().contains(".git")));
    }

    #[test]
    fn binary_files_load_unchanged() {
        let bytes: &[u8] = &[0x89, b'P', b'N', b'G', 0x00, 0xff];
        let temp = make_template(&[("logo.png", bytes)]);

        let tree = DirectoryTemplate::new(temp.path()).load().unwrap();
        assert_eq!(tree.files().next().unwrap().contents, bytes);
    }

    #[test]
    #[cfg(unix)]
    fn executable_bit_is_detected() {
        use std::os::unix::fs::PermissionsExt;

        let temp = make_template(&[("dev.sh", b"#!/bin/sh\n"), ("notes.txt", b"x")]);
        let script = temp.path().join("dev.sh");
        let mut perms = fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script, perms).unwrap();

        let tree = DirectoryTemplate::new(temp.path()).load().unwrap();
        for file in tree.files() {
            assert_eq!(file.executable, file.path.as_path() == Path::new("dev.sh"));
        }
    }

    #[test]
    fn name_is_directory_name() {
        assert_eq!(DirectoryTemplate::new("/x/my-template").name(), "my-template");
    }
}
