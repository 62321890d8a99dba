use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;

/// A filesystem path guaranteed to stay inside the project root.
///
/// Invariant: never absolute, never empty, no `..` components. Enforced at
/// construction. `.` components are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let shown = || path.display().to_string();

        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(segment) => normalized.push(segment),
                Component::CurDir => {}
                Component::ParentDir => {
                    return Err(DomainError::PathEscapesRoot { path: shown() });
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(DomainError::AbsolutePathNotAllowed { path: shown() });
                }
            }
        }

        if normalized.as_os_str().is_empty() {
            return Err(DomainError::InvalidTemplate(format!(
                "empty relative path '{}'",
                shown()
            )));
        }

        Ok(Self(normalized))
    }

    /// Build from a `/`-separated string (embedded asset names, manifests).
    pub fn from_slash(s: &str) -> Result<Self, DomainError> {
        if s.starts_with('/') {
            return Err(DomainError::AbsolutePathNotAllowed { path: s.into() });
        }
        let mut path = PathBuf::new();
        for segment in s.split('/').filter(|seg| !seg.is_empty()) {
            path.push(segment);
        }
        Self::try_new(path)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn parent(&self) -> Option<RelativePath> {
        self.0
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| Self(p.to_path_buf()))
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_path_is_rejected() {
        assert!(matches!(
            RelativePath::try_new("/etc/passwd"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
        assert!(RelativePath::from_slash("/etc").is_err());
    }

    #[test]
    fn parent_traversal_is_rejected() {
        assert!(matches!(
            RelativePath::from_slash("a/../../b"),
            Err(DomainError::PathEscapesRoot { .. })
        ));
    }

    #[test]
    fn current_dir_components_are_dropped() {
        let p = RelativePath::from_slash("./a//b/./c.txt").unwrap();
        assert_eq!(p.as_path(), Path::new("a").join("b").join("c.txt"));
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(RelativePath::from_slash("").is_err());
        assert!(RelativePath::try_new(".").is_err());
    }

    #[test]
    fn parent_of_top_level_is_none() {
        assert!(RelativePath::from_slash("a.txt").unwrap().parent().is_none());
        assert_eq!(
            RelativePath::from_slash("a/b.txt").unwrap().parent(),
            Some(RelativePath::from_slash("a").unwrap())
        );
    }
}
