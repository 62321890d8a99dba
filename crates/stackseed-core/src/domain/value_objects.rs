//! Validated inputs to the generator.
//!
//! Both types are only constructible through `parse`, so anything holding a
//! [`ProjectName`] or [`TargetPath`] has already passed argument validation.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::domain::error::DomainError;

const MAX_NAME_LEN: usize = 128;

// ============================================================================
// ProjectName
// ============================================================================

/// Name substituted into generated files.
///
/// Spaces and most punctuation are allowed (`My Shop`, `R&D Portal`) because
/// the name is mostly inserted into prose and HTML. Path separators are not,
/// since the name may also be substituted into file and directory names.
/// Quote characters are rejected: the bundled template places the name inside
/// JSON, Python and Jinja string literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let name = raw.into();
        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: name.clone(),
            reason: reason.into(),
        };

        if name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name.trim() != name {
            return Err(invalid("name cannot start or end with whitespace"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(invalid("name is longer than 128 characters"));
        }
        if name.chars().any(char::is_control) {
            return Err(invalid("name cannot contain control characters"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("name cannot contain path separators"));
        }
        if name.contains(['"', '\'', '`']) {
            return Err(invalid("name cannot contain quote characters"));
        }
        if !name.chars().any(char::is_alphanumeric) {
            return Err(invalid("name must contain at least one letter or digit"));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// TargetPath
// ============================================================================

/// Directory the project is generated into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TargetPath(PathBuf);

impl TargetPath {
    pub fn parse(raw: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = raw.into();
        let invalid = |reason: String| DomainError::InvalidTargetPath {
            path: path.display().to_string(),
            reason,
        };

        if path.as_os_str().is_empty() {
            return Err(invalid("path cannot be empty".into()));
        }
        if path.as_os_str().as_encoded_bytes().contains(&0) {
            return Err(invalid("path cannot contain NUL bytes".into()));
        }

        for component in path.components() {
            if let Component::Normal(segment) = component {
                let segment = segment.to_string_lossy();
                if let Some(c) = segment.chars().find(|c| is_illegal_on_host(*c)) {
                    return Err(invalid(format!(
                        "component '{segment}' contains illegal character {c:?}"
                    )));
                }
            }
        }

        Ok(Self(path))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for TargetPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for TargetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(windows)]
fn is_illegal_on_host(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '|' | '?' | '*') || c.is_ascii_control()
}

#[cfg(not(windows))]
fn is_illegal_on_host(_c: char) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── ProjectName ───────────────────────────────────────────────────────

    #[test]
    fn empty_name_is_invalid() {
        assert!(matches!(
            ProjectName::parse(""),
            Err(DomainError::InvalidProjectName { .. })
        ));
        assert!(ProjectName::parse("   ").is_err());
    }

    #[test]
    fn padded_name_is_invalid() {
        assert!(ProjectName::parse(" Demo").is_err());
        assert!(ProjectName::parse("Demo\n").is_err());
    }

    #[test]
    fn separators_and_dots_are_invalid() {
        assert!(ProjectName::parse("a/b").is_err());
        assert!(ProjectName::parse("a\\b").is_err());
        assert!(ProjectName::parse(".").is_err());
        assert!(ProjectName::parse("..").is_err());
    }

    #[test]
    fn quotes_are_invalid() {
        for name in ["Bob's Shop", "The \"Shop\"", "back`tick"] {
            assert!(ProjectName::parse(name).is_err(), "accepted: {name}");
        }
    }

    #[test]
    fn name_without_word_characters_is_invalid() {
        assert!(ProjectName::parse("___").is_err());
        assert!(ProjectName::parse("-.-").is_err());
        assert!(ProjectName::parse("_a_").is_ok());
    }

    #[test]
    fn control_characters_are_invalid() {
        assert!(ProjectName::parse("De\tmo").is_err());
    }

    #[test]
    fn overly_long_name_is_invalid() {
        assert!(ProjectName::parse("x".repeat(129)).is_err());
        assert!(ProjectName::parse("x".repeat(128)).is_ok());
    }

    #[test]
    fn valid_names_pass() {
        for name in ["Demo", "my-app", "my_app", "My Shop", "café", ".hidden"] {
            assert!(ProjectName::parse(name).is_ok(), "failed for: {name}");
        }
    }

    // ── TargetPath ────────────────────────────────────────────────────────

    #[test]
    fn empty_path_is_invalid() {
        assert!(matches!(
            TargetPath::parse(""),
            Err(DomainError::InvalidTargetPath { .. })
        ));
    }

    #[test]
    fn nul_byte_is_invalid() {
        assert!(TargetPath::parse("demo\0x").is_err());
    }

    #[test]
    fn ordinary_paths_pass() {
        for p in ["demo", "./demo", "../x/demo", "/tmp/demo"] {
            assert!(TargetPath::parse(p).is_ok(), "failed for: {p}");
        }
    }

    #[test]
    #[cfg(windows)]
    fn windows_reserved_characters_are_invalid() {
        assert!(TargetPath::parse("C:\\work\\de?mo").is_err());
        assert!(TargetPath::parse("C:\\work\\demo").is_ok());
    }
}
