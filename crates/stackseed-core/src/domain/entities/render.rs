//! Placeholder substitution.
//!
//! Templates mark substitution points with `{{VARIABLE}}`. Only variables the
//! [`RenderContext`] knows about are replaced; every other `{{ ... }}` is
//! copied verbatim, which keeps Jinja2 expressions in the bundled HTML intact.

use std::borrow::Cow;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::PathBuf;

use chrono::Datelike;

use crate::domain::{
    entities::common::RelativePath, error::DomainError, value_objects::ProjectName,
};

/// The primary placeholder token.
pub const PROJECT_NAME_TOKEN: &str = "{{PROJECT_NAME}}";

const OPEN: &[u8] = b"{{";
const CLOSE: &[u8] = b"}}";

/// Context for template rendering.
///
/// ## Built-in Variables
///
/// | Variable | Example | Source |
/// |----------|---------|--------|
/// | `PROJECT_NAME` | "My Awesome App" | User input |
/// | `PROJECT_NAME_SNAKE` | "my_awesome_app" | Computed |
/// | `PROJECT_NAME_KEBAB` | "my-awesome-app" | Computed |
/// | `PROJECT_NAME_PASCAL` | "MyAwesomeApp" | Computed |
/// | `YEAR` | "2026" | System clock |
#[derive(Debug, Clone)]
pub struct RenderContext {
    project_name: String,
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new(project_name: &ProjectName) -> Self {
        let name = project_name.as_str().to_string();
        let mut vars = HashMap::new();

        vars.insert("PROJECT_NAME".to_string(), name.clone());
        vars.insert("PROJECT_NAME_SNAKE".to_string(), to_snake_case(&name));
        vars.insert("PROJECT_NAME_KEBAB".to_string(), to_kebab_case(&name));
        vars.insert("PROJECT_NAME_PASCAL".to_string(), to_pascal_case(&name));
        vars.insert("YEAR".to_string(), chrono::Local::now().year().to_string());

        Self {
            project_name: name,
            variables: vars,
        }
    }

    /// Add or override a variable, consuming self.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Substitute known placeholders in raw bytes.
    ///
    /// Single left-to-right pass: inserted values are never rescanned, so a
    /// project name that itself looks like a token is inserted literally.
    /// Returns `Cow::Borrowed` when nothing was replaced.
    ///
    /// - `{{UNKNOWN}}` stays as literal `{{UNKNOWN}}`
    /// - `{{{PROJECT_NAME}}}` keeps the outer braces, the inner token is replaced
    pub fn render_bytes<'a>(&self, input: &'a [u8]) -> Cow<'a, [u8]> {
        let mut out: Option<Vec<u8>> = None;
        let mut cursor = 0;
        let mut copied_upto = 0;

        // No known name is longer than this, so `}}` is only searched for
        // within that window after each `{{`.
        let longest = self.variables.keys().map(String::len).max().unwrap_or(0);

        while let Some(offset) = find(&input[cursor..], OPEN) {
            let start = cursor + offset;
            let name_start = start + OPEN.len();
            let window_end = input.len().min(name_start + longest + CLOSE.len());
            let Some(name_len) = find(&input[name_start..window_end], CLOSE) else {
                cursor = start + 1;
                continue;
            };

            let value = std::str::from_utf8(&input[name_start..name_start + name_len])
                .ok()
                .and_then(|name| self.get(name));

            match value {
                Some(value) => {
                    let buf = out.get_or_insert_with(|| Vec::with_capacity(input.len()));
                    buf.extend_from_slice(&input[copied_upto..start]);
                    buf.extend_from_slice(value.as_bytes());
                    cursor = name_start + name_len + CLOSE.len();
                    copied_upto = cursor;
                }
                None => cursor = start + 1,
            }
        }

        match out {
            Some(mut buf) => {
                buf.extend_from_slice(&input[copied_upto..]);
                Cow::Owned(buf)
            }
            None => Cow::Borrowed(input),
        }
    }

    /// String convenience wrapper around [`Self::render_bytes`].
    pub fn render(&self, template: &str) -> String {
        // Values are UTF-8 and only replace whole ASCII tokens, so valid UTF-8 in
        // means valid UTF-8 out.
        String::from_utf8_lossy(&self.render_bytes(template.as_bytes())).into_owned()
    }

    /// Substitute placeholders in every component of a template path.
    pub fn render_path(&self, path: &RelativePath) -> Result<RelativePath, DomainError> {
        let mut rendered = PathBuf::new();

        for segment in path.as_path().iter() {
            let Some(text) = segment.to_str() else {
                rendered.push(segment);
                continue;
            };
            let replaced = self.render(text);
            if replaced.contains('/') || replaced.contains('\\') {
                return Err(DomainError::InvalidTemplate(format!(
                    "path component '{text}' renders to '{replaced}', which contains a separator"
                )));
            }
            if replaced.is_empty() || replaced == "." || replaced == ".." {
                return Err(DomainError::PathEscapesRoot { path: replaced });
            }
            rendered.push(OsStr::new(&replaced));
        }

        RelativePath::try_new(rendered)
    }

    /// `true` if `input` contains at least one placeholder this context knows.
    pub fn has_placeholders(&self, input: &[u8]) -> bool {
        matches!(self.render_bytes(input), Cow::Owned(_))
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

/// | Input | Output |
/// |-------|--------|
/// | "MyApp" | "my_app" |
/// | "my-app" | "my_app" |
/// | "HTTPRequest" | "http_request" |
fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// | Input | Output |
/// |-------|--------|
/// | "my-app" | "MyApp" |
/// | "HTTPRequest" | "HttpRequest" |
fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Split a string into lowercase words.
///
/// 1. **Separators:** any character that is not a letter or digit
/// 2. **camelCase:** `aB` splits between `a` and `B`
/// 3. **Acronyms:** `HTTPRequest` splits between `P` and `R`
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(char::is_lowercase)
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
