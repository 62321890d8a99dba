//! The template tree bundled into the binary.
//!
//! Everything under `templates/fastapi-htmx/` in this crate is compiled in
//! with `rust-embed`. Directory entries are derived from the file paths.

use std::collections::BTreeSet;

use rust_embed::RustEmbed;
use tracing::{debug, instrument};

use stackseed_core::{
    application::ports::TemplateSource,
    domain::{DomainError, RelativePath, TemplateEntry, TemplateTree},
    error::StackseedResult,
};

#[derive(RustEmbed)]
#[folder = "templates/fastapi-htmx/"]
struct FastapiHtmxAssets;

/// FastAPI + Jinja2 + HTMX + Tailwind/Flowbite + Supabase starter.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplate;

impl EmbeddedTemplate {
    pub const NAME: &'static str = "fastapi-htmx";

    pub fn new() -> Self {
        Self
    }
}

impl TemplateSource for EmbeddedTemplate {
    fn name(&self) -> &str {
        Self::NAME
    }

    #[instrument(skip_all, fields(template = Self::NAME))]
    fn load(&self) -> StackseedResult<TemplateTree> {
        let mut names: Vec<String> = FastapiHtmxAssets::iter().map(|n| n.into_owned()).collect();
        names.sort();

        let mut directories = BTreeSet::new();
        let mut files = Vec::with_capacity(names.len());

        for name in names {
            let path = RelativePath::from_slash(&name)?;

            let mut parent = path.parent();
            while let Some(dir) = parent {
                parent = dir.parent();
                directories.insert(dir);
            }

            let asset = FastapiHtmxAssets::get(&name).ok_or_else(|| {
                DomainError::InvalidTemplate(format!("embedded file '{name}' is missing"))
            })?;
            files.push((path, asset.data.into_owned()));
        }

        let mut tree = TemplateTree::new(Self::NAME);
        for dir in directories {
            tree.push(TemplateEntry::Directory(dir));
        }
        for (path, contents) in files {
            tree = tree.with_file(path, contents);
        }

        debug!(
            files = tree.file_count(),
            directories = tree.directory_count(),
            "Loaded embedded template"
        );
        Ok(tree)
    }
}
