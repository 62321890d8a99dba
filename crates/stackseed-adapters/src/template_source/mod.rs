//! Template sources.
//!
//! [`EmbeddedTemplate`] is the default: the tree under `templates/` compiled
//! into the binary. [`DirectoryTemplate`] reads a tree from disk for users who
//! keep their own boilerplate.

mod directory;
mod embedded;

pub use directory::DirectoryTemplate;
pub use embedded::EmbeddedTemplate;
