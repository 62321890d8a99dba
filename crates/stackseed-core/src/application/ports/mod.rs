//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stackseed-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the application, implemented by infrastructure
//!   - `TemplateSource`: where the template tree comes from
//!   - `Filesystem`: where the project is written

pub mod output;

pub use output::{Filesystem, TargetState, TemplateSource};

#[cfg(test)]
pub use output::MockFilesystem;
