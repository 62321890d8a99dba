//! Command handlers. Each one turns parsed arguments into calls on
//! `stackseed-core` and reports the outcome through the `OutputManager`.

pub mod completions;
pub mod generate;
