//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `STACKSEED_GENERATE__OVERWRITE=force`
//! 3. Config file: `--config <FILE>` or `<config dir>/stackseed/config.toml`
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generate: GenerateConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// What to do when the target directory already has content.
    pub overwrite: OverwriteMode,
    /// Template tree to use instead of the bundled one.
    pub template_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: OutputFormat,
}

/// Overwrite behaviour for a non-empty target.
///
/// `Prompt` only exists at this layer: the CLI asks, then hands the core
/// either `Fail` or `Overwrite`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwriteMode {
    #[default]
    Fail,
    Force,
    Prompt,
}

impl AppConfig {
    /// Load configuration from the file (if any) and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let env = Environment::with_prefix("STACKSEED")
            .prefix_separator("_")
            .separator("__");
        Self::load_from(config_file, Self::config_path().as_deref(), env)
    }

    fn load_from(
        explicit: Option<&Path>,
        default_path: Option<&Path>,
        env: Environment,
    ) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        match (explicit, default_path) {
            (Some(path), _) => {
                builder = builder.add_source(
                    File::from(path.to_path_buf())
                        .format(FileFormat::Toml)
                        .required(true),
                );
            }
            (None, Some(path)) => {
                builder = builder.add_source(
                    File::from(path.to_path_buf())
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
            (None, None) => {}
        }

        let config = builder
            .add_source(env)
            .build()
            .context("failed to read configuration")?;

        config
            .try_deserialize()
            .context("invalid configuration value")
    }

    /// Path to the default configuration file, e.g.
    /// `~/.config/stackseed/config.toml` on Linux.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "stackseed")
            .map(|d| d.config_dir().join("config.toml"))
    }
}
