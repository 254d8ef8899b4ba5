//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site, not here)
//! 2. `STRATUM_*` environment variables, `__` between section and key
//!    (`STRATUM_MIGRATION__DEVELOPER=ayse`)
//! 3. Config file (`--config`, else the platform config directory)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use stratum_core::domain::{DEFAULT_ANCHOR, DEFAULT_CASCADE_PARENT, Layer};

use crate::cli::OutputFormat;

pub const ENV_PREFIX: &str = "STRATUM";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the model sits inside the host repository.
    pub layout: LayoutConfig,
    /// Migration script naming and cascade behaviour.
    pub migration: MigrationConfig,
    /// Which layers run by default.
    pub generation: GenerationConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Directory marker below the domain project.
    pub anchor: String,
    /// Database context class; `<Company>Context` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    pub cascade_parent: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Empty means every layer.
    pub layers: Vec<Layer>,
    pub fail_fast: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: OutputFormat,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            anchor: DEFAULT_ANCHOR.into(),
            db_context: None,
        }
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            developer: None,
            cascade_parent: DEFAULT_CASCADE_PARENT.into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, file and environment.
    ///
    /// The default location is always optional; an explicit `config_file`
    /// must exist when `must_exist` is set.
    pub fn load(config_file: Option<&PathBuf>, must_exist: bool) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), must_exist),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required, environment())
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("failed to build default configuration")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(env)
            .build()
            .with_context(|| format!("failed to read configuration from '{}'", path.display()))?
            .try_deserialize()
            .context("configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stratum.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "stratum", "stratum")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".stratum.toml"))
    }

    /// Look up a dotted key such as `migration.cascade_parent`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let value = serde_json::to_value(self).ok()?;
        value
            .pointer(&format!("/{}", key.replace('.', "/")))
            .cloned()
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("generation.layers")
}
