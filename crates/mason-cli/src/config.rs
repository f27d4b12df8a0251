//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`MASON__*`, `__`-separated)
//! 3. Config file (`--config`, or the default location)
//! 4. Built-in defaults (always present)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Artifact repository settings.
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Group id suggested when the invocation omits one.
    pub group_id: Option<String>,
    /// Target platform used by `--defaults` (`cloud` or `6.5`).
    pub aem_version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Maven repository root for live version lookups. When unset,
    /// versions come from the built-in static table — deterministic and
    /// offline.
    pub metadata_url: Option<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            group_id: None,
            aem_version: Some("cloud".into()),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { metadata_url: None }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then file, then environment.
    ///
    /// `config_file` is the path the user passed via `--config` (or
    /// `None` to use the default location, which may not exist).
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&AppConfig::default())?;

        let mut builder = config::Config::builder().add_source(defaults);
        builder = match config_file {
            Some(path) => builder.add_source(config::File::from(path.clone())),
            None => builder.add_source(config::File::from(Self::config_path()).required(false)),
        };
        builder = builder.add_source(config::Environment::with_prefix("MASON").separator("__"));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Path to the default configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("mason").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".masonrc.toml"))
    }
}
