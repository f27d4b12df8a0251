//! `mason config` — read and write configuration values.

use std::path::PathBuf;

use crate::{
    cli::{ConfigCommands, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }

        ConfigCommands::Set { key, value } => {
            let path = active_config_path(&global);
            let mut updated = config;
            set_config_value(&mut updated, &key, &value)?;
            write_config(&updated, &path)?;
            output.success(&format!("{key} = {value} ({})", path.display()))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(&active_config_path(&global).display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn active_config_path(global: &GlobalArgs) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(AppConfig::config_path)
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "defaults.group_id" => Ok(config.defaults.group_id.clone().unwrap_or_default()),
        "defaults.aem_version" => Ok(config.defaults.aem_version.clone().unwrap_or_default()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        "registry.metadata_url" => Ok(config.registry.metadata_url.clone().unwrap_or_default()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

fn set_config_value(config: &mut AppConfig, key: &str, value: &str) -> CliResult<()> {
    match key {
        "defaults.group_id" => config.defaults.group_id = Some(value.to_string()),
        "defaults.aem_version" => config.defaults.aem_version = Some(value.to_string()),
        "output.no_color" => {
            config.output.no_color = value.parse().map_err(|_| CliError::ConfigError {
                message: format!("'{value}' is not a boolean"),
                source: None,
            })?;
        }
        "output.format" => config.output.format = value.to_string(),
        "registry.metadata_url" => config.registry.metadata_url = Some(value.to_string()),
        _ => {
            return Err(CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            });
        }
    }
    Ok(())
}

fn write_config(config: &AppConfig, path: &PathBuf) -> CliResult<()> {
    let serialised = toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CliError::IoError {
            message: format!("Failed to create config directory '{}'", parent.display()),
            source: e,
        })?;
    }
    std::fs::write(path, serialised).map_err(|e| CliError::IoError {
        message: format!("Failed to write config to '{}'", path.display()),
        source: e,
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────
