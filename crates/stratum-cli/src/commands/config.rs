//! `stratum config`: read configuration values.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    path: &Path,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            output.print(&get_config_value(&config, &key)?)?;
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
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}

/// Value of a dotted key, strings unquoted.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match config.get(key) {
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Null) => Ok(String::new()),
        Some(other) => Ok(other.to_string()),
        None => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}
