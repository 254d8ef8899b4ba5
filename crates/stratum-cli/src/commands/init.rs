//! `stratum init`: write a default configuration file.

use std::path::Path;

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Write the defaults to `path`, which is `--config` or the platform location.
pub fn execute(args: InitArgs, path: &Path, output: OutputManager) -> CliResult<()> {
    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            path.display(),
        ))?;
        return Ok(());
    }

    let text = render_default()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }
    std::fs::write(path, text)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;

    output.success(&format!("Configuration created at {}", path.display()))?;
    Ok(())
}

fn render_default() -> CliResult<String> {
    toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })
}
