//! Implementation of the `stratum generate` command.
//!
//! Responsibility: turn CLI arguments and configuration into a
//! `GenerationRequest`, run the core service against the local filesystem,
//! and display the report. No generation logic lives here.

use std::io::IsTerminal as _;

use tracing::{debug, info, instrument};

use stratum_adapters::LocalFilesystem;
use stratum_core::prelude::*;

use crate::{
    cli::{GenerateArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Used when neither a flag, the config, nor the login name gives a developer.
const FALLBACK_DEVELOPER: &str = "stratum";

/// Execute the `stratum generate` command.
#[instrument(skip_all, fields(model = %args.model_path.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let placement = resolve_placement(&args, &output)?;
    let request = build_request(&args, placement, &config);

    debug!(
        placement = %request.placement,
        developer = %request.migration.developer,
        script_date = %request.migration.script_date,
        layers = ?request.selected_layers(),
        dry_run = request.dry_run,
        "Request resolved"
    );

    let service = GenerationService::new(Box::new(LocalFilesystem::new()));

    let spinner = output.spinner("Generating layers...");
    let result = service.generate(&request);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let report = result?;

    info!(
        model = %report.model,
        files = report.file_count(),
        success = report.is_success(),
        "Generation finished"
    );

    output.report(&report)?;
    outcome(&report, &output)
}

/// Build the core request. Flags win over configuration.
pub fn build_request(
    args: &GenerateArgs,
    placement: Placement,
    config: &AppConfig,
) -> GenerationRequest {
    let script_date = args
        .script_date
        .clone()
        .unwrap_or_else(|| chrono::Local::now().format("%Y%m%d%H%M").to_string());
    let cascade_parent = args
        .cascade_parent
        .clone()
        .unwrap_or_else(|| config.migration.cascade_parent.clone());
    let migration = MigrationSettings::new(developer(args, config), script_date)
        .with_cascade_parent(cascade_parent);

    let layers = if args.only.is_empty() {
        config.generation.layers.clone()
    } else {
        args.only.clone()
    };

    let mut request = GenerationRequest::new(&args.model_path, placement, migration)
        .with_anchor(config.layout.anchor.clone())
        .only(layers)
        .dry_run(args.dry_run)
        .fail_fast(args.fail_fast || config.generation.fail_fast);
    if let Some(context) = &config.layout.db_context {
        request = request.with_db_context(context.clone());
    }
    request
}

fn developer(args: &GenerateArgs, config: &AppConfig) -> String {
    if let Some(name) = args.developer.as_ref().or(config.migration.developer.as_ref()) {
        return name.clone();
    }
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .map(|login| identifier_safe(&login))
        .ok()
        .filter(|login| !login.is_empty())
        .unwrap_or_else(|| FALLBACK_DEVELOPER.into())
}

/// Drop everything a migration class name cannot hold.
fn identifier_safe(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

fn resolve_placement(args: &GenerateArgs, output: &OutputManager) -> CliResult<Placement> {
    if args.shared {
        return Ok(Placement::Shared);
    }
    if let Some(module) = args.module {
        return Ok(Placement::Module(module));
    }

    let model = args
        .model_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let can_prompt = output.format() != OutputFormat::Json
        && !output.is_quiet()
        && std::io::stdin().is_terminal()
        && std::io::stderr().is_terminal();
    if !can_prompt {
        return Err(CliError::PlacementRequired { model });
    }
    prompt_placement(&model)
}

#[cfg(feature = "interactive")]
fn prompt_placement(model: &str) -> CliResult<Placement> {
    crate::prompt::placement(model)
}

#[cfg(not(feature = "interactive"))]
fn prompt_placement(model: &str) -> CliResult<Placement> {
    let _ = model;
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

/// Map the report onto the command result; failed layers become exit code 5.
fn outcome(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    let failed: Vec<String> = report
        .failures()
        .map(|(layer, _)| layer.to_string())
        .collect();

    if !failed.is_empty() {
        return Err(CliError::PartialGeneration {
            failed: failed.len(),
            total: report.layers.len(),
            layers: failed.join(", "),
        });
    }

    if output.format() != OutputFormat::Json {
        if report.dry_run {
            output.info(&format!(
                "Dry run: {} file(s) planned, nothing written",
                report.file_count()
            ))?;
        } else {
            output.success(&format!(
                "{} file(s) written for '{}'",
                report.file_count(),
                report.model
            ))?;
        }
    }
    Ok(())
}
