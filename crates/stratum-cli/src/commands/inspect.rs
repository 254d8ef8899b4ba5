//! `stratum inspect`: print the Structural Model of a model file.

use std::path::Path;

use stratum_adapters::LocalFilesystem;
use stratum_core::prelude::*;

use crate::{
    cli::{InspectArgs, InspectFormat, OutputFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: InspectArgs, output: OutputManager) -> CliResult<()> {
    let service = GenerationService::new(Box::new(LocalFilesystem::new()));
    let model = service.inspect(&args.model_path)?;

    if args.format == InspectFormat::Json || output.format() == OutputFormat::Json {
        return output.json("structural model", &model);
    }
    for line in describe(&args.model_path, &model) {
        output.print(&line)?;
    }
    Ok(())
}

/// Text summary, one fact per line.
pub fn describe(path: &Path, model: &StructuralModel) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", model.name(), path.display()),
        format!("  plural:         {}", model.plural()),
        format!("  id type:        {}", model.id_type()),
        format!("  multi-language: {}", yes_no(model.has_multi_language())),
        format!("  audited:        {}", yes_no(model.is_audited())),
    ];

    if !model.capabilities().is_empty() {
        let names: Vec<&str> = model.capabilities().iter().map(|c| c.raw.as_str()).collect();
        lines.push(format!("  capabilities:   {}", names.join(", ")));
    }

    lines.push(format!("  properties ({}):", model.properties().len()));
    for p in model.properties() {
        let access = if p.is_privately_mutable { "private set" } else { "set" };
        lines.push(format!("    {} {} [{access}]", p.type_name, p.name));
    }

    if !model.navigations().is_empty() {
        lines.push(format!("  navigations ({}):", model.navigations().len()));
        for n in model.navigations() {
            lines.push(format!("    {} -> {} via {}", n.name, n.related_type, n.foreign_key()));
        }
    }

    if !model.relationships().is_empty() {
        lines.push(format!("  relationships ({}):", model.relationships().len()));
        for r in model.relationships() {
            lines.push(format!("    {} of {}", r.name, r.related_type));
        }
    }
    lines
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
