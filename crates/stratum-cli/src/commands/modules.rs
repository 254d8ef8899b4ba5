//! `stratum modules`: list the accepted `--module` names.

use stratum_core::domain::{ModuleName, Placement};

use crate::{cli::OutputFormat, error::CliResult, output::OutputManager};

pub fn execute(output: OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        let names: Vec<&str> = ModuleName::ALL.iter().map(ModuleName::as_str).collect();
        return output.json("module list", &names);
    }

    output.header("Modules:")?;
    for module in ModuleName::ALL {
        output.print(&format!(
            "  {:<18} -> {}",
            module.as_str(),
            Placement::Module(module).base_controller()
        ))?;
    }
    output.print("")?;
    output.info("Use --shared for the Commons area instead of a module.")?;
    Ok(())
}
