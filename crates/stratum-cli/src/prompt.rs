//! Interactive prompts (feature `interactive`).

use dialoguer::{Select, theme::ColorfulTheme};
use stratum_core::domain::{ModuleName, Placement};

use crate::error::{CliError, CliResult};

/// First step: shared area or a module.
pub const AREAS: [&str; 2] = ["Shared (Commons)", "Module"];

/// Placement for the picked area and, for the module area, the picked module.
pub fn placement_for(area: usize, module: Option<usize>) -> Option<Placement> {
    match area {
        0 => Some(Placement::Shared),
        1 => module
            .and_then(|i| ModuleName::ALL.get(i).copied())
            .map(Placement::Module),
        _ => None,
    }
}

/// Ask where `model`'s application and controller artifacts go.
pub fn placement(model: &str) -> CliResult<Placement> {
    let theme = ColorfulTheme::default();

    let area = select(
        &theme,
        format!("Where should '{model}' be placed?"),
        &AREAS,
    )?;
    let module = if area == 1 {
        let labels: Vec<&str> = ModuleName::ALL.iter().map(|m| m.as_str()).collect();
        Some(select(&theme, "Which module?".to_string(), &labels)?)
    } else {
        None
    };

    placement_for(area, module).ok_or(CliError::Cancelled)
}

fn select(theme: &ColorfulTheme, prompt: String, items: &[&str]) -> CliResult<usize> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()
        .map_err(|e| CliError::InvalidInput {
            message: "placement prompt failed".into(),
            source: Some(Box::new(e)),
        })?
        .ok_or(CliError::Cancelled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_area_needs_no_module() {
        assert_eq!(placement_for(0, None), Some(Placement::Shared));
    }

    #[test]
    fn module_area_maps_the_second_choice() {
        let office = ModuleName::ALL
            .iter()
            .position(|m| *m == ModuleName::ProjectOffice)
            .unwrap();
        assert_eq!(
            placement_for(1, Some(office)),
            Some(Placement::Module(ModuleName::ProjectOffice))
        );
    }

    #[test]
    fn module_area_without_a_module_is_unresolved() {
        assert_eq!(placement_for(1, None), None);
        assert_eq!(placement_for(1, Some(ModuleName::ALL.len())), None);
        assert_eq!(placement_for(2, Some(0)), None);
    }
}
