//! Per-run placement configuration, resolved once and passed to every
//! generator by reference.

use serde::Serialize;

use crate::domain::{error::DomainError, layout::ProjectLayout, value_objects::Placement};

/// Parent type whose deletion cascades to referencing rows by default.
pub const DEFAULT_CASCADE_PARENT: &str = "Project";

/// Inputs of the migration script generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationSettings {
    /// Developer tag used in the script class name.
    pub developer: String,
    /// Migration version, `yyyyMMddHHmm`.
    pub script_date: String,
    /// Navigations to this type get `ON DELETE CASCADE`.
    pub cascade_parent: String,
}

impl MigrationSettings {
    pub fn new(developer: impl Into<String>, script_date: impl Into<String>) -> Self {
        Self {
            developer: developer.into(),
            script_date: script_date.into(),
            cascade_parent: DEFAULT_CASCADE_PARENT.to_string(),
        }
    }

    pub fn with_cascade_parent(mut self, parent: impl Into<String>) -> Self {
        self.cascade_parent = parent.into();
        self
    }

    /// `Script_<developer>_<date>`.
    pub fn class_name(&self) -> String {
        format!("Script_{}_{}", self.developer, self.script_date)
    }
}

/// Everything a generator needs besides the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementConfig {
    pub layout: ProjectLayout,
    pub placement: Placement,
    pub migration: MigrationSettings,
    /// Persistence context type; `<Company>Context` when unset.
    pub db_context: Option<String>,
}

impl PlacementConfig {
    pub fn new(layout: ProjectLayout, placement: Placement, migration: MigrationSettings) -> Self {
        Self {
            layout,
            placement,
            migration,
            db_context: None,
        }
    }

    pub fn with_db_context(mut self, db_context: impl Into<String>) -> Self {
        self.db_context = Some(db_context.into());
        self
    }

    /// The configured persistence context, or `<Company>Context`.
    pub fn db_context_name(&self) -> Result<String, DomainError> {
        match &self.db_context {
            Some(name) => Ok(name.clone()),
            None => Ok(format!("{}Context", self.layout.company()?)),
        }
    }
}
