//! Forward-only schema migration for the model's table.

use std::path::PathBuf;

use super::{ArtifactGenerator, GenerationError, SetBuilder, code::CodeBuilder, cs};
use crate::domain::{
    ArtifactSet, IdType, Layer, MigrationSettings, PlacementConfig, StructuralModel, naming,
    sql_type,
};

const AUDIT_COLUMNS: [(&str, &str); 4] = [
    ("CreateUserId", "TEXT"),
    ("CreateDate", "TIMESTAMP NOT NULL"),
    ("ModifyUserId", "TEXT"),
    ("ModifyDate", "TIMESTAMP"),
];

const NAME_WIDTH: usize = 22;

pub struct MigrationGenerator;

impl ArtifactGenerator for MigrationGenerator {
    fn layer(&self) -> Layer {
        Layer::Migration
    }

    fn output_root(
        &self,
        _model: &StructuralModel,
        config: &PlacementConfig,
    ) -> Result<PathBuf, GenerationError> {
        let data = config
            .layout
            .project_dir("Data")
            .map_err(|e| GenerationError::path_resolution(Layer::Migration, config, e))?;
        Ok(data.join("DbScripts"))
    }

    fn generate(
        &self,
        model: &StructuralModel,
        config: &PlacementConfig,
    ) -> Result<ArtifactSet, GenerationError> {
        validate_settings(&config.migration)?;
        let err = |e| GenerationError::path_resolution(Layer::Migration, config, e);
        let root_ns = config.layout.root_namespace().map_err(err)?;
        let company = config.layout.company().map_err(err)?;

        let mut set = SetBuilder::new(Layer::Migration, self.output_root(model, config)?);
        set.file(
            &[&cs(&config.migration.class_name())],
            render_migration(&root_ns, &company, &config.migration, model),
        )?;
        set.finish()
    }
}

/// The developer tag and date end up in a class name and an attribute, so
/// they must be identifier-safe.
fn validate_settings(settings: &MigrationSettings) -> Result<(), GenerationError> {
    let render = |reason: String| GenerationError::Render {
        layer: Layer::Migration,
        reason,
    };
    if settings.developer.is_empty()
        || !settings
            .developer
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(render(format!(
            "developer name '{}' must be non-empty and contain only letters, digits or '_'",
            settings.developer
        )));
    }
    if settings.script_date.is_empty() || !settings.script_date.chars().all(|c| c.is_ascii_digit())
    {
        return Err(render(format!(
            "script date '{}' must be digits in the form yyyyMMddHHmm",
            settings.script_date
        )));
    }
    Ok(())
}

fn quoted(name: &str) -> String {
    format!("\"\"{name}\"\"")
}

fn column(name: &str, definition: &str) -> String {
    format!("{:<width$}{definition}", quoted(name), width = NAME_WIDTH)
}

fn audit_columns() -> impl Iterator<Item = String> {
    AUDIT_COLUMNS.iter().map(|(name, def)| column(name, def))
}

/// Column and constraint entries of the main table, in output order.
pub fn table_entries(model: &StructuralModel, cascade_parent: &str) -> Vec<String> {
    let table = model.plural();
    let mut entries = vec![column(
        "Id",
        &format!(
            "{} NOT NULL CONSTRAINT {} PRIMARY KEY",
            model.id_type().sql_type(),
            quoted(&format!("PK_{table}"))
        ),
    )];

    for property in model.properties() {
        let null = if property.is_nullable() { "" } else { " NOT NULL" };
        entries.push(column(
            &property.name,
            &format!("{}{null}", sql_type(&property.type_name)),
        ));
    }

    // Navigations whose key column is not declared still need one.
    for navigation in model.navigations() {
        let fk = navigation.foreign_key();
        if !model.properties().iter().any(|p| p.name == fk) {
            entries.push(column(&fk, IdType::default().sql_type()));
        }
    }

    if model.is_audited() {
        entries.extend(audit_columns());
    }

    for navigation in model.navigations() {
        let related = naming::pluralize(&navigation.related_type);
        let cascade = if navigation.related_type == cascade_parent {
            " ON DELETE CASCADE"
        } else {
            ""
        };
        entries.push(format!(
            "CONSTRAINT {}\n    FOREIGN KEY ({})\n    REFERENCES public.{} ({}){cascade}",
            quoted(&format!("FK_{table}_{related}_{}", navigation.name)),
            quoted(&navigation.foreign_key()),
            quoted(&related),
            quoted("Id"),
        ));
    }
    entries
}

/// Entries of the `<M>Languages` translation table.
pub fn language_table_entries(model: &StructuralModel) -> Vec<String> {
    let table = model.plural();
    let language_table = naming::pluralize(&model.language_type());
    let mut entries = vec![
        column(
            "CoreId",
            &format!(
                "{} NOT NULL CONSTRAINT {}\n    REFERENCES public.{} ({}) ON DELETE CASCADE",
                model.id_type().sql_type(),
                quoted(&format!("FK_{language_table}_{table}_CoreId")),
                quoted(table),
                quoted("Id"),
            ),
        ),
        column("Language", "TEXT NOT NULL"),
        column("Name", "TEXT NOT NULL"),
        column("Description", "TEXT"),
    ];
    if model.is_audited() {
        entries.extend(audit_columns());
    }
    entries.push(format!(
        "CONSTRAINT {} PRIMARY KEY ({}, {})",
        quoted(&format!("PK_{language_table}")),
        quoted("CoreId"),
        quoted("Language"),
    ));
    entries
}

fn create_table(code: &mut CodeBuilder, table: &str, entries: &[String]) {
    code.line(format!(
        "Execute.Sql(@\"CREATE TABLE IF NOT EXISTS public.{}",
        quoted(table)
    ));
    code.indented(|c| {
        c.line("(");
        c.indented(|c| {
            let body = entries.join(",\n");
            for line in body.lines() {
                c.line(line);
            }
        });
        c.line(");");
    });
    code.line("\");");
}

pub fn render_migration(
    root_ns: &str,
    company: &str,
    settings: &MigrationSettings,
    model: &StructuralModel,
) -> String {
    let mut code = CodeBuilder::new();
    code.usings(["FluentMigrator"]);
    code.namespace(format!("{root_ns}.Data.DbScripts"));
    code.line(format!("[Tags(\"{company}\")]"));
    code.line(format!("[Migration({})]", settings.script_date));
    code.open(format!(
        "public class {} : ForwardOnlyMigration",
        settings.class_name()
    ));
    code.open("public override void Up()");

    create_table(
        &mut code,
        model.plural(),
        &table_entries(model, &settings.cascade_parent),
    );
    if model.has_multi_language() {
        code.blank();
        create_table(
            &mut code,
            &naming::pluralize(&model.language_type()),
            &language_table_entries(model),
        );
    }

    code.close();
    code.close();
    code.finish()
}
