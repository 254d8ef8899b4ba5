//! Command and query repositories in the data project.

use std::path::PathBuf;

use super::{ArtifactGenerator, GenerationError, SetBuilder, code::CodeBuilder, cs};
use crate::domain::{ArtifactSet, Layer, PlacementConfig, StructuralModel};

pub struct RepositoryGenerator;

struct RepositoryNames {
    /// Namespace of the aggregate, e.g. `Bapsis.Api.Domain.AggregateRoots.Categories`.
    aggregate: String,
    /// Namespace of the repositories, e.g. `Bapsis.Api.Data.Repositories.Categories`.
    repositories: String,
    db_context: String,
}

impl RepositoryGenerator {
    fn names(
        model: &StructuralModel,
        config: &PlacementConfig,
    ) -> Result<RepositoryNames, GenerationError> {
        let err = |e| GenerationError::path_resolution(Layer::Repository, config, e);
        let layout = &config.layout;
        Ok(RepositoryNames {
            aggregate: format!("{}.{}", layout.domain_namespace().map_err(err)?, model.plural()),
            repositories: format!(
                "{}.Data.Repositories.{}",
                layout.root_namespace().map_err(err)?,
                model.plural()
            ),
            db_context: config.db_context_name().map_err(err)?,
        })
    }
}

impl ArtifactGenerator for RepositoryGenerator {
    fn layer(&self) -> Layer {
        Layer::Repository
    }

    fn output_root(
        &self,
        model: &StructuralModel,
        config: &PlacementConfig,
    ) -> Result<PathBuf, GenerationError> {
        let data = config
            .layout
            .project_dir("Data")
            .map_err(|e| GenerationError::path_resolution(Layer::Repository, config, e))?;
        Ok(data.join("Repositories").join(model.plural()))
    }

    fn generate(
        &self,
        model: &StructuralModel,
        config: &PlacementConfig,
    ) -> Result<ArtifactSet, GenerationError> {
        let names = Self::names(model, config)?;
        let m = model.name();

        let mut set = SetBuilder::new(Layer::Repository, self.output_root(model, config)?);
        for kind in ["Command", "Query"] {
            set.file(
                &[&cs(&format!("{m}{kind}Repository"))],
                render_repository(&names.aggregate, &names.repositories, &names.db_context, m, kind),
            )?;
        }
        set.finish()
    }
}

/// `<M>CommandRepository` / `<M>QueryRepository` bound to `db_context`.
pub fn render_repository(
    aggregate_ns: &str,
    repository_ns: &str,
    db_context: &str,
    model: &str,
    kind: &str,
) -> String {
    let class = format!("{model}{kind}Repository");
    let mut code = CodeBuilder::new();
    code.usings([aggregate_ns.to_string(), format!("{aggregate_ns}.Contacts")]);
    code.namespace(repository_ns);
    code.open(format!(
        "public class {class} : {kind}RepositoryBase<{db_context}, {model}>, I{class}"
    ));
    code.line("#region ctor");
    code.line(format!(
        "public {class}({db_context} dbContext) : base(dbContext) {{ }}"
    ));
    code.line("#endregion");
    code.close();
    code.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generators::fixtures;

    #[test]
    fn repositories_land_in_the_data_project() {
        let set = RepositoryGenerator
            .generate(&fixtures::category(), &fixtures::shared())
            .unwrap();
        assert_eq!(
            set.root(),
            std::path::Path::new("/repo/src/Bapsis.Api.Data/Repositories/Categories")
        );
        assert_eq!(set.file_count(), 2);

        let command = &set.file("CategoryCommandRepository.cs").unwrap().content;
        assert!(command.contains("namespace Bapsis.Api.Data.Repositories.Categories;"));
        assert!(command.contains(
            "public class CategoryCommandRepository : CommandRepositoryBase<BapsisContext, Category>, ICategoryCommandRepository"
        ));
        assert!(command.contains("using Bapsis.Api.Domain.AggregateRoots.Categories.Contacts;"));
    }

    #[test]
    fn db_context_override_is_used() {
        let config = fixtures::shared().with_db_context("CampusContext");
        let set = RepositoryGenerator
            .generate(&fixtures::category(), &config)
            .unwrap();
        let query = &set.file("CategoryQueryRepository.cs").unwrap().content;
        assert!(query.contains("public CategoryQueryRepository(CampusContext dbContext) : base(dbContext) { }"));
    }
}
