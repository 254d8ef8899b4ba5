//! Aggregate-root contracts and implementations, written next to the model.

use std::path::PathBuf;

use tracing::debug;

use super::{ArtifactGenerator, GenerationError, SetBuilder, code::CodeBuilder, cs, shape::DomainServiceShape};
use crate::domain::{ArtifactSet, Layer, PlacementConfig, StructuralModel};

/// Namespaces the domain templates refer to.
#[derive(Debug, Clone)]
pub struct DomainNamespaces {
    /// The domain project, e.g. `Bapsis.Api.Domain`.
    pub project: String,
    /// The model's own namespace, e.g. `Bapsis.Api.Domain.AggregateRoots.Categories`.
    pub model: String,
}

impl DomainNamespaces {
    pub fn resolve(model: &StructuralModel, config: &PlacementConfig) -> Result<Self, GenerationError> {
        let layout = &config.layout;
        let err = |e| GenerationError::path_resolution(Layer::Domain, config, e);
        Ok(Self {
            project: layout.domain_project_name().map_err(err)?,
            model: format!("{}.{}", layout.domain_namespace().map_err(err)?, model.plural()),
        })
    }

    pub fn contacts(&self) -> String {
        format!("{}.Contacts", self.model)
    }

    pub fn implementations(&self) -> String {
        format!("{}.Implementations", self.model)
    }
}

pub struct DomainGenerator;

impl ArtifactGenerator for DomainGenerator {
    fn layer(&self) -> Layer {
        Layer::Domain
    }

    fn output_root(
        &self,
        _model: &StructuralModel,
        config: &PlacementConfig,
    ) -> Result<PathBuf, GenerationError> {
        Ok(config.layout.model_dir().to_path_buf())
    }

    fn generate(
        &self,
        model: &StructuralModel,
        config: &PlacementConfig,
    ) -> Result<ArtifactSet, GenerationError> {
        let ns = DomainNamespaces::resolve(model, config)?;
        let shape = DomainServiceShape::from_model(model);
        let m = model.name();

        let mut set = SetBuilder::new(Layer::Domain, self.output_root(model, config)?);
        set.directory(&["Contacts"])?;
        set.directory(&["Implementations"])?;

        set.file(
            &["Contacts", &cs(&format!("I{m}CommandRepository"))],
            render_repository_contract(&ns, m, "Command"),
        )?;
        set.file(
            &["Contacts", &cs(&format!("I{m}QueryRepository"))],
            render_repository_contract(&ns, m, "Query"),
        )?;
        set.file(
            &["Contacts", &cs(&format!("I{m}Specification"))],
            render_specification_contract(&ns, model),
        )?;
        set.file(
            &["Contacts", &cs(&format!("I{m}DomainService"))],
            render_domain_service_contract(&ns, &shape),
        )?;
        set.file(
            &["Implementations", &cs(&format!("{m}DomainService"))],
            render_domain_service(&ns, &shape),
        )?;
        set.file(
            &["Implementations", &cs(&format!("{m}Specification"))],
            render_specification(&ns, model),
        )?;

        if model.has_multi_language() {
            debug!(model = m, "adding language entity");
            set.file(&[&cs(&model.language_type())], render_language_entity(&ns, model))?;
        }

        set.finish()
    }
}

/// `I<M>CommandRepository` / `I<M>QueryRepository`; `kind` is `Command` or `Query`.
pub fn render_repository_contract(ns: &DomainNamespaces, model: &str, kind: &str) -> String {
    let mut code = CodeBuilder::new();
    code.usings([format!("{}.Repositories", ns.project)]);
    code.namespace(ns.contacts());
    code.line(format!(
        "public interface I{model}{kind}Repository : I{kind}Repository<{model}> {{ }}"
    ));
    code.finish()
}

pub fn render_specification_contract(ns: &DomainNamespaces, model: &StructuralModel) -> String {
    let m = model.name();
    let mut code = CodeBuilder::new();
    code.usings([
        "System.Linq.Expressions".to_string(),
        format!("{}.Specifications.Contacts", ns.project),
    ]);
    code.namespace(ns.contacts());
    code.open(format!("public interface I{m}Specification : IBaseSpecification<{m}>"));
    code.line(format!(
        "Expression<Func<{m}, bool>> ById({} id);",
        model.id_type()
    ));
    code.close();
    code.finish()
}

pub fn render_specification(ns: &DomainNamespaces, model: &StructuralModel) -> String {
    let m = model.name();
    let id = model.id_type();
    let mut code = CodeBuilder::new();
    code.usings([
        "System.Linq.Expressions".to_string(),
        ns.contacts(),
        format!("{}.Specifications.Implementations", ns.project),
    ]);
    code.namespace(ns.implementations());
    code.open(format!(
        "public class {m}Specification : BaseSpecification<{m}>, I{m}Specification"
    ));
    code.line(format!(
        "public Expression<Func<{m}, bool>> ById({id} id) => GenericSpecification.ById<{m}, {id}>(id);"
    ));
    code.close();
    code.finish()
}

pub fn render_domain_service_contract(ns: &DomainNamespaces, shape: &DomainServiceShape) -> String {
    let m = &shape.model;
    let mut code = CodeBuilder::new();
    code.usings([
        format!("{}.DomainServices.Contacts", ns.project),
        format!("{}.Models", ns.project),
    ]);
    code.namespace(ns.contacts());
    code.open(format!("public interface I{m}DomainService : IBaseDomainService"));
    code.region("setters", |c| {
        for (i, setter) in shape.all_setters().enumerate() {
            if i > 0 {
                c.blank();
            }
            c.line(format!("{};", shape.setter_signature(setter)));
        }
    });
    code.blank();
    code.region("create", |c| {
        c.line(format!("{};", shape.create_signature()));
    });
    code.close();
    code.finish()
}

pub fn render_domain_service(ns: &DomainNamespaces, shape: &DomainServiceShape) -> String {
    let m = &shape.model;
    let target = &shape.target.name;
    let mut code = CodeBuilder::new();
    code.usings([
        ns.contacts(),
        format!("{}.DomainServices.Implementations", ns.project),
        format!("{}.Extensions", ns.project),
        format!("{}.Models", ns.project),
    ]);
    code.namespace(ns.implementations());
    code.open(format!(
        "public class {m}DomainService : BaseDomainService, I{m}DomainService"
    ));

    code.region("injections", |c| {
        c.line(format!("public I{m}QueryRepository {m}QueryRepository {{ get; set; }}"));
        c.line(format!("public I{m}Specification {m}Specifications {{ get; set; }}"));
    });
    code.blank();

    code.region("setters", |c| {
        for (i, setter) in shape.setters.iter().enumerate() {
            if i > 0 {
                c.blank();
            }
            c.line(format!(
                "public {} => {target}.{}({});",
                shape.setter_signature(setter),
                setter.method,
                setter.value.name
            ));
        }
        if let Some(setter) = &shape.translation_setter {
            if !shape.setters.is_empty() {
                c.blank();
            }
            c.open(format!("public {}", shape.setter_signature(setter)));
            c.line(format!(
                "{target}.Translations = {target}.Translations.SetTranslations("
            ));
            c.indented(|c| {
                c.line(format!("{target}.Id,"));
                c.line(format!("{},", setter.value.name));
                c.line("t => t.CoreId,");
                c.line("t => t.Language,");
                c.line(format!("nameof({m}Language.{}),", setter.member));
                c.line(format!(
                    "(id, language, value) => new {m}Language {{ CoreId = id, Language = language, {} = value }}",
                    setter.member
                ));
            });
            c.line(");");
            c.close();
        }
    });
    code.blank();

    code.region("create", |c| {
        c.open(format!("public {}", shape.create_signature()));
        c.line(format!("var {target} = {m}.Create();"));
        for setter in shape.all_setters() {
            c.line(format!("{}({target}, {});", setter.method, setter.value.name));
        }
        c.line(format!("return {target};"));
        c.close();
    });

    code.close();
    code.finish()
}

pub fn render_language_entity(ns: &DomainNamespaces, model: &StructuralModel) -> String {
    let m = model.name();
    let mut code = CodeBuilder::new();
    code.usings(["Abis.Core.DataAccess"]);
    code.namespace(&ns.model);
    code.open(format!(
        "public class {} : AuditEntity, IEntityTranslation<{m}>",
        model.language_type()
    ));
    code.line(format!("public {} CoreId {{ get; set; }}", model.id_type()));
    code.line("public string Language { get; set; }");
    code.line(format!("public virtual {m} Core {{ get; set; }}"));
    code.blank();
    code.line("public string Name { get; set; }");
    code.line("public string Description { get; set; }");
    code.close();
    code.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generators::fixtures;
    use crate::domain::{IdType, ModelName, Property};

    fn generate(model: &StructuralModel) -> ArtifactSet {
        DomainGenerator.generate(model, &fixtures::shared()).unwrap()
    }

    #[test]
    fn writes_contracts_and_implementations_beside_the_model() {
        let set = generate(&fixtures::category());
        assert_eq!(
            set.root(),
            std::path::Path::new("/repo/src/Bapsis.Api.Domain/AggregateRoots/Categories")
        );
        for path in [
            "Contacts/ICategoryCommandRepository.cs",
            "Contacts/ICategoryQueryRepository.cs",
            "Contacts/ICategorySpecification.cs",
            "Contacts/ICategoryDomainService.cs",
            "Implementations/CategoryDomainService.cs",
            "Implementations/CategorySpecification.cs",
            "CategoryLanguage.cs",
        ] {
            assert!(set.file(path).is_some(), "missing {path}");
        }
        assert_eq!(set.directories().count(), 2);
    }

    #[test]
    fn language_entity_only_for_multi_language_models() {
        let plain = StructuralModel::builder(ModelName::new("Campus").unwrap())
            .property(Property::new("Code", "string"))
            .build();
        let set = DomainGenerator
            .generate(
                &plain,
                &fixtures::config(
                    "/repo/src/Bapsis.Api.Domain/AggregateRoots/Campuses/Campus.cs",
                    crate::domain::Placement::Shared,
                ),
            )
            .unwrap();
        assert!(set.file("CampusLanguage.cs").is_none());
        let service = &set.file("Contacts/ICampusDomainService.cs").unwrap().content;
        assert!(!service.contains("SetNameTranslations"));
        assert!(service.contains("Campus Create(string code);"));
    }

    #[test]
    fn repository_contract_uses_domain_namespaces() {
        let set = generate(&fixtures::category());
        let content = &set.file("Contacts/ICategoryCommandRepository.cs").unwrap().content;
        assert_eq!(
            content,
            "using Bapsis.Api.Domain.Repositories;\n\n\
             namespace Bapsis.Api.Domain.AggregateRoots.Categories.Contacts;\n\n\
             public interface ICategoryCommandRepository : ICommandRepository<Category> { }\n"
        );
    }

    #[test]
    fn specification_uses_detected_id_type() {
        let model = StructuralModel::builder(ModelName::new("Category").unwrap())
            .id_type(IdType::new("Guid"))
            .build();
        let set = generate(&model);
        let spec = &set.file("Implementations/CategorySpecification.cs").unwrap().content;
        assert!(spec.contains("ById(Guid id) => GenericSpecification.ById<Category, Guid>(id);"));
        let contract = &set.file("Contacts/ICategorySpecification.cs").unwrap().content;
        assert!(contract.contains("Expression<Func<Category, bool>> ById(Guid id);"));
    }

    #[test]
    fn domain_service_delegates_setters_and_builds_in_create() {
        let set = generate(&fixtures::category());
        let service = &set.file("Implementations/CategoryDomainService.cs").unwrap().content;

        assert!(service.contains(
            "public void SetTitle(Category category, string title) => category.SetTitle(title);"
        ));
        assert!(service.contains("public ICategoryQueryRepository CategoryQueryRepository { get; set; }"));
        assert!(service.contains(
            "public Category Create(string title, int? order, bool isActive, ICollection<TranslationModel> names)"
        ));
        assert!(service.contains("        var category = Category.Create();\n"));
        assert!(service.contains("        SetNameTranslations(category, names);\n        return category;\n"));
        assert!(service.contains("nameof(CategoryLanguage.Name),"));
    }

    #[test]
    fn language_entity_back_reference_uses_id_type() {
        let model = StructuralModel::builder(ModelName::new("Category").unwrap())
            .id_type(IdType::new("long"))
            .multi_language(true)
            .build();
        let set = generate(&model);
        let language = &set.file("CategoryLanguage.cs").unwrap().content;
        assert!(language.contains("public class CategoryLanguage : AuditEntity, IEntityTranslation<Category>"));
        assert!(language.contains("public long CoreId { get; set; }"));
        assert!(language.contains("public string Description { get; set; }"));
    }
}
