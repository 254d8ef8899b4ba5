//! NUnit fixture for the generated domain service.
//!
//! Written from [`DomainServiceShape`], the same value the domain generator
//! renders the service from.

use std::path::PathBuf;

use super::{
    ArtifactGenerator, GenerationError, SetBuilder,
    code::CodeBuilder,
    cs,
    domain_layer::DomainNamespaces,
    shape::{DomainServiceShape, Setter, TRANSLATION_COLLECTION},
};
use crate::domain::{ArtifactSet, Layer, PlacementConfig, StructuralModel};

pub struct UnitTestGenerator;

impl ArtifactGenerator for UnitTestGenerator {
    fn layer(&self) -> Layer {
        Layer::UnitTest
    }

    fn output_root(
        &self,
        model: &StructuralModel,
        config: &PlacementConfig,
    ) -> Result<PathBuf, GenerationError> {
        let project = config
            .layout
            .unit_test_project_dir()
            .map_err(|e| GenerationError::path_resolution(Layer::UnitTest, config, e))?;
        Ok(project
            .join(config.layout.anchor())
            .join(model.plural())
            .join("Implementations"))
    }

    fn generate(
        &self,
        model: &StructuralModel,
        config: &PlacementConfig,
    ) -> Result<ArtifactSet, GenerationError> {
        let domain = DomainNamespaces::resolve(model, config).map_err(|e| match e {
            GenerationError::PathResolution { path, reason, .. } => GenerationError::PathResolution {
                layer: Layer::UnitTest,
                path,
                reason,
            },
            other => other,
        })?;
        let test_project = config
            .layout
            .unit_test_project_name()
            .map_err(|e| GenerationError::path_resolution(Layer::UnitTest, config, e))?;
        let namespace = format!(
            "{test_project}.{}.{}.Implementations",
            config.layout.anchor(),
            model.plural()
        );
        let shape = DomainServiceShape::from_model(model);

        let mut set = SetBuilder::new(Layer::UnitTest, self.output_root(model, config)?);
        set.file(
            &[&cs(&format!("{}DomainServiceTest", model.name()))],
            render_test_fixture(&domain, &namespace, &shape),
        )?;
        set.finish()
    }
}

/// Literal used to exercise a parameter of type `type_name`.
pub fn sample_value(type_name: &str) -> String {
    if type_name == TRANSLATION_COLLECTION {
        return "new List<TranslationModel>\n{\n    new()\n    {\n        Value = \"Test\",\n        Language = \"tr\",\n    }\n}".into();
    }
    match type_name.trim_end_matches('?') {
        "bool" => "true".into(),
        "int" | "long" | "short" | "byte" => "1".into(),
        "decimal" => "1m".into(),
        "double" => "1d".into(),
        "float" => "1f".into(),
        "Guid" => "Guid.NewGuid()".into(),
        "string" => "\"Test\"".into(),
        "DateTime" => "DateTime.Today".into(),
        _ => format!("default({type_name})"),
    }
}

/// `var <name> = <value>;`, keeping multi-line values aligned.
fn declare(code: &mut CodeBuilder, name: &str, type_name: &str) {
    let value = sample_value(type_name);
    let mut lines = value.lines();
    let first = lines.next().unwrap_or_default();
    let rest: Vec<&str> = lines.collect();
    if rest.is_empty() {
        code.line(format!("var {name} = {first};"));
        return;
    }
    code.line(format!("var {name} = {first}"));
    let last = rest.len() - 1;
    for (i, line) in rest.into_iter().enumerate() {
        if i == last {
            code.line(format!("{line};"));
        } else {
            code.line(line);
        }
    }
}

pub fn render_test_fixture(
    domain: &DomainNamespaces,
    namespace: &str,
    shape: &DomainServiceShape,
) -> String {
    let m = &shape.model;
    let service = format!("_{}DomainService", crate::domain::naming::lower_first(m));

    let mut code = CodeBuilder::new();
    code.usings([
        "System.Linq.Expressions".to_string(),
        domain.model.clone(),
        domain.contacts(),
        domain.implementations(),
        format!("{}.Models", domain.project),
        format!("{}.Repositories", domain.project),
        format!("{}.Specifications.Contacts", domain.project),
        "Moq".to_string(),
        "NUnit.Framework".to_string(),
    ]);
    code.namespace(namespace);
    code.line("[TestFixture]");
    code.open(format!("public class {m}DomainServiceTest"));
    code.line(format!("private I{m}DomainService {service};"));
    code.line(format!("private Mock<I{m}Specification> _mock{m}Specification;"));
    code.line("private Mock<IGenericQueryRepository> _mockGenericQueryRepo;");
    code.line("private Mock<IGenericSpecification> _mockGenericSpecification;");
    code.blank();
    code.line("[SetUp]");
    code.open("public void SetUp()");
    code.line(format!("{service} = new {m}DomainService();"));
    code.line(format!("_mock{m}Specification = new Mock<I{m}Specification>();"));
    code.line("_mockGenericQueryRepo = new Mock<IGenericQueryRepository>();");
    code.line("_mockGenericSpecification = new Mock<IGenericSpecification>();");
    code.close();

    for setter in &shape.setters {
        code.blank();
        render_setter_test(&mut code, shape, &service, setter);
    }
    if let Some(setter) = &shape.translation_setter {
        code.blank();
        render_translation_test(&mut code, shape, &service, setter);
    }
    code.blank();
    render_create_test(&mut code, shape, &service);

    code.close();
    code.finish()
}

fn render_setter_test(code: &mut CodeBuilder, shape: &DomainServiceShape, service: &str, setter: &Setter) {
    let target = &shape.target.name;
    code.line("[Test]");
    code.open(format!(
        "public void {}_WhenCalled_SetThe{}()",
        setter.method, setter.member
    ));
    code.line(format!("var {target} = {}.CreateTest();", shape.model));
    declare(code, &setter.value.name, &setter.value.type_name);
    code.line(format!(
        "{service}.{}({target}, {});",
        setter.method, setter.value.name
    ));
    code.line(format!(
        "Assert.That({target}.{}, Is.EqualTo({}));",
        setter.member, setter.value.name
    ));
    code.close();
}

fn render_translation_test(
    code: &mut CodeBuilder,
    shape: &DomainServiceShape,
    service: &str,
    setter: &Setter,
) {
    let m = &shape.model;
    let target = &shape.target.name;
    let names = &setter.value.name;

    code.line("[Test]");
    code.open(format!(
        "public void {}_WhenCalled_SetThe{}Translations()",
        setter.method, setter.member
    ));
    code.line(format!("var {target} = {m}.CreateTest();"));
    declare(code, names, &setter.value.type_name);
    code.blank();
    code.line("_mockGenericSpecification");
    code.indented(|c| {
        c.line(format!(".Setup(x => x.IsUndeleted<{m}>())"));
        c.line(".Returns(x => x.IsDeleted);");
    });
    code.line("_mockGenericQueryRepo");
    code.indented(|c| {
        c.line(".Setup(x => x.GetFromCacheAsync(It.IsAny<string>(),");
        c.indented(|c| {
            c.line("It.IsAny<string>(),");
            c.line(format!("It.IsAny<Expression<Func<{m}, bool>>>()))"));
        });
        c.line(format!(".ReturnsAsync(new List<{m}>());"));
    });
    code.line(format!("{service} = new {m}DomainService"));
    code.line("{");
    code.indented(|c| {
        c.line(format!(
            "{m}Specifications = new {m}Specification {{ GenericSpecification = _mockGenericSpecification.Object }},"
        ));
        c.line("GenericQueryRepository = _mockGenericQueryRepo.Object");
    });
    code.line("};");
    code.blank();
    code.line(format!("{service}.{}({target}, {names});", setter.method));
    code.blank();
    code.line(format!("Assert.That({target}.Translations"));
    code.indented(|c| {
        c.line(format!(
            ".Select(s => new TranslationModel {{ Language = s.Language, Value = s.{} }}),",
            setter.member
        ));
        c.line(format!("Is.EqualTo({names}));"));
    });
    code.close();
}

fn render_create_test(code: &mut CodeBuilder, shape: &DomainServiceShape, service: &str) {
    code.line("[Test]");
    code.open("public void Create_WhenCalled_ReturnsNewEntity()");
    for param in &shape.create_parameters {
        declare(code, &param.name, &param.type_name);
    }
    if !shape.create_parameters.is_empty() {
        code.blank();
    }
    code.line(format!(
        "var result = {service}.Create({});",
        shape.create_arguments()
    ));
    code.blank();
    code.line("Assert.Multiple(() =>");
    code.line("{");
    code.indented(|c| {
        c.line("Assert.That(result, Is.Not.Null);");
        for setter in &shape.setters {
            c.line(format!(
                "Assert.That(result.{}, Is.EqualTo({}));",
                setter.member, setter.value.name
            ));
        }
        if let Some(setter) = &shape.translation_setter {
            c.line(format!(
                "Assert.That(result.Translations, Has.Count.EqualTo({}.Count));",
                setter.value.name
            ));
        }
    });
    code.line("});");
    code.close();
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use regex::Regex;

    use super::*;
    use crate::application::generators::{DomainGenerator, fixtures, shape::Parameter};
    use crate::domain::{ModelName, Property};

    static SETTER: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"public void (Set\w+)\(\w+ \w+, ([^)]+?) (@?\w+)\)").expect("setter pattern")
    });
    static CREATE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"public \w+ Create\(([^)]*)\)").expect("create pattern"));

    /// Recover setter names and create parameters from rendered service text.
    fn scan_service(text: &str) -> (Vec<String>, Vec<Parameter>) {
        let setters = SETTER
            .captures_iter(text)
            .map(|c| c[1].to_string())
            .collect();
        let create = CREATE
            .captures(text)
            .map(|c| {
                c[1].split(", ")
                    .filter(|p| !p.is_empty())
                    .filter_map(|p| p.rsplit_once(' '))
                    .map(|(ty, name)| Parameter::new(ty, name))
                    .collect()
            })
            .unwrap_or_default();
        (setters, create)
    }

    fn fixture_text(model: &StructuralModel) -> String {
        let set = UnitTestGenerator
            .generate(model, &fixtures::shared())
            .unwrap();
        set.files().next().unwrap().content.clone()
    }

    #[test]
    fn lands_in_the_unit_test_project() {
        let set = UnitTestGenerator
            .generate(&fixtures::category(), &fixtures::shared())
            .unwrap();
        assert_eq!(
            set.file_paths(),
            vec![PathBuf::from(
                "/repo/test/Unit/Bapsis.Domain.Unit.Test/AggregateRoots/Categories/Implementations/CategoryDomainServiceTest.cs"
            )]
        );
        let text = &set.files().next().unwrap().content;
        assert!(text.contains(
            "namespace Bapsis.Domain.Unit.Test.AggregateRoots.Categories.Implementations;"
        ));
        assert!(text.contains("using Bapsis.Api.Domain.AggregateRoots.Categories.Contacts;"));
    }

    #[test]
    fn generated_service_matches_the_shared_shape() {
        let model = fixtures::category();
        let shape = DomainServiceShape::from_model(&model);
        let domain = DomainGenerator
            .generate(&model, &fixtures::shared())
            .unwrap();
        let service = &domain
            .file("Implementations/CategoryDomainService.cs")
            .unwrap()
            .content;

        let (setters, create) = scan_service(service);
        let expected: Vec<String> = shape.all_setters().map(|s| s.method.clone()).collect();
        assert_eq!(setters, expected);
        assert_eq!(create, shape.create_parameters);
    }

    #[test]
    fn one_test_per_setter_plus_create_and_translation() {
        let text = fixture_text(&fixtures::category());
        assert_eq!(text.matches("[Test]").count(), 5);
        assert!(text.contains("public void SetTitle_WhenCalled_SetTheTitle()"));
        assert!(text.contains("public void SetIsActive_WhenCalled_SetTheIsActive()"));
        assert!(text.contains("public void SetNameTranslations_WhenCalled_SetTheNameTranslations()"));
        assert!(text.contains("public void Create_WhenCalled_ReturnsNewEntity()"));
    }

    #[test]
    fn setter_test_uses_typed_sample_values() {
        let text = fixture_text(&fixtures::category());
        assert!(text.contains("        var title = \"Test\";\n"));
        assert!(text.contains("        var order = 1;\n"));
        assert!(text.contains("        var isActive = true;\n"));
        assert!(text.contains("        _categoryDomainService.SetTitle(category, title);\n"));
        assert!(text.contains("        Assert.That(category.Title, Is.EqualTo(title));\n"));
    }

    #[test]
    fn translation_test_mocks_collaborators() {
        let text = fixture_text(&fixtures::category());
        assert!(text.contains(".Setup(x => x.IsUndeleted<Category>())"));
        assert!(text.contains(".ReturnsAsync(new List<Category>());"));
        assert!(text.contains(
            "CategorySpecifications = new CategorySpecification { GenericSpecification = _mockGenericSpecification.Object },"
        ));
        assert!(text.contains("        var names = new List<TranslationModel>\n        {\n"));
    }

    #[test]
    fn create_test_passes_every_parameter() {
        let text = fixture_text(&fixtures::category());
        assert!(text.contains(
            "var result = _categoryDomainService.Create(title, order, isActive, names);"
        ));
        assert!(text.contains("Assert.That(result.Translations, Has.Count.EqualTo(names.Count));"));
    }

    #[test]
    fn plain_model_has_no_translation_test() {
        let model = StructuralModel::builder(ModelName::new("Category").unwrap())
            .property(Property::new("Budget", "decimal"))
            .property(Property::new("Status", "TaskStatus"))
            .build();
        let text = fixture_text(&model);
        assert!(!text.contains("Translations"));
        assert!(text.contains("var budget = 1m;"));
        assert!(text.contains("var status = default(TaskStatus);"));
    }

    #[test]
    fn sample_values_cover_common_types() {
        assert_eq!(sample_value("Guid?"), "Guid.NewGuid()");
        assert_eq!(sample_value("DateTime"), "DateTime.Today");
        assert_eq!(sample_value("long"), "1");
        assert!(sample_value(TRANSLATION_COLLECTION).starts_with("new List<TranslationModel>"));
    }
}
