//! End-to-end runs of the generation pipeline against the in-memory adapter.

use std::path::Path;

use stratum_adapters::MemoryFilesystem;
use stratum_core::domain::DomainError;
use stratum_core::prelude::*;

fn read(fs: &MemoryFilesystem, path: &str) -> String {
    fs.read_file(path)
        .unwrap_or_else(|| panic!("no file at {path}"))
}

const SRC: &str = "/work/src";
const CATEGORY_PATH: &str = "/work/src/Bapsis.Api.Domain/AggregateRoots/Categories/Category.cs";
const CATEGORY: &str = r#"
namespace Bapsis.Api.Domain.AggregateRoots.Categories;

public class Category : AuditEntity<int>, IMultiLanguageEntity<CategoryLanguage>, IAggregateRoot
{
    public int Id { get; set; }
    public string Title { get; private set; }
    public int? Order { get; private set; }
    public bool IsActive { get; private set; }
    public DateTime CreateDate { get; set; }
    public string ModifyUserId { get; set; }

    public virtual ICollection<CategoryLanguage> Translations { get; set; }
}
"#;

const TASK_PATH: &str = "/work/src/Bapsis.Api.Domain/AggregateRoots/Tasks/Task.cs";
const TASK: &str = r#"
public class Task : Entity<long>, IAggregateRoot
{
    public string Title { get; private set; }
    public int ProjectId { get; private set; }
    public virtual Project Project { get; private set; }
}
"#;

fn migration() -> MigrationSettings {
    MigrationSettings::new("ayse", "202401151030")
}

fn run(fs: &MemoryFilesystem, path: &str, placement: Placement) -> GenerationReport {
    let service = GenerationService::new(Box::new(fs.clone()));
    service
        .generate(&GenerationRequest::new(path, placement, migration()))
        .unwrap()
}

#[test]
fn shared_multi_language_model_generates_every_layer() {
    let fs = MemoryFilesystem::new().with_file(CATEGORY_PATH, CATEGORY);
    let report = run(&fs, CATEGORY_PATH, Placement::Shared);

    assert!(report.is_success());
    assert_eq!(report.plural, "Categories");
    // 7 domain + 2 repository + 9 application + 1 controller + 1 migration + 1 test
    assert_eq!(report.file_count(), 21);

    let contract = read(&fs, &format!(
        "{SRC}/Bapsis.Api.Domain/AggregateRoots/Categories/Contacts/ICategoryDomainService.cs"
    ));
    assert!(contract.contains(
        "Category Create(string title, int? order, bool isActive, ICollection<TranslationModel> names);"
    ));
    assert!(contract.contains("void SetNameTranslations(Category category, ICollection<TranslationModel> names);"));

    let controller = read(&fs, &format!(
        "{SRC}/Bapsis.Api.Http/Controllers/Common/Categories/CategoryController.cs"
    ));
    assert!(controller.contains("CommonsBaseController"));

    let script = read(&fs, &format!("{SRC}/Bapsis.Api.Data/DbScripts/Script_ayse_202401151030.cs"));
    assert!(script.contains("public.\"\"CategoryLanguages\"\""));
}

#[test]
fn identifier_and_audit_fields_never_become_setters() {
    let fs = MemoryFilesystem::new().with_file(CATEGORY_PATH, CATEGORY);
    run(&fs, CATEGORY_PATH, Placement::Shared);

    let service = read(&fs, &format!(
        "{SRC}/Bapsis.Api.Domain/AggregateRoots/Categories/Implementations/CategoryDomainService.cs"
    ));
    for field in ["SetId(", "SetCreateDate(", "SetModifyUserId("] {
        assert!(!service.contains(field), "unexpected {field}");
    }
    let script = read(&fs, &format!("{SRC}/Bapsis.Api.Data/DbScripts/Script_ayse_202401151030.cs"));
    assert_eq!(script.matches("\"\"ModifyUserId\"\"").count(), 2);
}

#[test]
fn module_placement_moves_application_and_controller_only() {
    let fs = MemoryFilesystem::new().with_file(CATEGORY_PATH, CATEGORY);
    run(&fs, CATEGORY_PATH, Placement::Module(ModuleName::ProjectOffice));

    let files = fs.snapshot();
    assert!(files.contains_key(Path::new(&format!(
        "{SRC}/Bapsis.Api.Application/Internal/Modules/ProjectOffice/Categories/Commands/Handlers/Create/CategoryCreateCommand.cs"
    ))));
    let controller = read(&fs, &format!(
        "{SRC}/Bapsis.Api.Http/Controllers/Modules/ProjectOffice/CategoryController.cs"
    ));
    assert!(controller.contains("public class CategoryController : ProjectOfficeBaseController"));
    assert!(files.contains_key(Path::new(&format!(
        "{SRC}/Bapsis.Api.Data/Repositories/Categories/CategoryCommandRepository.cs"
    ))));
    assert!(!files.keys().any(|p| p.to_string_lossy().contains("Commons")));
}

#[test]
fn navigation_to_project_cascades() {
    let fs = MemoryFilesystem::new().with_file(TASK_PATH, TASK);
    let report = run(&fs, TASK_PATH, Placement::Shared);
    assert!(report.is_success());

    let script = read(&fs, &format!("{SRC}/Bapsis.Api.Data/DbScripts/Script_ayse_202401151030.cs"));
    assert!(script.contains("BIGINT NOT NULL CONSTRAINT \"\"PK_Tasks\"\" PRIMARY KEY"));
    assert!(script.contains("CONSTRAINT \"\"FK_Tasks_Projects_Project\"\""));
    assert!(script.contains("REFERENCES public.\"\"Projects\"\" (\"\"Id\"\") ON DELETE CASCADE"));
    assert!(!script.contains("Languages"));
    assert!(!script.contains("CreateDate"));
    assert!(!fs.snapshot().keys().any(|p| p.ends_with("TaskLanguage.cs")));
}

#[test]
fn regeneration_is_byte_identical() {
    let fs = MemoryFilesystem::new().with_file(CATEGORY_PATH, CATEGORY);
    run(&fs, CATEGORY_PATH, Placement::Shared);
    let first = fs.snapshot();
    run(&fs, CATEGORY_PATH, Placement::Shared);
    assert_eq!(first, fs.snapshot());
}

#[test]
fn wrong_directory_is_rejected_before_writing() {
    let path = "/work/src/Bapsis.Api.Domain/AggregateRoots/Category/Category.cs";
    let fs = MemoryFilesystem::new().with_file(path, CATEGORY);
    let service = GenerationService::new(Box::new(fs.clone()));
    let err = service
        .generate(&GenerationRequest::new(path, Placement::Shared, migration()))
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("Categories"));
    assert!(message.contains("'Category'"));
    assert_eq!(fs.list_files().len(), 1);
}

#[test]
fn inspect_returns_the_structural_model() {
    let fs = MemoryFilesystem::new().with_file(TASK_PATH, TASK);
    let service = GenerationService::new(Box::new(fs));
    let model = service.inspect(Path::new(TASK_PATH)).unwrap();

    assert_eq!(model.id_type().as_str(), "long");
    assert_eq!(model.properties().len(), 2);
    assert_eq!(model.navigations()[0].foreign_key(), "ProjectId");
}

#[test]
fn domain_project_without_suffix_is_rejected_before_writing() {
    let path = "/repo/src/Core/AggregateRoots/Categories/Category.cs";
    let fs = MemoryFilesystem::new().with_file(path, CATEGORY);
    let service = GenerationService::new(Box::new(fs.clone()));
    let err = service
        .generate(&GenerationRequest::new(path, Placement::Shared, migration()))
        .unwrap_err();

    assert!(matches!(
        err,
        StratumError::Domain(DomainError::InvalidLayout { .. })
    ));
    assert_eq!(fs.list_files(), vec![Path::new(path).to_path_buf()]);
}
