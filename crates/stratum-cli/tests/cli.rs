//! End-to-end tests of the `stratum` binary against a temporary repository.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CATEGORY: &str = r#"
namespace Bapsis.Api.Domain.AggregateRoots.Categories;

public class Category : AuditEntity<int>, IMultiLanguageEntity<CategoryLanguage>, IAggregateRoot
{
    public string Title { get; private set; }
    public int? Order { get; private set; }
}
"#;

struct Repo {
    dir: TempDir,
    config: PathBuf,
}

impl Repo {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("stratum.toml");
        std::fs::write(&config, "").unwrap();
        Self { dir, config }
    }

    fn with_model(self, relative: &str, source: &str) -> Self {
        let path = self.path(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, source).unwrap();
        self
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn stratum(&self) -> Command {
        let mut cmd = Command::cargo_bin("stratum").unwrap();
        cmd.current_dir(self.root())
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config)
            .arg("--no-color");
        cmd
    }
}

const MODEL: &str = "src/Bapsis.Api.Domain/AggregateRoots/Categories/Category.cs";

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("stratum")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("modules"));
}

#[test]
fn modules_lists_every_module() {
    Repo::new()
        .stratum()
        .arg("modules")
        .assert()
        .success()
        .stdout(predicate::str::contains("ProjectOffice"))
        .stdout(predicate::str::contains("SystemManagement"))
        .stdout(predicate::str::contains("ResearcherBaseController"));
}

#[test]
fn generate_shared_writes_every_layer() {
    let repo = Repo::new().with_model(MODEL, CATEGORY);

    repo.stratum()
        .args([
            "generate",
            MODEL,
            "--shared",
            "--developer",
            "ayse",
            "--script-date",
            "202401151030",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("21 file(s) written for 'Category'"));

    for relative in [
        "src/Bapsis.Api.Domain/AggregateRoots/Categories/Contacts/ICategoryDomainService.cs",
        "src/Bapsis.Api.Data/Repositories/Categories/CategoryQueryRepository.cs",
        "src/Bapsis.Api.Application/Internal/Commons/Categories/Commands/Handlers/Create/CategoryCreateCommand.cs",
        "src/Bapsis.Api.Http/Controllers/Common/Categories/CategoryController.cs",
        "src/Bapsis.Api.Data/DbScripts/Script_ayse_202401151030.cs",
        "test/Unit/Bapsis.Domain.Unit.Test/AggregateRoots/Categories/Implementations/CategoryDomainServiceTest.cs",
    ] {
        assert!(repo.path(relative).is_file(), "missing {relative}");
    }
}

#[test]
fn module_placement_moves_the_controller() {
    let repo = Repo::new().with_model(MODEL, CATEGORY);

    repo.stratum()
        .args(["generate", MODEL, "--module", "researcher", "--developer", "ayse"])
        .args(["--only", "controller"])
        .assert()
        .success();

    let controller = std::fs::read_to_string(
        repo.path("src/Bapsis.Api.Http/Controllers/Modules/Researcher/CategoryController.cs"),
    )
    .unwrap();
    assert!(controller.contains(": ResearcherBaseController"));
    assert!(!repo.path("src/Bapsis.Api.Domain/AggregateRoots/Categories/Contacts").exists());
}

#[test]
fn missing_placement_without_terminal_is_a_user_error() {
    let repo = Repo::new().with_model(MODEL, CATEGORY);

    repo.stratum()
        .args(["generate", MODEL])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No placement given for 'Category'"))
        .stderr(predicate::str::contains("--shared"));
}

#[test]
fn directory_mismatch_writes_nothing() {
    let wrong = "src/Bapsis.Api.Domain/AggregateRoots/Category/Category.cs";
    let repo = Repo::new().with_model(wrong, CATEGORY);

    repo.stratum()
        .args(["generate", wrong, "--shared"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("'Categories'"));

    assert!(!repo.path("src/Bapsis.Api.Data").exists());
    assert!(!repo.path("src/Bapsis.Api.Domain/AggregateRoots/Category/Contacts").exists());
}

#[test]
fn missing_model_is_not_found() {
    Repo::new()
        .stratum()
        .args(["generate", MODEL, "--shared"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Model file not found"));
}

#[test]
fn blocked_layers_give_partial_exit_code() {
    let repo = Repo::new().with_model(MODEL, CATEGORY);
    std::fs::write(repo.path("src/Bapsis.Api.Data"), "").unwrap();

    repo.stratum()
        .args(["generate", MODEL, "--shared", "--developer", "ayse"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("2 of 6 layers failed: repository, migration"));

    assert!(
        repo.path("src/Bapsis.Api.Http/Controllers/Common/Categories/CategoryController.cs")
            .is_file()
    );
}

#[test]
fn json_dry_run_report() {
    let repo = Repo::new().with_model(MODEL, CATEGORY);

    let assert = repo
        .stratum()
        .args(["--output-format", "json", "generate", MODEL, "--shared", "--dry-run"])
        .args(["--only", "domain,migration"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["model"], "Category");
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["layers"].as_array().unwrap().len(), 2);
    assert_eq!(report["layers"][0]["layer"], "domain");
    assert_eq!(report["layers"][0]["status"], "planned");
    assert_eq!(report["layers"][1]["layer"], "migration");
    assert!(!repo.path("src/Bapsis.Api.Data").exists());
}

#[test]
fn inspect_prints_the_model() {
    let repo = Repo::new().with_model(MODEL, CATEGORY);

    repo.stratum()
        .args(["inspect", MODEL])
        .assert()
        .success()
        .stdout(predicate::str::contains("plural:         Categories"))
        .stdout(predicate::str::contains("multi-language: yes"));

    let assert = repo
        .stratum()
        .args(["inspect", MODEL, "--format", "json"])
        .assert()
        .success();
    let model: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(model["plural"], "Categories");
    assert_eq!(model["id_type"], "int");
    assert_eq!(model["properties"].as_array().unwrap().len(), 2);
}

#[test]
fn config_values_reach_generation() {
    let repo = Repo::new().with_model(MODEL, CATEGORY);
    std::fs::write(
        &repo.config,
        "[migration]\ndeveloper = \"mert\"\n\n[generation]\nlayers = [\"migration\"]\n",
    )
    .unwrap();

    repo.stratum()
        .args(["generate", MODEL, "--shared", "--script-date", "202402010900"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 file(s) written"));

    assert!(repo.path("src/Bapsis.Api.Data/DbScripts/Script_mert_202402010900.cs").is_file());
}

#[test]
fn init_then_config_get() {
    let repo = Repo::new();
    let fresh = repo.path("conf/stratum.toml");

    Command::cargo_bin("stratum")
        .unwrap()
        .args(["--no-color", "--config"])
        .arg(&fresh)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));
    assert!(std::fs::read_to_string(&fresh).unwrap().contains("[migration]"));

    Command::cargo_bin("stratum")
        .unwrap()
        .args(["--no-color", "--config"])
        .arg(&fresh)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    Command::cargo_bin("stratum")
        .unwrap()
        .args(["--no-color", "--config"])
        .arg(&fresh)
        .args(["config", "get", "layout.anchor"])
        .assert()
        .success()
        .stdout(predicate::str::diff("AggregateRoots\n"));
}

#[test]
fn unknown_config_key_is_a_configuration_error() {
    Repo::new()
        .stratum()
        .args(["config", "get", "layout.nothing"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn completions_mention_the_binary() {
    Command::cargo_bin("stratum")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stratum"));
}

#[test]
fn missing_explicit_config_is_a_configuration_error() {
    let repo = Repo::new();
    Command::cargo_bin("stratum")
        .unwrap()
        .args(["--no-color", "--config"])
        .arg(repo.path("absent.toml"))
        .arg("modules")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}
