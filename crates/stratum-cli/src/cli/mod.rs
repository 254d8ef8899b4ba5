//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use stratum_core::domain::{Layer, ModuleName};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stratum",
    bin_name = "stratum",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Layered aggregate scaffolding from a single model file",
    long_about = "Stratum reads one domain model source file and generates the \
                  domain contracts, repositories, application handlers, controller, \
                  migration script and unit tests around it.",
    after_help = "EXAMPLES:\n\
        \x20 stratum generate src/Bapsis.Api.Domain/AggregateRoots/Categories/Category.cs --shared\n\
        \x20 stratum generate ./Tasks/Task.cs --module project-office --only domain,migration\n\
        \x20 stratum inspect ./Categories/Category.cs --format json\n\
        \x20 stratum completions bash > /usr/share/bash-completion/completions/stratum",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate every layer for a model file.
    #[command(
        visible_alias = "g",
        about = "Generate artifacts for a model",
        after_help = "EXAMPLES:\n\
            \x20 stratum generate Category.cs --shared\n\
            \x20 stratum generate Category.cs --module researcher --developer ayse\n\
            \x20 stratum generate Category.cs --shared --only domain --only unit-test --dry-run"
    )]
    Generate(GenerateArgs),

    /// Print the Structural Model extracted from a model file.
    #[command(
        about = "Show what the extractor sees",
        after_help = "EXAMPLES:\n\
            \x20 stratum inspect Category.cs\n\
            \x20 stratum inspect Category.cs --format json"
    )]
    Inspect(InspectArgs),

    /// List the module names accepted by `--module`.
    #[command(visible_alias = "ls", about = "List placement modules")]
    Modules,

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stratum init\n\
            \x20 stratum init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stratum completions bash > ~/.local/share/bash-completion/completions/stratum\n\
            \x20 stratum completions zsh  > ~/.zfunc/_stratum\n\
            \x20 stratum completions fish > ~/.config/fish/completions/stratum.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the active configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stratum config get migration.developer\n\
            \x20 stratum config list\n\
            \x20 stratum config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `stratum generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Path to the model source file.
    #[arg(value_name = "MODEL_PATH", help = "Path to the model source file")]
    pub model_path: PathBuf,

    /// Place application and controller artifacts in the shared area.
    #[arg(long = "shared", conflicts_with = "module", help = "Use the shared area")]
    pub shared: bool,

    /// Place application and controller artifacts in a module.
    #[arg(
        short = 'm',
        long = "module",
        value_name = "MODULE",
        value_parser = parse_module,
        help = "Target module (see `stratum modules`)"
    )]
    pub module: Option<ModuleName>,

    /// Restrict generation to these layers.
    #[arg(
        long = "only",
        value_name = "LAYER",
        value_parser = parse_layer,
        value_delimiter = ',',
        help = "Only generate these layers (repeatable or comma separated)"
    )]
    pub only: Vec<Layer>,

    /// Developer name used in the migration class name.
    #[arg(long = "developer", value_name = "NAME", help = "Migration author")]
    pub developer: Option<String>,

    /// Migration timestamp, `yyyyMMddHHmm`. Defaults to now.
    #[arg(long = "script-date", value_name = "STAMP", help = "Migration timestamp")]
    pub script_date: Option<String>,

    /// Navigation type whose foreign key cascades on delete.
    #[arg(long = "cascade-parent", value_name = "TYPE", help = "Cascade parent type")]
    pub cascade_parent: Option<String>,

    /// Show what would be written without touching the filesystem.
    #[arg(long = "dry-run", help = "Plan only, write nothing")]
    pub dry_run: bool,

    /// Stop at the first failing layer.
    #[arg(long = "fail-fast", help = "Stop after the first failed layer")]
    pub fail_fast: bool,
}

// ── inspect ───────────────────────────────────────────────────────────────────

/// Arguments for `stratum inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Path to the model source file.
    #[arg(value_name = "MODEL_PATH")]
    pub model_path: PathBuf,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "text", help = "Output format")]
    pub format: InspectFormat,
}

/// Output format for the `inspect` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InspectFormat {
    /// Human-readable summary.
    Text,
    /// The Structural Model as JSON.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stratum init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stratum completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stratum config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `migration.developer`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the configuration file.
    Path,
}

// ── value parsers ─────────────────────────────────────────────────────────────

fn parse_module(s: &str) -> Result<ModuleName, String> {
    s.parse().map_err(|e: stratum_core::domain::DomainError| e.to_string())
}

fn parse_layer(s: &str) -> Result<Layer, String> {
    s.parse().map_err(|e: stratum_core::domain::DomainError| e.to_string())
}

// ── tests ─────────────────────────────────────────────────────────────────────
