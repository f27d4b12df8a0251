//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names,
//! aliases, help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

use mason_core::domain::{ModuleKind as CoreKind, Platform as CorePlatform};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "mason",
    bin_name = "mason",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f9f1} Composable Maven module-tree scaffolding",
    long_about = "mason assembles multi-module Maven projects for AEM-style \
                  platforms from composable module generators.",
    after_help = "EXAMPLES:\n\
        \x20 mason new mysite --group-id com.mysite --defaults --yes\n\
        \x20 mason new mysite --aem-version 6.5 --module app --module dispatcher\n\
        \x20 mason add tests-it --dir ./mysite --defaults\n\
        \x20 mason completions bash > /usr/share/bash-completion/completions/mason",
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
    /// Compose a new project.
    #[command(
        visible_alias = "n",
        about = "Compose a new project",
        after_help = "EXAMPLES:\n\
            \x20 mason new mysite --group-id com.mysite --defaults --yes\n\
            \x20 mason new mysite --module app --module tests-it --publish\n\
            \x20 mason new legacy  --aem-version 6.5 --defaults --yes"
    )]
    New(NewArgs),

    /// Add a module to an existing project.
    #[command(
        about = "Add a module to an existing project",
        after_help = "EXAMPLES:\n\
            \x20 mason add tests-it --dir ./mysite --defaults\n\
            \x20 mason add dispatcher --dir ./mysite --publish --defaults\n\
            \x20 mason add app --path extras --dir ./mysite --defaults"
    )]
    Add(AddArgs),

    /// List module kinds.
    #[command(
        visible_alias = "ls",
        about = "List available module kinds",
        after_help = "EXAMPLES:\n\
            \x20 mason list\n\
            \x20 mason list --format json"
    )]
    List(ListArgs),

    /// Initialise a mason configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 mason init          # default location\n\
            \x20 mason init --force  # overwrite existing"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 mason completions bash > ~/.local/share/bash-completion/completions/mason\n\
            \x20 mason completions zsh  > ~/.zfunc/_mason\n\
            \x20 mason completions fish > ~/.config/fish/completions/mason.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the mason configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 mason config get defaults.aem_version\n\
            \x20 mason config set defaults.group_id com.mysite\n\
            \x20 mason config list"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `mason new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name or path.  A plain name creates `./name`; a path like
    /// `../foo` places the project one level up.  The leaf doubles as
    /// the Maven artifact id.
    #[arg(value_name = "NAME", help = "Project name or path")]
    pub name: String,

    /// Maven group id.
    #[arg(short = 'g', long = "group-id", value_name = "GROUP", help = "Maven group id")]
    pub group_id: Option<String>,

    /// Project version.
    #[arg(long = "version", value_name = "VERSION", help = "Project version")]
    pub project_version: Option<String>,

    /// Target platform.
    #[arg(
        short = 'a',
        long = "aem-version",
        value_name = "PLATFORM",
        value_enum,
        help = "Target platform"
    )]
    pub aem_version: Option<PlatformArg>,

    /// Java source package.
    #[arg(long = "package", value_name = "PACKAGE", help = "Java source package")]
    pub package: Option<String>,

    /// Human-readable project title.
    #[arg(long = "app-title", value_name = "TITLE", help = "Project title")]
    pub app_title: Option<String>,

    /// Module kinds to compose (repeatable).
    #[arg(
        short = 'm',
        long = "module",
        value_name = "KIND",
        value_enum,
        help = "Module kind to compose (repeatable; default: app, tests-it)"
    )]
    pub modules: Vec<ModuleKindArg>,

    /// Include publish-tier content in every composed module.
    #[arg(long = "publish", help = "Include publish-tier content")]
    pub publish: bool,

    /// Include sample code in every composed module.
    #[arg(long = "examples", help = "Include sample code")]
    pub examples: bool,

    /// Fill unset properties from computed defaults instead of prompting.
    #[arg(short = 'd', long = "defaults", help = "Use computed defaults, never prompt")]
    pub defaults: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation and compose immediately")]
    pub yes: bool,

    /// Compose into an existing directory.
    #[arg(long = "force", help = "Allow composing into an existing directory")]
    pub force: bool,
}

// ── add ───────────────────────────────────────────────────────────────────────

/// Arguments for `mason add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Module kind to add.
    #[arg(value_name = "KIND", value_enum, help = "Module kind to add")]
    pub kind: ModuleKindArg,

    /// Module path inside the project (kind default when omitted).
    #[arg(short = 'p', long = "path", value_name = "PATH", help = "Module path")]
    pub path: Option<String>,

    /// Project root directory.
    #[arg(
        long = "dir",
        value_name = "DIR",
        default_value = ".",
        help = "Project root directory"
    )]
    pub dir: PathBuf,

    /// Include publish-tier content.
    #[arg(long = "publish", help = "Include publish-tier content")]
    pub publish: bool,

    /// Include sample code.
    #[arg(long = "examples", help = "Include sample code")]
    pub examples: bool,

    /// Fill unset properties from computed defaults instead of prompting.
    #[arg(short = 'd', long = "defaults", help = "Use computed defaults, never prompt")]
    pub defaults: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation")]
    pub yes: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `mason list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One kind per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `mason init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `mason completions`.
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

/// Subcommands for `mason config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.aem_version`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Module kinds composable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModuleKindArg {
    /// Application code bundle.
    App,
    /// Integration-test module (singleton).
    #[value(name = "tests-it", alias = "it")]
    TestsIt,
    /// Runtime OSGi configuration package (singleton).
    #[value(name = "ui-config", alias = "config")]
    UiConfig,
    /// Dispatcher configuration (singleton).
    Dispatcher,
}

impl From<ModuleKindArg> for CoreKind {
    fn from(kind: ModuleKindArg) -> Self {
        match kind {
            ModuleKindArg::App => CoreKind::App,
            ModuleKindArg::TestsIt => CoreKind::ItTests,
            ModuleKindArg::UiConfig => CoreKind::UiConfig,
            ModuleKindArg::Dispatcher => CoreKind::Dispatcher,
        }
    }
}

/// Target platform variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    /// AEM as a Cloud Service.
    Cloud,
    /// AEM 6.5 (legacy quickstart).
    #[value(name = "6.5", alias = "65")]
    V65,
}

impl From<PlatformArg> for CorePlatform {
    fn from(platform: PlatformArg) -> Self {
        match platform {
            PlatformArg::Cloud => CorePlatform::Cloud,
            PlatformArg::V65 => CorePlatform::V65,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
