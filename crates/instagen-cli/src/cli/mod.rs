//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use instagen_core::domain::TemplateCategory;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "instagen",
    bin_name = "instagen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Boilerplate generation for Go applications",
    long_about = "instagen reads a recipe (instagen.toml) and generates package \
                  skeletons, Makefiles, GitHub workflows, lint configuration \
                  and CODEOWNERS for a Go project.",
    after_help = "EXAMPLES:\n\
        \x20 instagen init\n\
        \x20 instagen generate --dry-run\n\
        \x20 instagen gen --yes -C ../my-service\n\
        \x20 instagen list --format json\n\
        \x20 instagen completions bash > /usr/share/bash-completion/completions/instagen",
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
    /// Generate the boilerplate described by the recipe.
    #[command(
        visible_alias = "gen",
        about = "Generate boilerplate from the recipe",
        after_help = "EXAMPLES:\n\
            \x20 instagen generate\n\
            \x20 instagen generate --yes\n\
            \x20 instagen generate --dry-run --output-format json"
    )]
    Generate(GenerateArgs),

    /// List bundled templates.
    #[command(
        visible_alias = "ls",
        about = "List bundled templates",
        after_help = "EXAMPLES:\n\
            \x20 instagen list\n\
            \x20 instagen list --category ci-manifest\n\
            \x20 instagen list --format json"
    )]
    List(ListArgs),

    /// Write a starter recipe.
    #[command(
        about = "Create a starter recipe",
        after_help = "EXAMPLES:\n\
            \x20 instagen init                 # ./instagen.toml\n\
            \x20 instagen init --force         # overwrite\n\
            \x20 instagen -c ci.toml init      # custom location"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 instagen completions bash > ~/.local/share/bash-completion/completions/instagen\n\
            \x20 instagen completions zsh  > ~/.zfunc/_instagen\n\
            \x20 instagen completions fish > ~/.config/fish/completions/instagen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the recipe.
    #[command(
        about = "Recipe inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 instagen config path\n\
            \x20 instagen config show"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `instagen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and generate immediately"
    )]
    pub yes: bool,

    /// Print the plan without writing any files.
    #[arg(long = "dry-run", help = "Show the plan without writing files")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `instagen list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show one category.
    #[arg(long = "category", value_enum, help = "Filter by category")]
    pub category: Option<CategoryArg>,

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
    /// Grouped by category.
    Table,
    /// One template path per line.
    List,
    /// JSON array.
    Json,
}

/// Template categories as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    SourceFile,
    BuildRule,
    CiManifest,
    StructuredConfig,
}

impl From<CategoryArg> for TemplateCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::SourceFile => Self::SourceFile,
            CategoryArg::BuildRule => Self::BuildRule,
            CategoryArg::CiManifest => Self::CiManifest,
            CategoryArg::StructuredConfig => Self::StructuredConfig,
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `instagen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing recipe.
    #[arg(short = 'f', long = "force", help = "Overwrite an existing recipe")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `instagen completions`.
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

/// Subcommands for `instagen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the path of the recipe in use.
    Path,
    /// Print the resolved recipe (file + environment).
    Show,
}

// ── tests ─────────────────────────────────────────────────────────────────────
