//! # instagen CLI
//!
//! Boilerplate generator for Go applications.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load the recipe (file + env + defaults).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands, GlobalArgs},
    config::{LoadedRecipe, Recipe},
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init. A missing
    // .env is not an error.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version arrive here too and must exit 0.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;

    // ── 3. Load the recipe ────────────────────────────────────────────────
    // `init` and `completions` must work next to a broken recipe.
    let loaded = match cli.command {
        Commands::Init(_) | Commands::Completions(_) => LoadedRecipe::default(),
        _ => match load_recipe(&cli.global) {
            Ok(loaded) => loaded,
            Err(e) => return handle_error(e, verbose),
        },
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &loaded.recipe);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli, loaded, output) {
        Ok(()) => {
            info!("instagen completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

fn load_recipe(global: &GlobalArgs) -> CliResult<LoadedRecipe> {
    if let Some(path) = global.config.as_ref().filter(|p| !p.is_file()) {
        return Err(CliError::RecipeNotFound {
            searched: vec![path.clone()],
        });
    }

    Recipe::load(global.config.as_deref()).map_err(|e| CliError::ConfigError {
        message: format!("{e:#}"),
        source: Some(e.into()),
    })
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, loaded: LoadedRecipe, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Generate(cmd) => commands::generate::execute(cmd, cli.global, loaded, output),
        Commands::List(cmd) => commands::list::execute(cmd, cli.global, output),
        Commands::Init(cmd) => commands::init::execute(cmd, cli.global, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, loaded, output),
    }
}

/// Translate a `CliError` into a user message and an exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    // stderr, so the message survives a redirected stdout.
    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn cli_has_author() {
        let cmd = Cli::command();
        assert!(cmd.get_author().is_some());
    }

    #[test]
    fn missing_explicit_recipe_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "instagen",
            "-c",
            dir.path().join("absent.toml").to_str().unwrap(),
            "generate",
        ]);
        let err = load_recipe(&cli.global).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn unparsable_recipe_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[project\nbinary_name = ").unwrap();
        let cli = Cli::parse_from(["instagen", "-c", path.to_str().unwrap(), "generate"]);
        let err = load_recipe(&cli.global).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
