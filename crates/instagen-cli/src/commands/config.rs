//! `instagen config`: show where the recipe came from and what it resolved to.

use crate::{
    cli::ConfigCommands,
    config::LoadedRecipe,
    error::CliResult,
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, loaded: LoadedRecipe, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Path => match &loaded.path {
            Some(path) => output.print(&path.display().to_string())?,
            None => output.warning("No recipe file in use (defaults + environment only)")?,
        },

        ConfigCommands::Show => {
            if output.is_json() {
                output.json(&loaded.recipe)?;
            } else {
                output.print(&loaded.recipe.to_toml()?)?;
            }
        }
    }

    Ok(())
}
