//! `instagen init`: write a starter recipe.

use std::path::{Path, PathBuf};

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::{RECIPE_FILE, Recipe},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Write [`Recipe::starter`] to `-c <FILE>` or `./instagen.toml`.
pub fn execute(args: InitArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let path = global
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(RECIPE_FILE));

    write_starter(&path, args.force)?;

    output.success(&format!("Recipe created at {}", path.display()))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  $EDITOR {}", path.display()))?;
    output.print("  instagen generate --dry-run")?;

    Ok(())
}

fn write_starter(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::RecipeExists {
            path: path.to_path_buf(),
        });
    }

    let text = Recipe::starter().to_toml()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }

    std::fs::write(path, text)
        .with_cli_context(|| format!("Failed to write recipe to '{}'", path.display()))?;

    Ok(())
}
