//! Implementation of the `instagen generate` command.
//!
//! Responsibility: turn the recipe into an operation list, show the plan,
//! run the pipeline and report what was written. No generation logic lives
//! here.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument};

use instagen_adapters::default_app;
use instagen_core::application::{GenerationReport, StepPlan};

use crate::{
    cli::{GenerateArgs, global::GlobalArgs},
    config::LoadedRecipe,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Plan as printed by `--dry-run --output-format json`.
#[derive(Debug, Serialize)]
struct DryRun<'a> {
    project: String,
    root: PathBuf,
    steps: &'a [StepPlan],
}

/// Execute the `instagen generate` command.
///
/// 1. Resolve the project and operations from the recipe
/// 2. Build the pipeline (eager contributions run here)
/// 3. Early-exit with the plan if `--dry-run`
/// 4. Confirm unless `--yes`, `--quiet` or JSON output
/// 5. Run every step, then print the written files
#[instrument(skip_all)]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    loaded: LoadedRecipe,
    output: OutputManager,
) -> CliResult<()> {
    let recipe = loaded.require()?;
    let project = recipe.project()?;
    let operations = recipe.operations()?;

    if operations.is_empty() {
        output.warning("The recipe selects nothing to generate")?;
        return Ok(());
    }

    let root = global.root();
    let app = default_app(project, operations).with_root(&root);
    let plan = app.plan();

    if args.dry_run {
        if output.is_json() {
            output.json(&DryRun {
                project: app.project().to_string(),
                root,
                steps: &plan,
            })?;
        } else {
            show_plan(app.project().to_string(), &root, &plan, &output)?;
            output.info("Dry run: no files were written")?;
        }
        return Ok(());
    }

    if !args.yes && !output.is_quiet() && !output.is_json() {
        show_plan(app.project().to_string(), &root, &plan, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    info!(root = %root.display(), steps = plan.len(), "generation started");

    let bar = output.progress(plan.len() as u64);
    let result = app.generate_with(|outcome, _total| {
        bar.set_message(outcome.operation);
        bar.inc(1);
    });
    bar.finish_and_clear();
    let report = result?;

    if output.is_json() {
        output.json(&report)?;
    } else {
        show_report(&report, &output)?;
    }

    Ok(())
}

fn show_plan(
    project: String,
    root: &std::path::Path,
    plan: &[StepPlan],
    output: &OutputManager,
) -> CliResult<()> {
    output.header(&format!("Generating {project} into {}", root.display()))?;
    for step in plan {
        output.print(&format!("  {:>2}. {}", step.step, step.description))?;
    }
    output.print("")?;
    Ok(())
}

fn show_report(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    for step in &report.steps {
        for path in &step.written {
            output.detail(&path.display().to_string())?;
        }
    }
    output.success(&format!(
        "Generated {} file(s) in {}",
        report.file_count(),
        report.root.display()
    ))?;
    if report.skipped_steps() > 0 {
        output.info(&format!(
            "{} step(s) only recorded settings or had nothing to write",
            report.skipped_steps()
        ))?;
    }
    Ok(())
}

// ── Confirmation ──────────────────────────────────────────────────────────────

/// Ask before writing. Defaults to yes.
#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() {
        return confirm_from_stdin();
    }

    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(|e| CliError::InvalidInput {
            message: "failed to read confirmation".into(),
            source: Some(Box::new(e)),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    confirm_from_stdin()
}

fn confirm_from_stdin() -> CliResult<bool> {
    use std::io::{self, Write};

    use crate::error::IntoCli;

    print!("Continue? [Y/n] ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_ascii_lowercase();
    input.is_empty() || input == "y" || input == "yes"
}

// ── Tests ─────────────────────────────────────────────────────────────────────
