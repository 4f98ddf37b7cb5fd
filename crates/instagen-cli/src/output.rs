//! Everything the CLI prints on stdout goes through [`OutputManager`].

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::Recipe;

/// Manages CLI output based on flags and the recipe's `[output]` section.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and the loaded recipe.
    pub fn new(args: &GlobalArgs, recipe: &Recipe) -> Self {
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || recipe.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// Write `line` unless `--quiet`.
    fn emit(&self, line: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(line)
    }

    /// `mark msg`, with `style` applied to both when colour is on.
    fn marked(&self, mark: char, msg: &str, style: fn(&str) -> String) -> io::Result<()> {
        let line = format!("{mark} {msg}");
        if self.no_color {
            self.emit(&line)
        } else {
            self.emit(&style(&line))
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.emit(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2713}', msg, |l| l.green().to_string())
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{26a0}', msg, |l| l.yellow().to_string())
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2139}', msg, |l| l.blue().to_string())
    }

    /// Section title above a list.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.no_color {
            self.emit(text)
        } else {
            self.emit(&text.cyan().bold().to_string())
        }
    }

    /// Indented secondary line, e.g. a written path.
    pub fn detail(&self, text: &str) -> io::Result<()> {
        let line = format!("    {text}");
        if self.no_color {
            self.emit(&line)
        } else {
            self.emit(&line.dimmed().to_string())
        }
    }

    /// Pretty-printed JSON on stdout. Never suppressed: `--quiet` only
    /// silences decoration, not the data the caller asked for.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// A step counter for long-running work.
    ///
    /// Hidden unless output is human-facing, so piped and JSON output stay
    /// clean.
    pub fn progress(&self, len: u64) -> ProgressBar {
        if self.quiet || self.resolved_format != OutputFormat::Human {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(len);
        let template = if self.no_color {
            "{prefix} [{pos}/{len}] {msg}"
        } else {
            "{prefix:.bold} [{pos}/{len}] {wide_msg:.dim}"
        };
        if let Ok(style) = ProgressStyle::with_template(template) {
            bar.set_style(style);
        }
        bar.set_prefix("Generating");
        bar.enable_steady_tick(Duration::from_millis(120));
        bar
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// `Auto` already resolved to `Human` or `Plain`.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    /// `true` when the caller asked for JSON.
    pub fn is_json(&self) -> bool {
        self.format() == OutputFormat::Json
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(format: OutputFormat, quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
            root: None,
        };
        OutputManager::new(&args, &Recipe::default())
    }

    #[test]
    fn quiet_manager_still_accepts_writes() {
        let out = make_manager(OutputFormat::Plain, true, true);
        assert!(out.is_quiet());
        assert!(out.success("done").is_ok());
        assert!(out.detail("Makefile").is_ok());
    }

    #[test]
    fn human_format_keeps_colour_unless_disabled() {
        assert!(make_manager(OutputFormat::Human, false, false).supports_color());
        assert!(!make_manager(OutputFormat::Human, false, true).supports_color());
    }

    #[test]
    fn plain_and_json_never_colour() {
        assert!(!make_manager(OutputFormat::Plain, false, false).supports_color());
        assert!(!make_manager(OutputFormat::Json, false, false).supports_color());
    }

    #[test]
    fn recipe_can_disable_colour() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Human,
            root: None,
        };
        let mut recipe = Recipe::default();
        recipe.output.no_color = true;
        assert!(!OutputManager::new(&args, &recipe).supports_color());
    }

    #[test]
    fn progress_hidden_outside_human_output() {
        assert!(make_manager(OutputFormat::Plain, false, true).progress(3).is_hidden());
        assert!(make_manager(OutputFormat::Json, false, true).progress(3).is_hidden());
        assert!(make_manager(OutputFormat::Human, true, true).progress(3).is_hidden());
    }

    #[test]
    fn explicit_format_is_kept() {
        let out = make_manager(OutputFormat::Json, false, false);
        assert_eq!(out.format(), OutputFormat::Json);
        assert!(out.is_json());
    }
}
