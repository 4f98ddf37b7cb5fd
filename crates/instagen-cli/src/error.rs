//! CLI-level errors.
//!
//! Every failure a command can hit ends up as a [`CliError`], which knows
//! its exit code and what the user can do about it. `main` renders it once.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use instagen_core::error::InstagenError;

pub use instagen_core::error::ErrorCategory as CoreCategory;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Bad flag combination or unreadable answer.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// `init` would overwrite an existing recipe.
    #[error("Recipe already exists at {path}")]
    RecipeExists { path: PathBuf },

    /// No recipe was given and none was found.
    #[error("No recipe found")]
    RecipeNotFound { searched: Vec<PathBuf> },

    /// A recipe could not be parsed or serialised.
    #[error("Recipe error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    #[error("Generation failed: {0}")]
    Core(#[from] InstagenError),

    #[error("{message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The user declined the confirmation prompt.
    #[error("Cancelled, nothing was written")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        Self::IoError {
            message: source.to_string(),
            source,
        }
    }
}

impl CliError {
    /// Hints printed under the error message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["See `instagen --help` for accepted flags".into()],

            Self::RecipeExists { path } => vec![
                format!("Keep '{}' and edit it by hand", path.display()),
                "Or replace it: instagen init --force".into(),
                "Or write elsewhere: instagen -c <FILE> init".into(),
            ],

            Self::RecipeNotFound { searched } => {
                let mut hints: Vec<String> = searched
                    .iter()
                    .map(|p| format!("Searched {}", p.display()))
                    .collect();
                hints.push("Create one with: instagen init".into());
                hints.push("Or point at one with: instagen -c <FILE> generate".into());
                hints
            }

            Self::ConfigError { .. } => vec![
                "The recipe must be valid TOML".into(),
                "INSTAGEN__<SECTION>__<KEY> variables override the file".into(),
                "Inspect the merged result with: instagen config show".into(),
            ],

            Self::Core(inner) => inner.suggestions(),

            Self::IoError { .. } => vec![
                "Check that the target directory is writable".into(),
            ],

            Self::Cancelled => vec!["Pass --yes to skip the prompt".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::RecipeExists { .. } | Self::Cancelled => {
                ErrorCategory::UserError
            }
            Self::RecipeNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Core(inner) => match inner.category() {
                CoreCategory::Validation | CoreCategory::Ordering => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Packaging | CoreCategory::Environment | CoreCategory::Internal => {
                    ErrorCategory::Internal
                }
            },
        }
    }

    /// Process exit status: 2 user, 3 not found, 4 recipe, 1 anything else.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
        }
    }

    /// Coloured report for a terminal.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, true)
    }

    /// Same report without ANSI codes, for pipes and logs.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, false)
    }

    /// Message, cause chain when `verbose`, then suggestions.
    fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: String, style: fn(&str) -> String| {
            if color { style(&text) } else { text }
        };
        let mut out = String::new();

        out.push('\n');
        out.push_str(&paint(
            format!("\u{2717} Error: {self}"), // ✗
            |t| t.red().bold().to_string(),
        ));
        out.push('\n');

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                out.push_str(&paint(format!("  caused by: {err}"), |t| {
                    t.dimmed().to_string()
                }));
                out.push('\n');
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push('\n');
            out.push_str(&paint("Suggestions:".into(), |t| t.yellow().bold().to_string()));
            out.push('\n');
            for s in suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push('\n');
            out.push_str(&paint("Run with -v for the full cause chain.".into(), |t| {
                t.dimmed().to_string()
            }));
            out.push('\n');
        }

        out
    }

    /// Emit one event at a severity matching the category.
    pub fn log(&self) {
        let cause = self.source().map(ToString::to_string);
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(category = ?self.category(), cause = cause.as_deref(), "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(category = ?self.category(), cause = cause.as_deref(), "{self}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Recipe content, prompts, usage.
    UserError,
    NotFound,
    /// The recipe itself could not be read.
    Configuration,
    Internal,
}

/// Attach a message to a foreign error while converting it.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for std::io::Result<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::IoError {
            message: f().into(),
            source,
        })
    }
}

impl<T> IntoCli<T> for Result<T, InstagenError> {
    /// Core errors name their own step and path; the message is not needed.
    fn with_cli_context<F, S>(self, _f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(CliError::Core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use instagen_core::{
        application::ApplicationError,
        domain::{DomainError, TemplateCategory},
    };
    use std::io;

    fn missing_version() -> InstagenError {
        InstagenError::StepFailed {
            step: 2,
            operation: "github_workflows",
            source: Box::new(
                DomainError::MissingSetting {
                    setting: "toolchain_version",
                    supplier: "toolchain_version",
                    operation: "github_workflows",
                }
                .into(),
            ),
        }
    }

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn recipe_exists_suggests_force() {
        let err = CliError::RecipeExists {
            path: PathBuf::from("instagen.toml"),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }

    #[test]
    fn recipe_not_found_lists_searched_paths() {
        let err = CliError::RecipeNotFound {
            searched: vec![PathBuf::from("instagen.toml")],
        };
        assert!(err.suggestions().iter().any(|s| s.contains("instagen.toml")));
        assert!(err.suggestions().iter().any(|s| s.contains("instagen init")));
    }

    #[test]
    fn core_suggestions_pass_through() {
        let err = CliError::Core(missing_version());
        assert!(
            err.suggestions()
                .iter()
                .any(|s| s.contains("toolchain_version"))
        );
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            2
        );
        assert_eq!(CliError::Core(missing_version()).exit_code(), 2);
    }

    #[test]
    fn exit_code_not_found() {
        let err = CliError::Core(
            ApplicationError::TemplateNotFound {
                category: TemplateCategory::CiManifest,
                name: "release".into(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 3);
        assert_eq!(CliError::RecipeNotFound { searched: vec![] }.exit_code(), 3);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
        let fs_err = CliError::Core(
            ApplicationError::FilesystemError {
                path: PathBuf::from("/ro"),
                reason: "read-only".into(),
            }
            .into(),
        );
        assert_eq!(fs_err.exit_code(), 1);
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::RecipeExists {
            path: PathBuf::from("/tmp/x"),
        };
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
    }

    #[test]
    fn format_plain_verbose_shows_cause_chain() {
        let err = CliError::Core(missing_version());
        let s = err.format_plain(true);
        assert!(s.contains("caused by:"));
        assert!(!s.contains("Run with -v"));
    }

    #[test]
    fn plain_output_has_no_escape_codes() {
        let err = CliError::Core(missing_version());
        assert!(!err.format_plain(true).contains('\x1b'));
        assert!(err.format_plain(false).contains("Run with -v"));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading recipe");
        assert!(matches!(cli, Err(CliError::IoError { .. })));
    }

    #[test]
    fn into_cli_core_error() {
        let result: Result<(), InstagenError> = Err(missing_version());
        let cli = result.with_cli_context(|| "ignored");
        assert!(matches!(cli, Err(CliError::Core(_))));
    }
}
