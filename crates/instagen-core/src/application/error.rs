//! Application layer errors.
//!
//! These errors represent failures while executing setup operations against
//! the outside world: templates and the filesystem. Caller mistakes are
//! `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::TemplateCategory;
use crate::error::ErrorCategory;

/// Errors raised while rendering, writing or patching files.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// The named template is not part of the bundled set.
    #[error("Template '{name}' ({category}) not found in the template store")]
    TemplateNotFound {
        category: TemplateCategory,
        name: String,
    },

    /// A bundled template body could not be parsed.
    #[error("Template '{name}' is malformed: {reason}")]
    TemplateParse { name: String, reason: String },

    /// Template execution against the value bundle failed.
    #[error("Template rendering failed for '{name}': {reason}")]
    RenderingFailed { name: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The toolchain manifest exists but could not be updated.
    #[error("Cannot patch manifest {path}: {reason}")]
    ManifestPatch { path: PathBuf, reason: String },

    /// Shared adapter state was poisoned by a panicking thread.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { name, .. } => vec![
                format!("'{}' is not a bundled template", name),
                "Try: instagen list to see available templates".into(),
            ],
            Self::TemplateParse { .. } | Self::RenderingFailed { .. } => vec![
                "The bundled template set is inconsistent".into(),
                "This is a packaging defect, please report it".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure no directory exists where a file is expected".into(),
            ],
            Self::ManifestPatch { path, .. } => vec![
                format!("Inspect {} for a 'go X.Y' directive", path.display()),
                "Check that the file is readable and writable".into(),
            ],
            Self::LockPoisoned => vec!["An earlier operation panicked; rerun the setup".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::TemplateParse { .. } | Self::RenderingFailed { .. } => ErrorCategory::Packaging,
            Self::FilesystemError { .. } | Self::ManifestPatch { .. } => ErrorCategory::Environment,
            Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
