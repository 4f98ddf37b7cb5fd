//! Unified error handling for instagen Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, plus the pipeline's own "which step failed" wrapper.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for instagen Core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InstagenError {
    /// Errors from the domain layer (invalid input, missing settings).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (templates, filesystem).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// A pipeline step failed; later steps were not run.
    #[error("Step {step} ({operation}) failed: {source}")]
    StepFailed {
        step: usize,
        operation: &'static str,
        #[source]
        source: Box<InstagenError>,
    },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl InstagenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::StepFailed { source, .. } => source.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in instagen".into(),
                "Please report this issue at: https://github.com/instagen/instagen/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Ordering => ErrorCategory::Ordering,
            },
            Self::Application(e) => e.category(),
            Self::StepFailed { source, .. } => source.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The innermost error, looking through `StepFailed` wrappers.
    pub fn root_cause(&self) -> &InstagenError {
        match self {
            Self::StepFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Every failure here is a configuration, packaging or environment
    /// defect; none of them go away on a second attempt.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller supplied invalid input.
    Validation,
    /// An operation needed a setting no earlier operation supplied.
    Ordering,
    /// A requested template is not bundled.
    NotFound,
    /// The bundled templates are inconsistent.
    Packaging,
    /// The filesystem refused an operation.
    Environment,
    Internal,
}

/// Convenient result type alias.
pub type InstagenResult<T> = Result<T, InstagenError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn step_failure_keeps_cause_category() {
        let cause: InstagenError = ApplicationError::FilesystemError {
            path: PathBuf::from("Makefile"),
            reason: "denied".into(),
        }
        .into();
        let err = InstagenError::StepFailed {
            step: 3,
            operation: "build_rules",
            source: Box::new(cause.clone()),
        };

        assert_eq!(err.category(), ErrorCategory::Environment);
        assert_eq!(err.root_cause(), &cause);
        assert!(err.to_string().starts_with("Step 3 (build_rules) failed"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn missing_setting_is_ordering() {
        let err: InstagenError = DomainError::MissingSetting {
            setting: "toolchain_version",
            supplier: "toolchain_version",
            operation: "github_workflows",
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Ordering);
        assert!(!err.suggestions().is_empty());
    }
}
