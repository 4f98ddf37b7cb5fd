// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports keep a copy of the failing step)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project identity: {0}")]
    InvalidProject(String),

    #[error("Invalid toolchain version '{value}': {reason}")]
    InvalidToolchainVersion { value: String, reason: String },

    #[error("Invalid {kind} '{name}': {reason}")]
    InvalidName {
        kind: &'static str,
        name: String,
        reason: String,
    },

    // ========================================================================
    // Ordering Errors
    // ========================================================================
    #[error(
        "setting '{setting}' is required by '{operation}' but was never supplied; \
         add a '{supplier}' operation to the setup list"
    )]
    MissingSetting {
        setting: &'static str,
        supplier: &'static str,
        operation: &'static str,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProject(msg) => vec![
                "Check the binary name and source directory".into(),
                format!("Details: {}", msg),
            ],
            Self::InvalidToolchainVersion { .. } => vec![
                "Use a MAJOR.MINOR or MAJOR.MINOR.PATCH version".into(),
                "Examples: 1.23, 1.22.5".into(),
            ],
            Self::InvalidName { kind: "package", name, .. } => vec![
                format!("'{}' cannot be used as a Go package name", name),
                "Use letters, digits and underscores, starting with a letter".into(),
            ],
            Self::InvalidName { kind: "workflow", .. } => vec![
                "Workflow names are bare file stems such as 'linter' or 'test'".into(),
                "Try: instagen list to see bundled workflows".into(),
            ],
            Self::InvalidName { kind, .. } => vec![format!("Check the {} values you supplied", kind)],
            Self::MissingSetting { supplier, .. } => vec![
                format!("Add a '{}' operation to the setup list", supplier),
                "In a recipe file: set [toolchain] version = \"1.23\"".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingSetting { .. } => ErrorCategory::Ordering,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Ordering,
}
