//! Application layer for instagen.
//!
//! This layer contains:
//! - **Operations**: the closed set of setup operations and their effects
//! - **Services**: the pipeline runner, the workspace renderer and the
//!   manifest patcher
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types

pub mod error;
pub mod operations;
pub mod ports;
pub mod services;

pub use operations::SetupOperation;

// Re-export main services
pub use services::{GenerationReport, ManifestPatcher, SetupApp, StepOutcome, StepPlan, Workspace};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateEngine, TemplateStore};

pub use error::ApplicationError;
