//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the pipeline needs from external systems.
//! The `instagen-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{TemplateCategory, TemplateRef, ValueBundle};
use crate::error::InstagenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `instagen_adapters::filesystem::LocalFilesystem` (production)
/// - `instagen_adapters::filesystem::MemoryFilesystem` (testing, embedding)
///
/// ## Design Notes
///
/// - `write_file` has create-or-truncate semantics
/// - Every call opens and releases its own handle; nothing stays open
///   between calls
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> InstagenResult<()>;

    /// Write content to a file, replacing any existing content.
    fn write_file(&self, path: &Path, content: &str) -> InstagenResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> InstagenResult<String>;

    /// Set Unix permission bits (ignored where unsupported).
    fn set_mode(&self, path: &Path, mode: u32) -> InstagenResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for the bundled template set.
///
/// Implemented by:
/// - `instagen_adapters::template_store::EmbeddedStore` (compiled-in templates)
/// - `instagen_adapters::template_store::InMemoryStore` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Get a template body.
    fn get(&self, template: &TemplateRef) -> InstagenResult<String>;

    /// Enumerate every template of one group (store subdirectory), sorted by name.
    fn list_group(&self, category: TemplateCategory, group: &str) -> Vec<TemplateRef>;

    /// List all available templates.
    fn list(&self) -> Vec<TemplateRef>;
}

/// Port for template compilation and execution.
///
/// Implemented by:
/// - `instagen_adapters::renderer::HandlebarsEngine`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateEngine: Send + Sync {
    /// Compile `body` and execute it against `bundle`.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::TemplateParse` if `body` does not compile
    /// - `ApplicationError::RenderingFailed` if execution fails
    fn render(&self, name: &str, body: &str, bundle: &ValueBundle) -> InstagenResult<String>;
}
