//! Infrastructure adapters for instagen.
//!
//! This crate implements the ports defined in `instagen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod filesystem;
pub mod renderer;
pub mod template_store;

use instagen_core::{
    application::{SetupApp, SetupOperation},
    domain::Project,
};

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::HandlebarsEngine;
pub use template_store::{EmbeddedStore, InMemoryStore};

/// A pipeline wired to the bundled templates, Handlebars and the local disk.
///
/// Output lands in the working directory unless changed with
/// [`SetupApp::with_root`].
pub fn default_app(project: Project, operations: Vec<SetupOperation>) -> SetupApp {
    SetupApp::new(
        project,
        operations,
        Box::new(EmbeddedStore::new()),
        Box::new(HandlebarsEngine::new()),
        Box::new(LocalFilesystem::new()),
    )
}
