//! Core domain layer for instagen.
//!
//! Pure data and rules with no I/O: the project identity, the accumulated
//! settings, validated value objects, template categories and the value
//! bundle handed to template engines. Everything that touches a filesystem
//! or a template engine goes through the ports in `crate::application`.

pub mod bundle;
pub mod category;
pub mod error;
pub mod project;
pub mod settings;
pub mod toolchain;

pub use bundle::ValueBundle;
pub use category::{TemplateCategory, TemplateRef, GENERATED_WARNING};
pub use error::{DomainError, ErrorCategory};
pub use project::Project;
pub use settings::{SettingKey, Settings};
pub use toolchain::ToolchainVersion;
