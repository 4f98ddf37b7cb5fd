//! Application ports (traits) for external dependencies.
//!
//! Ports define what the pipeline needs from the outside world. Adapters in
//! `instagen-adapters` implement them.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by the pipeline, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateStore`: Bundled template lookup and enumeration
//!   - `TemplateEngine`: Template compilation and execution

pub mod output;

pub use output::{Filesystem, TemplateEngine, TemplateStore};

#[cfg(test)]
pub use output::{MockFilesystem, MockTemplateEngine, MockTemplateStore};
