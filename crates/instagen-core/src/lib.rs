//! instagen Core - configuration accumulation and deferred setup pipeline.
//!
//! This crate provides the domain and application layers for the instagen
//! boilerplate generator, following the ports and adapters layout.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           instagen-cli (CLI)            │
//! │      (recipe file -> operations)        │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      SetupApp (pipeline runner)         │
//! │  contribute (eager) -> apply (deferred) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Workspace + ports (Store, Engine, FS) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    instagen-adapters (Infrastructure)   │
//! │ (EmbeddedStore, Handlebars, LocalFs...) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use instagen_core::{
//!     application::{SetupApp, SetupOperation},
//!     domain::{Project, ToolchainVersion},
//! };
//!
//! let project = Project::new("rachio-next-run", "app").unwrap();
//! let ops = vec![
//!     SetupOperation::toolchain_version("1.23".parse::<ToolchainVersion>().unwrap()),
//!     SetupOperation::packages(["logger", "pushover"]),
//!     SetupOperation::github_workflows(["linter", "test"]),
//!     SetupOperation::build_rules(Vec::<String>::new()),
//! ];
//!
//! // Adapters are injected (see `instagen_adapters::default_app`).
//! let app = SetupApp::new(project, ops, store, engine, filesystem);
//! app.generate().unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationReport, SetupApp, SetupOperation, StepPlan, Workspace,
        ports::{Filesystem, TemplateEngine, TemplateStore},
    };
    pub use crate::domain::{
        Project, SettingKey, Settings, TemplateCategory, TemplateRef, ToolchainVersion,
        ValueBundle,
    };
    pub use crate::error::{InstagenError, InstagenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
