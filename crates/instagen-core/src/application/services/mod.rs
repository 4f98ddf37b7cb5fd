//! Application services.
//!
//! `SetupApp` runs the operation list; `Workspace` is what each operation
//! renders and writes through; `ManifestPatcher` updates an existing
//! toolchain manifest in place.

pub mod manifest_patcher;
pub mod pipeline;
pub mod workspace;

pub use manifest_patcher::ManifestPatcher;
pub use pipeline::{GenerationReport, SetupApp, StepOutcome, StepPlan};
pub use workspace::Workspace;
