//! Pipeline runner - main application orchestrator.
//!
//! The runner works in two phases:
//! 1. `SetupApp::new` runs every operation's eager contribution in list
//!    order, so the settings are complete before anything is written
//! 2. `SetupApp::generate` runs every deferred effect in list order and
//!    stops at the first failure
//!
//! Files written by steps before a failure stay on disk.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, info_span, instrument, warn};

use crate::{
    application::{
        ManifestPatcher, SetupOperation, Workspace,
        ports::{Filesystem, TemplateEngine, TemplateStore},
    },
    domain::{Project, Settings, TemplateRef},
    error::{InstagenError, InstagenResult},
};

/// One line of a dry-run plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepPlan {
    /// 1-based position in the operation list.
    pub step: usize,
    pub operation: &'static str,
    pub description: String,
    pub eager: bool,
    pub deferred: bool,
}

/// Files produced by one pipeline step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub operation: &'static str,
    pub written: Vec<PathBuf>,
}

/// Summary of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub root: PathBuf,
    pub steps: Vec<StepOutcome>,
}

impl GenerationReport {
    /// Every written or patched path, relative to the root, in write order.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.steps
            .iter()
            .flat_map(|s| s.written.iter().map(PathBuf::as_path))
    }

    pub fn file_count(&self) -> usize {
        self.steps.iter().map(|s| s.written.len()).sum()
    }

    /// Steps that ran but produced no file.
    pub fn skipped_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.written.is_empty()).count()
    }
}

/// Ordered setup operations bound to one project.
///
/// Consumed by [`SetupApp::generate`]; the accumulated settings live exactly
/// as long as the runner.
pub struct SetupApp {
    project: Project,
    operations: Vec<SetupOperation>,
    settings: Settings,
    root: PathBuf,
    store: Box<dyn TemplateStore>,
    engine: Box<dyn TemplateEngine>,
    filesystem: Box<dyn Filesystem>,
    patcher: ManifestPatcher,
}

impl SetupApp {
    /// Bind `operations` to `project` and run their eager contributions.
    ///
    /// The list is kept in the given order; nothing touches the filesystem
    /// until [`generate`](Self::generate).
    #[instrument(skip_all, fields(project = %project, operations = operations.len()))]
    pub fn new(
        project: Project,
        operations: Vec<SetupOperation>,
        store: Box<dyn TemplateStore>,
        engine: Box<dyn TemplateEngine>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        let mut settings = Settings::new();
        for op in &operations {
            op.contribute(&mut settings);
        }
        debug!(?settings, "settings accumulated");

        Self {
            project,
            operations,
            settings,
            root: PathBuf::from("."),
            store,
            engine,
            filesystem,
            patcher: ManifestPatcher::new(),
        }
    }

    /// Write output below `root` instead of the working directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn operations(&self) -> &[SetupOperation] {
        &self.operations
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Describe every step without running anything.
    pub fn plan(&self) -> Vec<StepPlan> {
        self.operations
            .iter()
            .enumerate()
            .map(|(i, op)| StepPlan {
                step: i + 1,
                operation: op.name(),
                description: op.describe(),
                eager: op.is_eager(),
                deferred: op.is_deferred(),
            })
            .collect()
    }

    /// Bundled templates, sorted by group and name.
    pub fn templates(&self) -> Vec<TemplateRef> {
        self.store.list()
    }

    /// Run every deferred effect in list order.
    pub fn generate(self) -> InstagenResult<GenerationReport> {
        self.generate_with(|_, _| {})
    }

    /// Like [`generate`](Self::generate), calling `on_step` after each
    /// successful step with the step outcome and the total step count.
    pub fn generate_with<F>(self, mut on_step: F) -> InstagenResult<GenerationReport>
    where
        F: FnMut(&StepOutcome, usize),
    {
        info!(
            project = %self.project,
            root = %self.root.display(),
            steps = self.operations.len(),
            "generating"
        );

        let ws = Workspace::new(
            &self.root,
            self.store.as_ref(),
            self.engine.as_ref(),
            self.filesystem.as_ref(),
            &self.patcher,
        );

        let total = self.operations.len();
        let mut report = GenerationReport {
            root: self.root.clone(),
            steps: Vec::with_capacity(total),
        };

        for (i, op) in self.operations.iter().enumerate() {
            let step = i + 1;
            let _span = info_span!("step", step, operation = op.name()).entered();

            let written = op.apply(&self.project, &self.settings, &ws).map_err(|source| {
                warn!(error = %source, "step failed, stopping");
                InstagenError::StepFailed {
                    step,
                    operation: op.name(),
                    source: Box::new(source),
                }
            })?;

            debug!(files = written.len(), "step complete");
            let outcome = StepOutcome {
                step,
                operation: op.name(),
                written,
            };
            on_step(&outcome, total);
            report.steps.push(outcome);
        }

        info!(files = report.file_count(), "generation complete");
        Ok(report)
    }
}
