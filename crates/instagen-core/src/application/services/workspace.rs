//! Workspace - the rendering and writing surface handed to each operation.
//!
//! Rendering a template:
//! 1. Resolve the body from the template store
//! 2. Compile and execute it against the value bundle
//! 3. Create the output directory (and parents, root included)
//! 4. Write category header + rendered text, replacing any existing file
//!
//! Output is assembled in memory and written with a single call, so a failed
//! render never leaves a half-written file behind.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::{
        ManifestPatcher,
        ports::{Filesystem, TemplateEngine, TemplateStore},
    },
    domain::{TemplateCategory, TemplateRef, ToolchainVersion, ValueBundle},
    error::InstagenResult,
};

/// Borrowed view of the adapters plus the output root.
pub struct Workspace<'a> {
    root: &'a Path,
    store: &'a dyn TemplateStore,
    engine: &'a dyn TemplateEngine,
    filesystem: &'a dyn Filesystem,
    patcher: &'a ManifestPatcher,
}

impl<'a> Workspace<'a> {
    pub fn new(
        root: &'a Path,
        store: &'a dyn TemplateStore,
        engine: &'a dyn TemplateEngine,
        filesystem: &'a dyn Filesystem,
        patcher: &'a ManifestPatcher,
    ) -> Self {
        Self {
            root,
            store,
            engine,
            filesystem,
            patcher,
        }
    }

    pub fn root(&self) -> &Path {
        self.root
    }

    pub fn store(&self) -> &dyn TemplateStore {
        self.store
    }

    /// Render `template` into `<root>/<output_dir>/<file_name>`.
    ///
    /// An empty `output_dir` means the root itself. Returns the written path
    /// relative to the root.
    #[instrument(skip(self, bundle), fields(template = %template.path()))]
    pub fn render(
        &self,
        template: &TemplateRef,
        output_dir: &Path,
        file_name: &str,
        bundle: &ValueBundle,
    ) -> InstagenResult<PathBuf> {
        let body = self.store.get(template)?;
        let rendered = self.engine.render(&template.path(), &body, bundle)?;
        self.write_with_header(template.category, output_dir, file_name, &rendered)
    }

    /// Write `body` verbatim after the category header; no substitution.
    pub fn write_plain(
        &self,
        category: TemplateCategory,
        output_dir: &Path,
        file_name: &str,
        body: &str,
    ) -> InstagenResult<PathBuf> {
        self.write_with_header(category, output_dir, file_name, body)
    }

    /// Patch the toolchain manifest in the root, if there is one.
    ///
    /// Returns the manifest path (relative to the root) when it was rewritten,
    /// `None` when no manifest exists.
    pub fn patch_manifest(&self, version: &ToolchainVersion) -> InstagenResult<Option<PathBuf>> {
        let path = self.root.join(ManifestPatcher::MANIFEST);
        let patched = self.patcher.patch(self.filesystem, &path, version)?;
        Ok(patched.then(|| PathBuf::from(ManifestPatcher::MANIFEST)))
    }

    fn write_with_header(
        &self,
        category: TemplateCategory,
        output_dir: &Path,
        file_name: &str,
        body: &str,
    ) -> InstagenResult<PathBuf> {
        let dir = self.root.join(output_dir);
        self.filesystem.create_dir_all(&dir)?;

        let mut content = category.header();
        content.push_str(body);

        let path = dir.join(file_name);
        self.filesystem.write_file(&path, &content)?;
        debug!(path = %path.display(), bytes = content.len(), "file written");

        Ok(output_dir.join(file_name))
    }
}
