//! In-place update of the `go` directive in an existing `go.mod`.
//!
//! Greenfield projects have no manifest yet, so absence is a successful
//! no-op. A manifest that exists but carries no `go X.Y[.Z|rcN|betaN]` line is an
//! error: reporting success while leaving the version untouched would hide
//! a stale toolchain.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::ToolchainVersion,
    error::{InstagenError, InstagenResult},
};

/// Matches the `go` directive line together with any line breaks before it,
/// so the replacement can normalise the spacing above it. A trailing `//`
/// comment is captured and carried over.
static GO_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)(?:\r?\n)*^go[ \t]+\d+\.\d+(?:\.\d+|(?:rc|beta)\d+)?(?P<comment>[ \t]*//[^\r\n]*?)?[ \t]*\r?$",
    )
    .expect("go directive pattern is a valid regex")
});

/// Mode the rewritten manifest is left with.
const MANIFEST_MODE: u32 = 0o644;

#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestPatcher;

impl ManifestPatcher {
    /// Manifest file name, relative to the project root.
    pub const MANIFEST: &'static str = "go.mod";

    pub fn new() -> Self {
        Self
    }

    /// Replace the `go` directive of `content` with `version`.
    ///
    /// Returns `None` when `content` has no directive to replace.
    pub fn rewrite(&self, content: &str, version: &ToolchainVersion) -> Option<String> {
        let caps = GO_DIRECTIVE.captures(content)?;
        let whole = caps.get(0)?;

        let eol = if content.contains("\r\n") { "\r\n" } else { "\n" };
        let gap = if whole.start() == 0 { String::new() } else { eol.repeat(2) };
        let comment = caps.name("comment").map_or("", |m| m.as_str());
        let line_end = if whole.as_str().ends_with('\r') { "\r" } else { "" };

        Some(format!(
            "{}{gap}go {version}{comment}{line_end}{}",
            &content[..whole.start()],
            &content[whole.end()..]
        ))
    }

    /// Patch the manifest at `path`.
    ///
    /// Returns `Ok(false)` if there is no manifest, `Ok(true)` once it has been
    /// rewritten.
    #[instrument(skip(self, fs), fields(path = %path.display(), version = %version))]
    pub fn patch(
        &self,
        fs: &dyn Filesystem,
        path: &Path,
        version: &ToolchainVersion,
    ) -> InstagenResult<bool> {
        if !fs.exists(path) {
            debug!("no manifest to patch");
            return Ok(false);
        }

        let content = fs
            .read_to_string(path)
            .map_err(|e| patch_error(path, format!("read failed: {}", e.root_cause())))?;

        let updated = self
            .rewrite(&content, version)
            .ok_or_else(|| patch_error(path, "no go directive found".to_string()))?;

        fs.write_file(path, &updated)
            .map_err(|e| patch_error(path, format!("write failed: {}", e.root_cause())))?;
        fs.set_mode(path, MANIFEST_MODE)
            .map_err(|e| patch_error(path, format!("chmod failed: {}", e.root_cause())))?;

        info!("manifest toolchain directive updated");
        Ok(true)
    }
}

fn patch_error(path: &Path, reason: String) -> InstagenError {
    ApplicationError::ManifestPatch {
        path: path.to_path_buf(),
        reason,
    }
    .into()
}
