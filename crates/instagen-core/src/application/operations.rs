//! Setup operations - the closed set of boilerplate steps.
//!
//! Every operation has two parts:
//!
//! - `contribute`: the **eager** part, run once when the operation list is
//!   handed to [`SetupApp`](crate::application::SetupApp). It may only write
//!   settings.
//! - `apply`: the **deferred** part, run by `SetupApp::generate` in list
//!   order. It reads the project identity and the settings and writes files.
//!
//! Because every eager contribution lands before the first deferred effect,
//! an operation may read a setting supplied by an operation listed after it.
//! A setting nobody supplied is still a hard error for operations that need
//! it.
//!
//! | Operation             | Eager writes          | Deferred effect                          |
//! |-----------------------|-----------------------|------------------------------------------|
//! | `packages`            | -                     | `{src}/{pkg}/config.go` per package      |
//! | `toolchain_version`   | `toolchain_version`   | patch `go.mod` if present                |
//! | `native_interop`      | `native_interop`      | -                                        |
//! | `pinned_dependencies` | `pinned_dependencies` | -                                        |
//! | `github_workflows`    | -                     | `.github/workflows/*.yml`, `.golangci.toml` |
//! | `build_rules`         | -                     | every bundled Makefile template          |
//! | `code_owners`         | -                     | `CODEOWNERS`                             |
//! | `config_stub`         | -                     | `{src}/config/config.go`                 |

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, Workspace},
    domain::{
        DomainError, Project, SettingKey, Settings, TemplateCategory, TemplateRef,
        ToolchainVersion, ValueBundle,
    },
    error::InstagenResult,
};

/// Workflow that additionally pulls in the lint configuration.
pub const LINT_WORKFLOW: &str = "linter";

const PACKAGE_GROUP: &str = "package";
const CONFIG_GROUP: &str = "config";
const MAKEFILE_GROUP: &str = "makefile";
const WORKFLOW_GROUP: &str = "github_workflows";
const LINT_GROUP: &str = "golangci";

const WORKFLOW_DIR: &str = ".github/workflows";
const LINT_CONFIG_FILE: &str = ".golangci.toml";
const OWNERS_FILE: &str = "CODEOWNERS";
const STUB_FILE: &str = "config.go";

/// One unit of scaffolding work together with its bound arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOperation {
    Packages { names: Vec<String> },
    ToolchainVersion { version: ToolchainVersion },
    NativeInterop { enabled: bool },
    PinnedDependencies { dependencies: Vec<String> },
    GithubWorkflows { names: Vec<String> },
    BuildRules { extensions: Vec<String> },
    CodeOwners { entries: Vec<String> },
    ConfigStub,
}

impl SetupOperation {
    // ------------------------------------------------------------------------
    // Constructors
    // ------------------------------------------------------------------------

    /// A `config.go` skeleton in `{source_dir}/{name}/` for each name.
    pub fn packages<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Packages {
            names: collect(names),
        }
    }

    /// Record the toolchain version and patch an existing `go.mod`.
    pub fn toolchain_version(version: ToolchainVersion) -> Self {
        Self::ToolchainVersion { version }
    }

    /// Record whether the build needs cgo.
    pub fn native_interop(enabled: bool) -> Self {
        Self::NativeInterop { enabled }
    }

    /// Record module paths the `golib-latest` rule keeps up to date.
    pub fn pinned_dependencies<I, S>(dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::PinnedDependencies {
            dependencies: collect(dependencies),
        }
    }

    /// GitHub Actions workflows by name (`linter`, `test`, ...).
    ///
    /// Repeated names are kept once, at their first position.
    pub fn github_workflows<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in collect(names) {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self::GithubWorkflows { names: unique }
    }

    /// Every bundled Makefile, with one `include Makefile.<ext>` per extension.
    pub fn build_rules<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::BuildRules {
            extensions: collect(extensions),
        }
    }

    /// A CODEOWNERS file with one entry per line; nothing when empty.
    pub fn code_owners<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::CodeOwners {
            entries: collect(entries),
        }
    }

    /// The top-level `config.go` for the source directory.
    pub fn config_stub() -> Self {
        Self::ConfigStub
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    pub fn name(&self) -> &'static str {
        match self {
            Self::Packages { .. } => "packages",
            Self::ToolchainVersion { .. } => "toolchain_version",
            Self::NativeInterop { .. } => "native_interop",
            Self::PinnedDependencies { .. } => "pinned_dependencies",
            Self::GithubWorkflows { .. } => "github_workflows",
            Self::BuildRules { .. } => "build_rules",
            Self::CodeOwners { .. } => "code_owners",
            Self::ConfigStub => "config_stub",
        }
    }

    /// Whether the operation writes settings when the pipeline is built.
    pub fn is_eager(&self) -> bool {
        matches!(
            self,
            Self::ToolchainVersion { .. } | Self::NativeInterop { .. } | Self::PinnedDependencies { .. }
        )
    }

    /// Whether the operation has any effect at generation time.
    pub fn is_deferred(&self) -> bool {
        !matches!(
            self,
            Self::NativeInterop { .. } | Self::PinnedDependencies { .. }
        )
    }

    /// One-line human description, used for plans and dry runs.
    pub fn describe(&self) -> String {
        match self {
            Self::Packages { names } => format!("package skeletons: {}", list_or_none(names)),
            Self::ToolchainVersion { version } => {
                format!("toolchain version {version} (patches go.mod if present)")
            }
            Self::NativeInterop { enabled } => format!("native interop (cgo): {enabled}"),
            Self::PinnedDependencies { dependencies } => {
                format!("pinned dependencies: {}", list_or_none(dependencies))
            }
            Self::GithubWorkflows { names } => format!("GitHub workflows: {}", list_or_none(names)),
            Self::BuildRules { extensions } => {
                format!("Makefiles, includes: {}", list_or_none(extensions))
            }
            Self::CodeOwners { entries } => format!("CODEOWNERS: {}", list_or_none(entries)),
            Self::ConfigStub => "top-level config stub".to_string(),
        }
    }

    // ------------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------------

    /// Eager part: record this operation's settings.
    ///
    /// A later contribution to the same key replaces an earlier one.
    pub fn contribute(&self, settings: &mut Settings) {
        match self {
            Self::ToolchainVersion { version } => {
                settings.toolchain_version = Some(version.clone());
            }
            Self::NativeInterop { enabled } => {
                settings.native_interop = Some(*enabled);
            }
            Self::PinnedDependencies { dependencies } => {
                settings.pinned_dependencies = Some(dependencies.clone());
            }
            _ => {}
        }
    }

    /// Deferred part: perform the file effects.
    ///
    /// Returns the paths written or patched, relative to the output root.
    #[instrument(skip_all, fields(operation = self.name()))]
    pub fn apply(
        &self,
        project: &Project,
        settings: &Settings,
        ws: &Workspace<'_>,
    ) -> InstagenResult<Vec<PathBuf>> {
        match self {
            Self::Packages { names } => apply_packages(project, names, ws),
            Self::ToolchainVersion { version } => Ok(ws.patch_manifest(version)?.into_iter().collect()),
            Self::NativeInterop { .. } | Self::PinnedDependencies { .. } => Ok(Vec::new()),
            Self::GithubWorkflows { names } => apply_workflows(names, settings, ws),
            Self::BuildRules { extensions } => apply_build_rules(project, extensions, settings, ws),
            Self::CodeOwners { entries } => apply_code_owners(entries, ws),
            Self::ConfigStub => apply_config_stub(project, ws),
        }
    }
}

// ----------------------------------------------------------------------------
// Deferred effects
// ----------------------------------------------------------------------------

fn apply_packages(
    project: &Project,
    names: &[String],
    ws: &Workspace<'_>,
) -> InstagenResult<Vec<PathBuf>> {
    let template = TemplateRef::from_stem(TemplateCategory::SourceFile, PACKAGE_GROUP, "config");
    let mut written = Vec::with_capacity(names.len());

    for name in names {
        validate_package_name(name)?;
        let bundle = ValueBundle::new().package_name(name.as_str());
        let dir = project.source_dir().join(name);
        written.push(ws.render(&template, &dir, STUB_FILE, &bundle)?);
    }

    Ok(written)
}

fn apply_workflows(
    names: &[String],
    settings: &Settings,
    ws: &Workspace<'_>,
) -> InstagenResult<Vec<PathBuf>> {
    let version = settings
        .toolchain_version
        .as_ref()
        .ok_or(DomainError::MissingSetting {
            setting: SettingKey::ToolchainVersion.as_str(),
            supplier: "toolchain_version",
            operation: "github_workflows",
        })?;

    let bundle = ValueBundle::new().toolchain_version(version.as_str());
    let mut written = Vec::with_capacity(names.len() + 1);

    for name in names {
        validate_segment("workflow", name)?;
        let template = TemplateRef::from_stem(TemplateCategory::CiManifest, WORKFLOW_GROUP, name);
        written.push(ws.render(&template, Path::new(WORKFLOW_DIR), &format!("{name}.yml"), &bundle)?);
    }

    if names.iter().any(|n| n == LINT_WORKFLOW) {
        debug!("lint workflow requested, rendering lint configuration");
        let template =
            TemplateRef::from_stem(TemplateCategory::StructuredConfig, LINT_GROUP, "golangci");
        written.push(ws.render(&template, Path::new(""), LINT_CONFIG_FILE, &bundle)?);
    }

    Ok(written)
}

fn apply_build_rules(
    project: &Project,
    extensions: &[String],
    settings: &Settings,
    ws: &Workspace<'_>,
) -> InstagenResult<Vec<PathBuf>> {
    for ext in extensions {
        validate_segment("makefile extension", ext)?;
    }

    let templates = ws.store().list_group(TemplateCategory::BuildRule, MAKEFILE_GROUP);
    if templates.is_empty() {
        return Err(ApplicationError::TemplateNotFound {
            category: TemplateCategory::BuildRule,
            name: format!("{MAKEFILE_GROUP}/*"),
        }
        .into());
    }

    let bundle = ValueBundle::new()
        .binary_name(project.binary_name())
        .build_env_prefix(settings.build_env_prefix())
        .dependency_updates(settings.dependency_update_lines())
        .toolchain_version(
            settings
                .toolchain_version
                .as_ref()
                .map(ToolchainVersion::as_str)
                .unwrap_or_default(),
        )
        .makefile_includes(extensions);

    templates
        .iter()
        .map(|template| {
            let output = template.category.output_name(&template.name);
            ws.render(template, Path::new(""), output, &bundle)
        })
        .collect()
}

fn apply_code_owners(entries: &[String], ws: &Workspace<'_>) -> InstagenResult<Vec<PathBuf>> {
    if entries.is_empty() {
        debug!("no code owners supplied, skipping");
        return Ok(Vec::new());
    }
    if let Some(bad) = entries.iter().find(|e| e.trim().is_empty() || e.contains(['\n', '\r'])) {
        return Err(DomainError::InvalidName {
            kind: "code owner entry",
            name: bad.clone(),
            reason: "entries must be non-empty single lines".into(),
        }
        .into());
    }

    let path = ws.write_plain(
        TemplateCategory::Ownership,
        Path::new(""),
        OWNERS_FILE,
        &entries.join("\n"),
    )?;
    Ok(vec![path])
}

fn apply_config_stub(project: &Project, ws: &Workspace<'_>) -> InstagenResult<Vec<PathBuf>> {
    let template = TemplateRef::from_stem(TemplateCategory::SourceFile, CONFIG_GROUP, "config");
    let bundle = ValueBundle::new().config_name(project.source_dir_name());
    let dir = project.source_dir().join(CONFIG_GROUP);
    Ok(vec![ws.render(&template, &dir, STUB_FILE, &bundle)?])
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

fn collect<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

/// Go package names: an identifier starting with a letter or underscore.
fn validate_package_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidName {
        kind: "package",
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = name.chars();
    match chars.next() {
        None => Err(invalid("name cannot be empty")),
        Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
            Err(invalid("must start with a letter or underscore"))
        }
        _ if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') => {
            Err(invalid("only letters, digits and underscores are allowed"))
        }
        _ => Ok(()),
    }
}

/// Names used as a single file-name segment.
fn validate_segment(kind: &'static str, name: &str) -> Result<(), DomainError> {
    let reason = if name.is_empty() {
        Some("name cannot be empty")
    } else if name.contains(['/', '\\']) || name == "." || name == ".." {
        Some("name cannot contain path separators")
    } else if name.contains(char::is_whitespace) {
        Some("name cannot contain whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DomainError::InvalidName {
            kind,
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
