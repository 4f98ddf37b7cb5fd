//! Settings accumulated by setup operations before anything is rendered.
//!
//! Each field is optional: an operation populates it, later operations read
//! it, and absence always means "use the default behaviour".

use std::fmt;

use crate::domain::ToolchainVersion;

/// The fixed vocabulary of settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    NativeInterop,
    PinnedDependencies,
    ToolchainVersion,
}

impl SettingKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NativeInterop => "native_interop",
            Self::PinnedDependencies => "pinned_dependencies",
            Self::ToolchainVersion => "toolchain_version",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-run configuration record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub native_interop: Option<bool>,
    pub pinned_dependencies: Option<Vec<String>>,
    pub toolchain_version: Option<ToolchainVersion>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::NativeInterop => self.native_interop.is_some(),
            SettingKey::PinnedDependencies => self.pinned_dependencies.is_some(),
            SettingKey::ToolchainVersion => self.toolchain_version.is_some(),
        }
    }

    /// Environment prefix placed in front of the build invocation.
    ///
    /// Carries its own trailing space so an unset flag renders as nothing.
    pub fn build_env_prefix(&self) -> &'static str {
        match self.native_interop {
            Some(true) => "CGO_ENABLED=1 ",
            Some(false) => "CGO_ENABLED=0 ",
            None => "",
        }
    }

    /// One `go get -u` recipe line per pinned dependency, in supplied order.
    pub fn dependency_update_lines(&self) -> String {
        self.pinned_dependencies
            .iter()
            .flatten()
            .map(|dep| format!("\tgo get -u {dep}\n"))
            .collect()
    }
}
