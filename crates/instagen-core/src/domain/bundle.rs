use serde::Serialize;

/// Flat record of substitution values handed to a template.
///
/// Fields a template does not need stay empty. The two block fields
/// (`dependency_updates`, `makefile_includes`) are either empty or a run of
/// lines each ending in `\n`, so templates can place them on their own line
/// without leaving stray blank lines behind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValueBundle {
    pub binary_name: String,
    pub build_env_prefix: String,
    pub config_name: String,
    pub dependency_updates: String,
    pub toolchain_version: String,
    pub makefile_includes: String,
    pub package_name: String,
}

impl ValueBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binary_name(mut self, value: impl Into<String>) -> Self {
        self.binary_name = value.into();
        self
    }

    pub fn build_env_prefix(mut self, value: impl Into<String>) -> Self {
        self.build_env_prefix = value.into();
        self
    }

    pub fn config_name(mut self, value: impl Into<String>) -> Self {
        self.config_name = value.into();
        self
    }

    pub fn dependency_updates(mut self, value: impl Into<String>) -> Self {
        self.dependency_updates = value.into();
        self
    }

    pub fn toolchain_version(mut self, value: impl Into<String>) -> Self {
        self.toolchain_version = value.into();
        self
    }

    pub fn package_name(mut self, value: impl Into<String>) -> Self {
        self.package_name = value.into();
        self
    }

    /// One `include Makefile.<ext>` line per extension, in supplied order.
    pub fn makefile_includes<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.makefile_includes = extensions
            .into_iter()
            .map(|ext| format!("include Makefile.{}\n", ext.as_ref()))
            .collect();
        self
    }
}
