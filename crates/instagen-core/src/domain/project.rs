use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::DomainError;

/// Identity of the project being set up.
///
/// Created once at the start of a run and never mutated: every setup
/// operation and every render reads it.
///
/// The source directory is guaranteed to be **relative** and free of `..`
/// components, so generated packages can never land outside the output root.
/// `.` components are dropped, so it always names a real subdirectory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    binary_name: String,
    source_dir: PathBuf,
}

impl Project {
    /// Create a project identity.
    ///
    /// - `binary_name` is the executable produced by the generated build rules
    /// - `source_dir` is the subdirectory that packages are generated in
    pub fn new(
        binary_name: impl Into<String>,
        source_dir: impl Into<PathBuf>,
    ) -> Result<Self, DomainError> {
        let binary_name = binary_name.into();
        let source_dir: PathBuf = Into::<PathBuf>::into(source_dir)
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();

        if binary_name.trim().is_empty() {
            return Err(DomainError::InvalidProject(
                "binary name cannot be empty".into(),
            ));
        }
        if binary_name.contains(&['/', '\\'][..]) || binary_name.contains(char::is_whitespace) {
            return Err(DomainError::InvalidProject(format!(
                "binary name '{binary_name}' cannot contain path separators or whitespace"
            )));
        }

        if source_dir.as_os_str().is_empty() {
            return Err(DomainError::InvalidProject(
                "source directory must name a subdirectory".into(),
            ));
        }
        if source_dir.is_absolute() {
            return Err(DomainError::InvalidProject(format!(
                "source directory must be relative: {}",
                source_dir.display()
            )));
        }
        if source_dir
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
        {
            return Err(DomainError::InvalidProject(format!(
                "source directory cannot leave the project root: {}",
                source_dir.display()
            )));
        }

        Ok(Self {
            binary_name,
            source_dir,
        })
    }

    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Final component of the source directory (`cmd/app` -> `app`).
    ///
    /// Used as the element name of the generated top-level config.
    pub fn source_dir_name(&self) -> String {
        self.source_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_dir.to_string_lossy().into_owned())
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.binary_name, self.source_dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_project() {
        let p = Project::new("rachio-next-run", "app").unwrap();
        assert_eq!(p.binary_name(), "rachio-next-run");
        assert_eq!(p.source_dir(), Path::new("app"));
        assert_eq!(p.source_dir_name(), "app");
    }

    #[test]
    fn nested_source_dir_uses_leaf_name() {
        let p = Project::new("svc", "cmd/svc").unwrap();
        assert_eq!(p.source_dir_name(), "svc");
    }

    #[test]
    fn rejects_empty_binary() {
        assert!(matches!(
            Project::new("  ", "app"),
            Err(DomainError::InvalidProject(_))
        ));
    }

    #[test]
    fn rejects_binary_with_separator() {
        assert!(Project::new("bin/app", "app").is_err());
        assert!(Project::new("my app", "app").is_err());
    }

    #[test]
    fn current_dir_components_are_dropped() {
        let p = Project::new("svc", "./cmd/./svc").unwrap();
        assert_eq!(p.source_dir(), Path::new("cmd/svc"));
        assert_eq!(p.source_dir_name(), "svc");
    }

    #[test]
    fn rejects_source_dir_that_is_the_root() {
        assert!(Project::new("svc", ".").is_err());
        assert!(Project::new("svc", "./.").is_err());
    }

    #[test]
    fn rejects_escaping_source_dir() {
        assert!(Project::new("app", "").is_err());
        assert!(Project::new("app", "../app").is_err());
        assert!(Project::new("app", "/abs/app").is_err());
    }
}
