//! Recipe configuration.
//!
//! A [`Recipe`] describes which boilerplate a project wants. It is loaded
//! once at startup and passed down by value.  The CLI layer owns it; the
//! core crate only ever sees the operation list built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables, `INSTAGEN__<SECTION>__<KEY>`
//!    (e.g. `INSTAGEN__TOOLCHAIN__VERSION=1.23`; lists are comma separated)
//! 2. Recipe file: `--config`, else `./instagen.toml`, else the user-level
//!    recipe in the platform config directory
//! 3. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use instagen_core::{
    application::SetupOperation,
    domain::{Project, ToolchainVersion},
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// File name looked up in the working directory.
pub const RECIPE_FILE: &str = "instagen.toml";

const ENV_PREFIX: &str = "INSTAGEN";


/// Everything a generation run needs to know.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    pub project: ProjectSection,
    pub toolchain: ToolchainSection,
    pub generate: GenerateSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    pub binary_name: String,
    pub source_dir: PathBuf,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            binary_name: String::new(),
            source_dir: PathBuf::from("app"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_interop: Option<bool>,
    #[serde(deserialize_with = "comma_list")]
    pub pinned: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateSection {
    #[serde(deserialize_with = "comma_list")]
    pub packages: Vec<String>,
    #[serde(deserialize_with = "comma_list")]
    pub workflows: Vec<String>,
    pub makefile: bool,
    #[serde(deserialize_with = "comma_list")]
    pub makefile_extensions: Vec<String>,
    #[serde(deserialize_with = "comma_list")]
    pub owners: Vec<String>,
    pub config_stub: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub no_color: bool,
}

/// Lists come from TOML arrays or, via the environment, comma separated
/// strings.
fn comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrJoined {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match ListOrJoined::deserialize(deserializer)? {
        ListOrJoined::List(items) => items,
        ListOrJoined::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
    })
}

/// A recipe together with the file it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedRecipe {
    pub recipe: Recipe,
    pub path: Option<PathBuf>,
}

impl LoadedRecipe {
    /// The recipe, or an error naming the places that were searched.
    pub fn require(&self) -> CliResult<&Recipe> {
        match self.path {
            Some(_) => Ok(&self.recipe),
            None if self.recipe.project.binary_name.is_empty() => {
                Err(CliError::RecipeNotFound {
                    searched: Recipe::search_paths(),
                })
            }
            // Environment-only recipe
            None => Ok(&self.recipe),
        }
    }
}

impl Recipe {
    /// Locate and load the recipe, layering the environment on top.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<LoadedRecipe> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => Self::search_paths().into_iter().find(|p| p.is_file()),
        };
        let recipe = Self::load_from(path.as_deref())?;
        Ok(LoadedRecipe { recipe, path })
    }

    /// Load from `path` (if any) plus environment overrides.
    pub fn load_from(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading recipe from {}", path.display());
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(true),
            );
        } else {
            debug!("no recipe file, using defaults and environment");
        }

        // No `try_parsing`: it would turn `1.20` into the float `1.2`.
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        let recipe = builder
            .build()
            .context("Failed to build recipe")?
            .try_deserialize::<Self>()
            .context("Failed to deserialize recipe")?;

        Ok(recipe)
    }

    /// Candidate recipe locations, in lookup order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(RECIPE_FILE)];
        paths.extend(Self::user_recipe_path());
        paths
    }

    /// User-level recipe, in the platform config directory.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness.
    pub fn user_recipe_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("io", "instagen", "instagen")
            .map(|d| d.config_dir().join(RECIPE_FILE))
    }

    /// Starter recipe written by `instagen init`.
    pub fn starter() -> Self {
        Self {
            project: ProjectSection {
                binary_name: "my-service".into(),
                source_dir: PathBuf::from("app"),
            },
            toolchain: ToolchainSection {
                version: Some("1.23".into()),
                native_interop: Some(false),
                pinned: Vec::new(),
            },
            generate: GenerateSection {
                packages: vec!["logger".into()],
                workflows: vec!["linter".into(), "test".into()],
                makefile: true,
                makefile_extensions: Vec::new(),
                owners: Vec::new(),
                config_stub: true,
            },
            output: OutputSection::default(),
        }
    }

    /// The project identity the recipe names.
    pub fn project(&self) -> CliResult<Project> {
        Project::new(
            self.project.binary_name.as_str(),
            self.project.source_dir.as_path(),
        )
        .map_err(|e| CliError::Core(e.into()))
    }

    /// Translate the recipe into the ordered operation list.
    ///
    /// Settings come first, then files from the innermost (packages) to the
    /// outermost (repository metadata).
    pub fn operations(&self) -> CliResult<Vec<SetupOperation>> {
        let mut ops = Vec::new();
        let tc = &self.toolchain;
        let gen_ = &self.generate;

        if let Some(version) = &tc.version {
            let version = version
                .parse::<ToolchainVersion>()
                .map_err(|e| CliError::Core(e.into()))?;
            ops.push(SetupOperation::toolchain_version(version));
        }
        if let Some(enabled) = tc.native_interop {
            ops.push(SetupOperation::native_interop(enabled));
        }
        if !tc.pinned.is_empty() {
            ops.push(SetupOperation::pinned_dependencies(tc.pinned.iter().cloned()));
        }
        if !gen_.packages.is_empty() {
            ops.push(SetupOperation::packages(gen_.packages.iter().cloned()));
        }
        if gen_.config_stub {
            ops.push(SetupOperation::config_stub());
        }
        if !gen_.workflows.is_empty() {
            ops.push(SetupOperation::github_workflows(gen_.workflows.iter().cloned()));
        }
        if gen_.makefile {
            ops.push(SetupOperation::build_rules(
                gen_.makefile_extensions.iter().cloned(),
            ));
        }
        if !gen_.owners.is_empty() {
            ops.push(SetupOperation::code_owners(gen_.owners.iter().cloned()));
        }

        Ok(ops)
    }

    /// Serialise as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise recipe: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_recipe(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join(RECIPE_FILE);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn defaults_are_empty() {
        let recipe = Recipe::default();
        assert_eq!(recipe.project.source_dir, PathBuf::from("app"));
        assert!(recipe.operations().unwrap().is_empty());
    }

    #[test]
    fn starter_round_trips_through_toml() {
        let starter = Recipe::starter();
        let text = starter.to_toml().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = write_recipe(dir.path(), &text);
        assert_eq!(Recipe::load_from(Some(&path)).unwrap(), starter);
    }

    #[test]
    fn file_sections_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_recipe(
            dir.path(),
            r#"
[project]
binary_name = "rachio-next-run"
source_dir = "cmd/app"

[toolchain]
version = "1.22.5"
pinned = ["github.com/acme/x"]

[generate]
packages = ["logger", "pushover"]
owners = ["@alice"]
"#,
        );

        let recipe = Recipe::load_from(Some(&path)).unwrap();
        assert_eq!(recipe.project.binary_name, "rachio-next-run");
        assert_eq!(recipe.toolchain.version.as_deref(), Some("1.22.5"));
        assert_eq!(recipe.generate.packages, ["logger", "pushover"]);
        assert!(!recipe.generate.makefile);
        assert_eq!(recipe.project().unwrap().source_dir_name(), "app");
    }

    #[test]
    fn lists_accept_comma_separated_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_recipe(
            dir.path(),
            r#"
[toolchain]
version = "1.20"

[generate]
workflows = "linter, test"
"#,
        );

        let recipe = Recipe::load_from(Some(&path)).unwrap();
        assert_eq!(recipe.generate.workflows, ["linter", "test"]);
        assert_eq!(recipe.toolchain.version.as_deref(), Some("1.20"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Recipe::load_from(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn operations_follow_fixed_order() {
        let recipe = Recipe {
            project: ProjectSection {
                binary_name: "tool".into(),
                source_dir: PathBuf::from("app"),
            },
            toolchain: ToolchainSection {
                version: Some("1.23".into()),
                native_interop: Some(true),
                pinned: vec!["x".into()],
            },
            generate: GenerateSection {
                packages: vec!["logger".into()],
                workflows: vec!["test".into()],
                makefile: true,
                makefile_extensions: vec!["docker".into()],
                owners: vec!["@alice".into()],
                config_stub: true,
            },
            output: OutputSection::default(),
        };

        let names: Vec<_> = recipe
            .operations()
            .unwrap()
            .iter()
            .map(SetupOperation::name)
            .collect();
        assert_eq!(
            names,
            [
                "toolchain_version",
                "native_interop",
                "pinned_dependencies",
                "packages",
                "config_stub",
                "github_workflows",
                "build_rules",
                "code_owners",
            ]
        );
    }

    #[test]
    fn bad_version_is_a_user_error() {
        let mut recipe = Recipe::default();
        recipe.toolchain.version = Some("latest".into());
        let err = recipe.operations().unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn empty_binary_name_is_rejected() {
        assert!(Recipe::default().project().is_err());
    }

    #[test]
    fn without_file_or_env_the_recipe_is_required() {
        let loaded = LoadedRecipe {
            recipe: Recipe::default(),
            path: None,
        };
        assert!(matches!(
            loaded.require(),
            Err(CliError::RecipeNotFound { .. })
        ));
    }

    #[test]
    fn user_recipe_path_ends_with_file_name() {
        if let Some(p) = Recipe::user_recipe_path() {
            assert!(p.ends_with(RECIPE_FILE));
        }
    }
}
