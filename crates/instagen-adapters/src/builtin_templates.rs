//! Templates compiled into the binary.
//!
//! The set is fixed at build time: every entry is an `include_str!` of a file
//! under `templates/<group>/`, so a missing file is a compile error rather
//! than a runtime lookup failure. Groups map to template categories:
//!
//! | Group              | Category           | Suffix      |
//! |--------------------|--------------------|-------------|
//! | `package`          | `SourceFile`       | `.go.tpl`   |
//! | `config`           | `SourceFile`       | `.go.tpl`   |
//! | `makefile`         | `BuildRule`        | `.tpl`      |
//! | `github_workflows` | `CiManifest`       | `.yml.tpl`  |
//! | `golangci`         | `StructuredConfig` | `.toml.tpl` |

use instagen_core::domain::{TemplateCategory, TemplateRef};

/// One bundled template body and its address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinTemplate {
    pub category: TemplateCategory,
    pub group: &'static str,
    pub name: &'static str,
    pub body: &'static str,
}

impl BuiltinTemplate {
    pub fn template_ref(&self) -> TemplateRef {
        TemplateRef::new(self.category, self.group, self.name)
    }
}

macro_rules! builtin {
    ($category:ident, $group:literal, $name:literal) => {
        BuiltinTemplate {
            category: TemplateCategory::$category,
            group: $group,
            name: $name,
            body: include_str!(concat!("../templates/", $group, "/", $name)),
        }
    };
}

/// Every bundled template, sorted by group then name.
pub static BUILTIN: &[BuiltinTemplate] = &[
    builtin!(SourceFile, "config", "config.go.tpl"),
    builtin!(CiManifest, "github_workflows", "linter.yml.tpl"),
    builtin!(CiManifest, "github_workflows", "test.yml.tpl"),
    builtin!(StructuredConfig, "golangci", "golangci.toml.tpl"),
    builtin!(BuildRule, "makefile", "Makefile.golib.tpl"),
    builtin!(BuildRule, "makefile", "Makefile.tpl"),
    builtin!(SourceFile, "package", "config.go.tpl"),
];
