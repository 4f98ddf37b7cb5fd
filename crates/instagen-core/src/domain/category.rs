//! Template categories and their filename / header conventions.

use std::fmt;

use serde::Serialize;

/// Text of the "do not edit" banner written at the top of every generated file.
pub const GENERATED_WARNING: &str = "instagen: File auto generated -- DO NOT EDIT!!!\n";

/// Class of a generated file.
///
/// Determines the comment syntax of the header and, for templated
/// categories, the suffix bundled template files carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    /// Go source files.
    SourceFile,
    /// Makefile fragments.
    BuildRule,
    /// GitHub Actions workflows.
    CiManifest,
    /// TOML tool configuration.
    StructuredConfig,
    /// CODEOWNERS; written directly, never templated.
    Ownership,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 5] = [
        Self::SourceFile,
        Self::BuildRule,
        Self::CiManifest,
        Self::StructuredConfig,
        Self::Ownership,
    ];

    /// Suffix that bundled templates of this category carry.
    pub const fn template_suffix(self) -> &'static str {
        match self {
            Self::SourceFile => ".go.tpl",
            Self::BuildRule => ".tpl",
            Self::CiManifest => ".yml.tpl",
            Self::StructuredConfig => ".toml.tpl",
            Self::Ownership => "",
        }
    }

    const fn comment_prefix(self) -> &'static str {
        match self {
            Self::SourceFile => "// ",
            Self::BuildRule | Self::CiManifest | Self::StructuredConfig | Self::Ownership => "# ",
        }
    }

    /// Header written as the first bytes of every file in this category.
    pub fn header(self) -> String {
        format!("{}{}", self.comment_prefix(), GENERATED_WARNING)
    }

    /// Strip this category's template suffix from a template file name.
    ///
    /// `Makefile.golib.tpl` -> `Makefile.golib`. Names without the suffix are
    /// returned unchanged.
    pub fn output_name(self, template_name: &str) -> &str {
        template_name
            .strip_suffix(self.template_suffix())
            .unwrap_or(template_name)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SourceFile => "source-file",
            Self::BuildRule => "build-rule",
            Self::CiManifest => "ci-manifest",
            Self::StructuredConfig => "structured-config",
            Self::Ownership => "ownership",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address of one bundled template: `<group>/<name>` plus its category.
///
/// `group` is the store subdirectory (`makefile`, `github_workflows`, ...);
/// `name` is the template file name including its suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TemplateRef {
    pub category: TemplateCategory,
    pub group: String,
    pub name: String,
}

impl TemplateRef {
    pub fn new(category: TemplateCategory, group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category,
            group: group.into(),
            name: name.into(),
        }
    }

    /// Reference a template by its stem; the category suffix is appended.
    pub fn from_stem(category: TemplateCategory, group: &str, stem: &str) -> Self {
        Self::new(category, group, format!("{stem}{}", category.template_suffix()))
    }

    pub fn path(&self) -> String {
        format!("{}/{}", self.group, self.name)
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.path(), self.category)
    }
}
