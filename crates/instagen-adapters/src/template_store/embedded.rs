//! Template store backed by the compiled-in catalog.

use instagen_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{TemplateCategory, TemplateRef},
    error::InstagenResult,
};
use tracing::trace;

use crate::builtin_templates::{BUILTIN, BuiltinTemplate};

/// Read-only store over a static template catalog.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedStore {
    catalog: &'static [BuiltinTemplate],
}

impl EmbeddedStore {
    /// Store over the templates shipped with instagen.
    pub fn new() -> Self {
        Self { catalog: BUILTIN }
    }

    /// Store over an arbitrary static catalog.
    pub fn with_catalog(catalog: &'static [BuiltinTemplate]) -> Self {
        Self { catalog }
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

impl Default for EmbeddedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore for EmbeddedStore {
    fn get(&self, template: &TemplateRef) -> InstagenResult<String> {
        trace!(template = %template, "embedded lookup");
        self.catalog
            .iter()
            .find(|t| {
                t.category == template.category && t.group == template.group && t.name == template.name
            })
            .map(|t| t.body.to_string())
            .ok_or_else(|| {
                ApplicationError::TemplateNotFound {
                    category: template.category,
                    name: template.path(),
                }
                .into()
            })
    }

    fn list_group(&self, category: TemplateCategory, group: &str) -> Vec<TemplateRef> {
        let mut refs: Vec<_> = self
            .catalog
            .iter()
            .filter(|t| t.category == category && t.group == group)
            .map(BuiltinTemplate::template_ref)
            .collect();
        refs.sort_by(|a, b| a.name.cmp(&b.name));
        refs
    }

    fn list(&self) -> Vec<TemplateRef> {
        let mut refs: Vec<_> = self.catalog.iter().map(BuiltinTemplate::template_ref).collect();
        refs.sort_by(|a, b| (&a.group, &a.name).cmp(&(&b.group, &b.name)));
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_bundled_template() {
        let store = EmbeddedStore::new();
        let body = store
            .get(&TemplateRef::from_stem(
                TemplateCategory::SourceFile,
                "package",
                "config",
            ))
            .unwrap();
        assert!(body.contains("package {{package_name}}"));
    }

    #[test]
    fn unknown_template_is_not_found() {
        let err = EmbeddedStore::new()
            .get(&TemplateRef::from_stem(
                TemplateCategory::CiManifest,
                "github_workflows",
                "release",
            ))
            .unwrap_err();
        assert!(err.to_string().contains("github_workflows/release.yml.tpl"));
    }

    #[test]
    fn category_must_match() {
        let wrong = TemplateRef::new(TemplateCategory::BuildRule, "package", "config.go.tpl");
        assert!(EmbeddedStore::new().get(&wrong).is_err());
    }

    #[test]
    fn makefile_group_is_enumerated_in_name_order() {
        let names: Vec<_> = EmbeddedStore::new()
            .list_group(TemplateCategory::BuildRule, "makefile")
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["Makefile.golib.tpl", "Makefile.tpl"]);
    }

    #[test]
    fn empty_catalog_lists_nothing() {
        static EMPTY: &[BuiltinTemplate] = &[];
        let store = EmbeddedStore::with_catalog(EMPTY);
        assert!(store.is_empty());
        assert!(store.list().is_empty());
        assert!(store.list_group(TemplateCategory::BuildRule, "makefile").is_empty());
    }
}
