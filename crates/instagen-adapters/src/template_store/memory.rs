//! In-memory template store.
//!
//! Mutable at runtime, which the embedded store is not: tests use it to
//! stand in broken or extra templates, embedders to override bodies.

use std::{
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock},
};

use instagen_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{TemplateCategory, TemplateRef},
    error::InstagenResult,
};

use crate::builtin_templates::BUILTIN;

type Key = (String, String);

/// Thread-safe in-memory template store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<Key, (TemplateCategory, String)>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the bundled templates.
    pub fn with_builtin() -> InstagenResult<Self> {
        let store = Self::new();
        for t in BUILTIN {
            store.insert(t.template_ref(), t.body)?;
        }
        Ok(store)
    }

    /// Add or replace a template body.
    pub fn insert(&self, template: TemplateRef, body: impl Into<String>) -> InstagenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        inner.insert(
            (template.group, template.name),
            (template.category, body.into()),
        );
        Ok(())
    }

    /// Drop a template; returns whether it was present.
    pub fn remove(&self, template: &TemplateRef) -> InstagenResult<bool> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        Ok(inner
            .remove(&(template.group.clone(), template.name.clone()))
            .is_some())
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn refs(&self, keep: impl Fn(&TemplateCategory, &str) -> bool) -> Vec<TemplateRef> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .iter()
            .filter(|((group, _), (category, _))| keep(category, group.as_str()))
            .map(|((group, name), (category, _))| TemplateRef::new(*category, group, name))
            .collect()
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, template: &TemplateRef) -> InstagenResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        inner
            .get(&(template.group.clone(), template.name.clone()))
            .filter(|(category, _)| *category == template.category)
            .map(|(_, body)| body.clone())
            .ok_or_else(|| {
                ApplicationError::TemplateNotFound {
                    category: template.category,
                    name: template.path(),
                }
                .into()
            })
    }

    fn list_group(&self, category: TemplateCategory, group: &str) -> Vec<TemplateRef> {
        self.refs(|c, g| *c == category && g == group)
    }

    fn list(&self) -> Vec<TemplateRef> {
        self.refs(|_, _| true)
    }
}
