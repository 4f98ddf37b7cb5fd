//! Handlebars template engine.
//!
//! Configured for generating source and config files, not HTML:
//! - strict mode, so a reference to a field the bundle does not carry is a
//!   render error instead of an empty string
//! - escaping disabled, so quotes and angle brackets pass through verbatim

use handlebars::{Handlebars, Template};
use tracing::{debug, instrument};

use instagen_core::{
    application::{ApplicationError, ports::TemplateEngine},
    domain::ValueBundle,
    error::InstagenResult,
};

/// Template engine backed by a strict, non-escaping Handlebars registry.
pub struct HandlebarsEngine {
    registry: Handlebars<'static>,
}

impl HandlebarsEngine {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        Self { registry }
    }
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for HandlebarsEngine {
    #[instrument(skip(self, body, bundle))]
    fn render(&self, name: &str, body: &str, bundle: &ValueBundle) -> InstagenResult<String> {
        Template::compile(body).map_err(|e| ApplicationError::TemplateParse {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        let rendered = self
            .registry
            .render_template(body, bundle)
            .map_err(|e| ApplicationError::RenderingFailed {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        debug!(bytes = rendered.len(), "template rendered");
        Ok(rendered)
    }
}
