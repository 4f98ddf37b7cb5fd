//! Template engine adapters.

mod handlebars;

pub use self::handlebars::HandlebarsEngine;
