//! Template rendering.
//!
//! # Responsibilities
//! - Define the seam between site resolution and the template engine
//! - Provide the default engine and the custom `json` filter
//!
//! # Design Decisions
//! - The engine receives a template root, a template name relative to it
//!   and a JSON context; it knows nothing about sites
//! - Templates are loaded from disk on each render, matching the
//!   uncached site configs

pub mod engine;
pub mod escape;
pub mod filters;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::sites::TemplateRef;

pub use engine::MiniJinjaRenderer;

/// Template engine failure.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render error in {template}: {source}")]
    Template {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("render context could not be serialized: {0}")]
    Context(#[from] serde_json::Error),
}

/// Renders a template with a context mapping into text.
pub trait TemplateRenderer: Send + Sync + std::fmt::Debug {
    fn render(&self, template: &TemplateRef, context: &Value) -> Result<String, RenderError>;
}

/// Serialize `context` and render `template` with it.
pub fn render_with<T: Serialize>(
    renderer: &dyn TemplateRenderer,
    template: &TemplateRef,
    context: &T,
) -> Result<String, RenderError> {
    let context = serde_json::to_value(context)?;
    renderer.render(template, &context)
}
