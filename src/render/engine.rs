//! Default template engine backed by minijinja.

use minijinja::{path_loader, Environment};
use serde_json::Value;

use crate::render::{escape, filters, RenderError, TemplateRenderer};
use crate::sites::TemplateRef;

/// Jinja-compatible renderer loading templates from the site's template root.
///
/// A fresh environment is built per render since every site has its own
/// root. `.html` templates are auto-escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct MiniJinjaRenderer;

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        Self
    }

    fn environment(template: &TemplateRef) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_loader(path_loader(template.root.clone()));
        env.set_formatter(escape::markup_formatter);
        filters::register(&mut env);
        env
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &TemplateRef, context: &Value) -> Result<String, RenderError> {
        let env = Self::environment(template);
        let wrap = |source| RenderError::Template {
            template: template.name.clone(),
            source,
        };

        let tmpl = env.get_template(&template.name).map_err(wrap)?;
        tmpl.render(context).map_err(wrap)
    }
}
