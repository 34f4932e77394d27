use super::filters::{regex_filter, regex_replace_filter};
use super::functions::register_all;
use crate::{config::RenderConfig, error::Error, error::Result, renderer::TemplateRenderer};
use minijinja::{AutoEscape, Environment, ErrorKind, Value};
use std::sync::Arc;

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment with the function library registered
    env: Environment<'static>,
    /// The configuration context every template renders against
    context: Value,
}

impl MiniJinjaRenderer {
    /// Creates a renderer bound to a snapshot of `config`.
    ///
    /// The snapshot is normalized and carries the default constants when the
    /// caller set none. The caller's context is never modified.
    pub fn new(config: &RenderConfig) -> Self {
        let mut snapshot = config.clone().normalized();
        snapshot.constants = Some(snapshot.render_constants());
        let snapshot = Arc::new(snapshot);

        let mut env = Environment::new();
        // Rendered files are written byte for byte, never HTML/JSON escaped.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        env.add_filter("regex", regex_filter);
        env.add_filter("regex_replace", regex_replace_filter);
        register_all(&mut env, &snapshot);

        let context = Value::from_serialize(&*snapshot);
        Self { env, context }
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template_name: &str, template: &str) -> Result<String> {
        self.env.render_named_str(template_name, template, &self.context).map_err(|source| {
            let path = template_name.to_string();
            if source.kind() == ErrorKind::SyntaxError {
                Error::TemplateParse { path, source }
            } else {
                Error::TemplateRender { path, source }
            }
        })
    }
}
