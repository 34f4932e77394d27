use crate::error::Result;

/// Trait for template rendering engines.
///
/// A renderer is bound to one configuration context when it is built, so
/// rendering only needs the template itself.
pub trait TemplateRenderer {
    /// Renders a template document.
    ///
    /// # Arguments
    /// * `template_name` - Name used in error messages, normally the source path
    /// * `template` - Template content as string
    ///
    /// # Returns
    /// * `Result<String>` - Rendered output, or a parse/render error carrying the name
    fn render(&self, template_name: &str, template: &str) -> Result<String>;
}
