//! Template parsing and rendering
//!
//! - `interface`: The `TemplateRenderer` trait
//! - `minijinja`: The MiniJinja-backed renderer
//! - `functions`: The function library available to templates
//! - `filters`: Extra filters on top of the MiniJinja builtins

pub mod filters;
pub mod functions;
pub mod interface;
pub mod minijinja;

pub use interface::TemplateRenderer;
pub use self::minijinja::MiniJinjaRenderer;
