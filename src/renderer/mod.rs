//! Template compilation and execution
//!
//! The module is structured as:
//! - `interface`: Trait implemented by executable templates
//! - `compiler`: Parsing with custom delimiters into a compiled template
//! - `library`: The fixed helper library every template is bound to
//! - `filters`, `functions`: The helpers themselves
//! - `options`: Named execution options and their fault boundary

pub mod compiler;
pub mod filters;
pub mod functions;
pub mod interface;
pub mod library;
pub mod options;

pub use compiler::{compile_template, CompiledTemplate};
pub use interface::TemplateRenderer;
pub use library::FunctionLibrary;
