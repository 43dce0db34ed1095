use super::{interface::TemplateRenderer, library::FunctionLibrary, options::safe_apply_template_options};
use crate::{
    constants::TEMPLATE_NAME,
    context::RequestContext,
    error::{Error, Result},
    input::DelimiterPair,
};
use minijinja::{syntax::SyntaxConfig, Environment, ErrorKind};

/// A parsed template bound to the function library and its delimiters.
pub struct CompiledTemplate {
    env: Environment<'static>,
}

/// Builds the syntax for a custom delimiter pair.
///
/// The pair replaces the expression delimiters. Statement and comment
/// delimiters follow the same shape as Jinja's own defaults: the opening
/// character plus `%` or `#`, and `%` or `#` plus the closing character.
pub fn syntax_for(pair: &DelimiterPair) -> std::result::Result<SyntaxConfig, minijinja::Error> {
    let (Some(open), Some(close)) = (pair.left.chars().next(), pair.right.chars().last()) else {
        return Err(minijinja::Error::new(
            ErrorKind::SyntaxError,
            "template delimiters must not be empty",
        ));
    };

    SyntaxConfig::builder()
        .variable_delimiters(pair.left.clone(), pair.right.clone())
        .block_delimiters(format!("{open}%"), format!("%{close}"))
        .comment_delimiters(format!("{open}#"), format!("#{close}"))
        .build()
}

/// Parses template source with the library's helpers and optional delimiters.
///
/// # Arguments
/// * `library` - Helpers available to the template
/// * `source` - Template text
/// * `delims` - Custom delimiters, `None` for the defaults
///
/// # Returns
/// * `Result<CompiledTemplate>` - Template ready for options and execution
pub fn compile_template(
    library: &FunctionLibrary,
    source: &str,
    delims: Option<&DelimiterPair>,
) -> Result<CompiledTemplate> {
    let mut env = library.environment();
    if let Some(pair) = delims {
        log::debug!("Using template delimiters '{}' '{}'", pair.left, pair.right);
        env.set_syntax(syntax_for(pair).map_err(Error::TemplateParseError)?);
    }
    env.add_template_owned(TEMPLATE_NAME, source.to_string())
        .map_err(Error::TemplateParseError)?;
    Ok(CompiledTemplate { env })
}

impl TemplateRenderer for CompiledTemplate {
    fn execute(&self, context: &RequestContext) -> Result<String> {
        let template =
            self.env.get_template(TEMPLATE_NAME).map_err(Error::TemplateExecutionError)?;
        template.render(context).map_err(Error::TemplateExecutionError)
    }

    fn apply_options(&mut self, options: &[String]) -> Result<()> {
        safe_apply_template_options(&mut self.env, options)
    }
}
