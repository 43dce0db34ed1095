use crate::{context::RequestContext, error::Result};

/// Trait for compiled templates that can be executed against a request context.
pub trait TemplateRenderer {
    /// Executes the template.
    ///
    /// # Arguments
    /// * `context` - Request context the template reads from
    ///
    /// # Returns
    /// * `Result<String>` - Rendered manifests
    fn execute(&self, context: &RequestContext) -> Result<String>;

    /// Applies named execution options before the template is executed.
    ///
    /// # Arguments
    /// * `options` - Option names such as `missingkey=error`
    fn apply_options(&mut self, options: &[String]) -> Result<()>;
}
