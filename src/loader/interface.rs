use crate::error::Result;

/// Trait for resolving template text from different sources.
pub trait TemplateSourceGetter {
    /// Returns the raw template text.
    ///
    /// # Returns
    /// * `Result<String>` - Template source, ready to be compiled
    fn get_templates(&self) -> Result<String>;
}
