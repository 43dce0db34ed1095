use crate::error::{Error, Result};
use crate::loader::interface::TemplateSourceGetter;

/// Getter for templates embedded directly in the function input.
pub struct InlineGetter {
    template: String,
}

impl InlineGetter {
    /// Creates a new InlineGetter, rejecting an empty template.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if template.is_empty() {
            return Err(Error::SourceError("inline.template should be provided".into()));
        }
        Ok(Self { template })
    }
}

impl TemplateSourceGetter for InlineGetter {
    fn get_templates(&self) -> Result<String> {
        Ok(self.template.clone())
    }
}
