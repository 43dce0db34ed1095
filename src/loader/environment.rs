use crate::constants::ENVIRONMENT_CONTEXT_KEY;
use crate::error::{Error, Result};
use crate::loader::interface::TemplateSourceGetter;
use serde_json::{Map, Value};

/// Getter for templates stored in the pipeline environment.
pub struct EnvironmentGetter {
    template: String,
}

impl EnvironmentGetter {
    /// Looks the template up under `key` in the request's environment.
    pub fn new(context: Option<&Map<String, Value>>, key: &str) -> Result<Self> {
        if key.is_empty() {
            return Err(Error::SourceError("environment.key should be provided".into()));
        }

        let value = context
            .and_then(|ctx| ctx.get(ENVIRONMENT_CONTEXT_KEY))
            .and_then(|env| env.get(key))
            .ok_or_else(|| {
                Error::SourceError(format!("cannot find template '{key}' in the environment"))
            })?;

        match value {
            Value::String(template) => Ok(Self { template: template.clone() }),
            other => Err(Error::SourceError(format!(
                "environment key '{key}' must hold a string, got {other}"
            ))),
        }
    }
}

impl TemplateSourceGetter for EnvironmentGetter {
    fn get_templates(&self) -> Result<String> {
        Ok(self.template.clone())
    }
}
