use crate::error::{Error, Result};
use crate::input::{TemplateInput, TemplateSourceKind};
use crate::loader::{
    environment::EnvironmentGetter, inline::InlineGetter, interface::TemplateSourceGetter,
    local::LocalGetter,
};
use crate::protocol::RunFunctionRequest;
use std::path::Path;

pub mod environment;
pub mod inline;
pub mod interface;
pub mod local;

/// Creates the getter matching the input's source and validates it.
///
/// # Arguments
/// * `input` - Function input naming the source
/// * `req` - Request whose context the Environment source reads from
/// * `template_root` - Directory relative FileSystem paths are resolved against
///
/// # Returns
/// * `Result<Box<dyn TemplateSourceGetter>>` - Getter yielding the template text
pub fn new_template_source_getter(
    input: &TemplateInput,
    req: &RunFunctionRequest,
    template_root: Option<&Path>,
) -> Result<Box<dyn TemplateSourceGetter>> {
    match input.source {
        TemplateSourceKind::Inline => {
            let inline = input.inline.as_ref().ok_or_else(|| {
                Error::SourceError("inline.template should be provided".into())
            })?;
            Ok(Box::new(InlineGetter::new(inline.template.as_str())?))
        }
        TemplateSourceKind::FileSystem => {
            let dir_path = input
                .file_system
                .as_ref()
                .map(|fs| fs.dir_path.as_str())
                .filter(|p| !p.is_empty())
                .ok_or_else(|| {
                    Error::SourceError("fileSystem.dirPath should be provided".into())
                })?;
            Ok(Box::new(LocalGetter::new(local::resolve_dir(dir_path, template_root))))
        }
        TemplateSourceKind::Environment => {
            let key = input.environment.as_ref().map(|e| e.key.as_str()).unwrap_or_default();
            Ok(Box::new(EnvironmentGetter::new(req.context.as_ref(), key)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: serde_json::Value) -> TemplateInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn inline_source_requires_inline_block() {
        let result = new_template_source_getter(
            &input(json!({"source": "Inline"})),
            &RunFunctionRequest::default(),
            None,
        );
        assert!(matches!(result, Err(Error::SourceError(_))));
    }

    #[test]
    fn filesystem_source_requires_dir_path() {
        let result = new_template_source_getter(
            &input(json!({"source": "FileSystem", "fileSystem": {}})),
            &RunFunctionRequest::default(),
            None,
        );
        assert!(matches!(result, Err(Error::SourceError(_))));
    }

    #[test]
    fn environment_source_requires_key() {
        let result = new_template_source_getter(
            &input(json!({"source": "Environment"})),
            &RunFunctionRequest::default(),
            None,
        );
        assert!(matches!(result, Err(Error::SourceError(_))));
    }

    #[test]
    fn inline_source_yields_template() {
        let getter = new_template_source_getter(
            &input(json!({"source": "Inline", "inline": {"template": "x: 1"}})),
            &RunFunctionRequest::default(),
            None,
        )
        .unwrap();
        assert_eq!(getter.get_templates().unwrap(), "x: 1");
    }
}
