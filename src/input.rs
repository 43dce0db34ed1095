//! Function input read from the request.

use crate::{
    error::{Error, Result},
    protocol::RunFunctionRequest,
};
use serde::Deserialize;
use std::fmt::Display;

/// Where the template text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TemplateSourceKind {
    Inline,
    FileSystem,
    Environment,
}

impl Display for TemplateSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TemplateSourceKind::Inline => "Inline",
            TemplateSourceKind::FileSystem => "FileSystem",
            TemplateSourceKind::Environment => "Environment",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InlineSource {
    #[serde(default)]
    pub template: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemSource {
    #[serde(default)]
    pub dir_path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentSource {
    #[serde(default)]
    pub key: String,
}

/// Delimiters as they appear in the input, each side optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Delims {
    pub left: Option<String>,
    pub right: Option<String>,
}

/// A complete left/right delimiter pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterPair {
    pub left: String,
    pub right: String,
}

/// The `GoTemplate` function input.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInput {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    pub source: TemplateSourceKind,
    pub inline: Option<InlineSource>,
    pub file_system: Option<FileSystemSource>,
    pub environment: Option<EnvironmentSource>,
    pub delims: Option<Delims>,
    pub options: Option<Vec<String>>,
}

impl TemplateInput {
    /// Reads the input payload from the request.
    pub fn from_request(req: &RunFunctionRequest) -> Result<Self> {
        let input = req
            .input
            .as_ref()
            .ok_or_else(|| Error::InputError("request carries no input".into()))?;
        serde_json::from_value(input.clone()).map_err(|e| Error::InputError(e.to_string()))
    }

    /// Returns the delimiter pair to compile with, `None` for the defaults.
    ///
    /// Both sides must be given together; they are never merged with defaults.
    pub fn delimiters(&self) -> Result<Option<DelimiterPair>> {
        match &self.delims {
            None => Ok(None),
            Some(Delims { left: None, right: None }) => Ok(None),
            Some(Delims { left: Some(left), right: Some(right) }) => {
                Ok(Some(DelimiterPair { left: left.clone(), right: right.clone() }))
            }
            Some(_) => Err(Error::SourceError(
                "delims must set both left and right".into(),
            )),
        }
    }

    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request_with_input(input: serde_json::Value) -> RunFunctionRequest {
        RunFunctionRequest { input: Some(input), ..Default::default() }
    }

    #[test]
    fn reads_inline_input() {
        let req = request_with_input(json!({
            "apiVersion": "gotemplating.fn.crossplane.io/v1beta1",
            "kind": "GoTemplate",
            "source": "Inline",
            "inline": {"template": "a: 1"},
            "options": ["missingkey=error"]
        }));

        let input = TemplateInput::from_request(&req).unwrap();
        assert_eq!(input.source, TemplateSourceKind::Inline);
        assert_eq!(input.inline.unwrap().template, "a: 1");
        assert_eq!(input.options.unwrap(), vec!["missingkey=error".to_string()]);
    }

    #[test]
    fn missing_input_is_an_input_error() {
        let err = TemplateInput::from_request(&RunFunctionRequest::default()).unwrap_err();
        assert!(matches!(err, Error::InputError(_)));
    }

    #[test]
    fn unknown_source_is_an_input_error() {
        let req = request_with_input(json!({"source": "Git"}));
        assert!(matches!(TemplateInput::from_request(&req), Err(Error::InputError(_))));
    }

    #[test]
    fn delimiters_require_both_sides() {
        let req = request_with_input(json!({"source": "Inline", "delims": {"left": "[["}}));
        let input = TemplateInput::from_request(&req).unwrap();
        assert!(matches!(input.delimiters(), Err(Error::SourceError(_))));

        let req = request_with_input(json!({
            "source": "Inline",
            "delims": {"left": "[[", "right": "]]"}
        }));
        let input = TemplateInput::from_request(&req).unwrap();
        assert_eq!(
            input.delimiters().unwrap(),
            Some(DelimiterPair { left: "[[".into(), right: "]]".into() })
        );
    }

    #[test]
    fn absent_delimiters_use_defaults() {
        let req = request_with_input(json!({"source": "Inline"}));
        let input = TemplateInput::from_request(&req).unwrap();
        assert_eq!(input.delimiters().unwrap(), None);
        assert!(input.options().is_empty());
    }
}
