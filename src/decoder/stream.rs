//! Splits rendered output into documents and decodes them one at a time.

use crate::constants::DOCUMENT_SEPARATOR;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// `line` is relative to the start of the failing document.
    #[error("error converting YAML to JSON: yaml: {}{message}", line_prefix(.line))]
    Yaml { line: Option<usize>, message: String },

    #[error("error decoding JSON stream: json: {}{message}", line_prefix(.line))]
    Json { line: Option<usize>, message: String },

    #[error("document {document} is not an object")]
    NotAnObject { document: usize },

    #[error("invalid \"gotemplating.fn.crossplane.io/ready\" annotation value {value}: must be True, False, or Unspecified")]
    InvalidReadyAnnotation { value: String },
}

fn line_prefix(line: &Option<usize>) -> String {
    line.map(|l| format!("line {l}: ")).unwrap_or_default()
}

/// One decoded chunk of the output: `None` for a document with no content.
pub type DocumentResult = Result<Option<Map<String, Value>>, DecodeError>;

enum Source<'a> {
    Yaml(std::vec::IntoIter<String>),
    Json(serde_json::StreamDeserializer<'a, serde_json::de::StrRead<'a>, Value>),
}

/// Streams the documents of a rendered output in textual order.
///
/// Output whose first non-blank character is `{` is read as a stream of JSON
/// values; anything else is split on separator lines and read as YAML. The
/// stream ends after the first error.
pub struct DocumentStream<'a> {
    source: Source<'a>,
    position: usize,
    failed: bool,
}

impl<'a> DocumentStream<'a> {
    pub fn new(data: &'a str) -> Self {
        let source = if data.trim_start().starts_with('{') {
            Source::Json(serde_json::Deserializer::from_str(data).into_iter())
        } else {
            Source::Yaml(split_documents(data).into_iter())
        };
        Self { source, position: 0, failed: false }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.source, Source::Json(_))
    }
}

/// Whether a line starts a new document.
///
/// The separator must start at column 0 and may only be followed by
/// whitespace or a comment, so indented `---` inside block scalars is content.
pub fn is_separator(line: &str) -> bool {
    line.strip_prefix(DOCUMENT_SEPARATOR).is_some_and(|rest| {
        let rest = rest.trim();
        rest.is_empty() || rest.starts_with('#')
    })
}

/// Splits text into the chunks between separator lines.
pub fn split_documents(data: &str) -> Vec<String> {
    let mut documents = Vec::new();
    let mut current = String::new();
    for line in data.lines() {
        if is_separator(line) {
            documents.push(std::mem::take(&mut current));
            continue;
        }
        current.push_str(line);
        current.push('\n');
    }
    documents.push(current);
    documents
}

fn is_blank(document: &str) -> bool {
    document.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

fn last_content_line(document: &str) -> usize {
    document
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, _)| i + 1)
        .last()
        .unwrap_or(1)
}

fn into_object(value: Value, document: usize) -> DocumentResult {
    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        _ => Err(DecodeError::NotAnObject { document }),
    }
}

fn decode_yaml(document: &str, position: usize) -> DocumentResult {
    if is_blank(document) {
        return Ok(None);
    }
    let mut value = serde_yaml::from_str::<serde_yaml::Value>(document)
        .map_err(|e| yaml_error(&e, document))?;
    value.apply_merge().map_err(|e| yaml_error(&e, document))?;
    let value = serde_yaml::from_value::<Value>(value).map_err(|e| yaml_error(&e, document))?;
    into_object(value, position)
}

fn yaml_error(e: &serde_yaml::Error, document: &str) -> DecodeError {
    let mut message = e.to_string();
    let Some(location) = e.location() else {
        return DecodeError::Yaml { line: None, message };
    };

    // Problems found at end of input are reported past the last line.
    let line = location.line().min(last_content_line(document));
    if line != location.line() {
        let reported = format!(" at line {} column {}", location.line(), location.column());
        message = message.replacen(&reported, "", 1);
    }
    DecodeError::Yaml { line: Some(line), message }
}

impl Iterator for DocumentStream<'_> {
    type Item = DocumentResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = match &mut self.source {
            Source::Yaml(documents) => {
                let document = documents.next()?;
                self.position += 1;
                decode_yaml(&document, self.position)
            }
            Source::Json(values) => {
                let value = values.next()?;
                self.position += 1;
                match value {
                    Ok(value) => into_object(value, self.position),
                    Err(e) => Err(DecodeError::Json {
                        line: (e.line() > 0).then_some(e.line()),
                        message: e.to_string(),
                    }),
                }
            }
        };
        self.failed = result.is_err();
        Some(result)
    }
}
