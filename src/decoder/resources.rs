//! Turns decoded documents into desired resources.

use super::stream::DecodeError;
use crate::{
    constants::{
        ready, ANNOTATION_KEY_COMPOSITION_RESOURCE_NAME, ANNOTATION_KEY_READY, META_API_VERSION,
    },
    protocol::{Ready, Resource, State},
};
use serde_json::{Map, Value};

/// What happened to a decoded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    /// Recorded as a composed resource under this name.
    Composed(String),
    /// Replaced the desired composite resource.
    Composite,
    /// A function metadata document; not a resource.
    Skipped,
}

fn str_field<'a>(doc: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    doc.get(key).and_then(Value::as_str)
}

/// Removes the function's annotations from a document and returns their values.
fn take_annotations(doc: &mut Map<String, Value>) -> (Option<Value>, Option<Value>) {
    let Some(Value::Object(metadata)) = doc.get_mut("metadata") else {
        return (None, None);
    };
    let Some(Value::Object(annotations)) = metadata.get_mut("annotations") else {
        return (None, None);
    };

    let name = annotations.remove(ANNOTATION_KEY_COMPOSITION_RESOURCE_NAME);
    let ready = annotations.remove(ANNOTATION_KEY_READY);
    if annotations.is_empty() {
        metadata.remove("annotations");
    }
    (name, ready)
}

fn parse_ready(value: Option<Value>) -> Result<Ready, DecodeError> {
    let Some(value) = value else {
        return Ok(Ready::Unspecified);
    };
    match &value {
        Value::Bool(true) => Ok(Ready::True),
        Value::Bool(false) => Ok(Ready::False),
        Value::String(s) if s == ready::TRUE || s == "true" => Ok(Ready::True),
        Value::String(s) if s == ready::FALSE || s == "false" => Ok(Ready::False),
        Value::String(s) if s == ready::UNSPECIFIED => Ok(Ready::Unspecified),
        other => Err(DecodeError::InvalidReadyAnnotation { value: other.to_string() }),
    }
}

fn resource_name(annotation: Option<Value>, doc: &Map<String, Value>, index: usize) -> String {
    match annotation {
        Some(Value::String(name)) => name,
        Some(other) => other.to_string(),
        None => doc
            .get("metadata")
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("resource-{index}")),
    }
}

fn is_observed_composite(doc: &Map<String, Value>, composite: Option<&Map<String, Value>>) -> bool {
    let Some(composite) = composite else {
        return false;
    };
    match (str_field(doc, "apiVersion"), str_field(doc, "kind")) {
        (Some(api_version), Some(kind)) => {
            str_field(composite, "apiVersion") == Some(api_version)
                && str_field(composite, "kind") == Some(kind)
        }
        _ => false,
    }
}

/// Records one decoded document in the desired state.
///
/// # Arguments
/// * `desired` - Desired state being accumulated
/// * `doc` - The decoded document
/// * `index` - 1-based position of the document among non-empty documents
/// * `observed_composite` - Observed composite body, used to recognise
///   documents that update the composite itself
pub fn record_document(
    desired: &mut State,
    mut doc: Map<String, Value>,
    index: usize,
    observed_composite: Option<&Map<String, Value>>,
) -> Result<Recorded, DecodeError> {
    if str_field(&doc, "apiVersion") == Some(META_API_VERSION) {
        log::debug!(
            "Skipping function metadata document {index} of kind {:?}",
            str_field(&doc, "kind")
        );
        return Ok(Recorded::Skipped);
    }

    let (name, ready) = take_annotations(&mut doc);
    let ready = parse_ready(ready)?;

    if is_observed_composite(&doc, observed_composite) {
        log::debug!("Document {index} updates the composite resource");
        desired.composite.get_or_insert_with(Resource::default).resource = doc;
        return Ok(Recorded::Composite);
    }

    let name = resource_name(name, &doc, index);
    if desired.resources.contains_key(&name) {
        log::warn!("Desired resource '{name}' is defined more than once, keeping the last one");
    }
    desired.resources.insert(name.clone(), Resource { resource: doc, ready, ..Default::default() });
    Ok(Recorded::Composed(name))
}
