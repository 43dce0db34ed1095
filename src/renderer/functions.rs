//! Functions that navigate the request from inside a template.
//!
//! The request is the render context, so these read it through the template
//! state. Absent paths yield `none` instead of failing the render.

use crate::constants::{ANNOTATION_KEY_COMPOSITION_RESOURCE_NAME, context_keys::EXTRA_RESOURCES};
use minijinja::{Error, ErrorKind, State, Value};

fn to_json(value: &Value) -> Result<serde_json::Value, Error> {
    serde_json::to_value(value).map_err(|e| {
        Error::new(ErrorKind::InvalidOperation, format!("cannot inspect value: {e}"))
    })
}

/// Reads a top-level request field from the render context.
fn section(state: &State, name: &str) -> Result<serde_json::Value, Error> {
    match state.lookup(name) {
        Some(value) => to_json(&value),
        None => Ok(serde_json::Value::Null),
    }
}

fn lookup<'a>(value: &'a serde_json::Value, path: &[&str]) -> Option<&'a serde_json::Value> {
    path.iter().try_fold(value, |current, segment| current.get(segment))
}

fn to_value(found: Option<&serde_json::Value>) -> Value {
    found.map(Value::from_serialize).unwrap_or_else(|| Value::from(()))
}

/// Returns the observed composite resource body.
pub fn get_composite_resource(state: &State) -> Result<Value, Error> {
    let observed = section(state, "observed")?;
    Ok(to_value(lookup(&observed, &["composite", "resource"])))
}

/// Returns the body of the observed composed resource called `name`.
pub fn get_composed_resource(state: &State, name: &str) -> Result<Value, Error> {
    let observed = section(state, "observed")?;
    Ok(to_value(lookup(&observed, &["resources", name, "resource"])))
}

/// Returns the bodies of the extra resources selected under `name`.
pub fn get_extra_resources(state: &State, name: &str) -> Result<Value, Error> {
    let extra = section(state, EXTRA_RESOURCES)?;
    let items = lookup(&extra, &[name, "items"])
        .and_then(|items| items.as_array())
        .map(|items| items.iter().filter_map(|item| item.get("resource")).collect::<Vec<_>>())
        .unwrap_or_default();
    Ok(Value::from_serialize(&items))
}

/// Returns the condition of type `condition_type` reported by a resource, or an
/// `Unknown` condition when the resource does not report it.
pub fn get_resource_condition(condition_type: &str, resource: Value) -> Result<Value, Error> {
    let resource = to_json(&resource)?;
    let found = lookup(&resource, &["resource", "status", "conditions"])
        .and_then(|conditions| conditions.as_array())
        .and_then(|conditions| {
            conditions.iter().find(|c| {
                c.get("type").and_then(|t| t.as_str()) == Some(condition_type)
            })
        });

    Ok(match found {
        Some(condition) => Value::from_serialize(condition),
        None => Value::from_serialize(serde_json::json!({
            "type": condition_type,
            "status": "Unknown",
        })),
    })
}

/// Renders the annotation line that names a desired resource.
pub fn set_resource_name_annotation(name: &str) -> String {
    format!("{ANNOTATION_KEY_COMPOSITION_RESOURCE_NAME}: {name}")
}
