//! Builds the template execution context from a request.

use crate::{
    constants::context_keys::{EXTRA_RESOURCES, REQUIRED_RESOURCES},
    error::{Error, Result},
    protocol::RunFunctionRequest,
};
use serde_json::{Map, Value};

/// Generic key-value tree templates are executed against.
pub type RequestContext = Map<String, Value>;

/// Converts the request into a generic tree, keeping every field it carries.
///
/// `requiredResources` is copied to `extraResources` when only the former is
/// present, so templates written against the older field name keep working.
pub fn build_request_context(req: &RunFunctionRequest) -> Result<RequestContext> {
    let value = serde_json::to_value(req)
        .map_err(|e| Error::ContextConversionError(format!("cannot serialize request: {e}")))?;

    let Value::Object(mut map) = value else {
        return Err(Error::ContextConversionError(
            "request did not serialize to an object".into(),
        ));
    };

    apply_legacy_resource_keys(&mut map);
    Ok(map)
}

fn apply_legacy_resource_keys(map: &mut RequestContext) {
    if map.contains_key(EXTRA_RESOURCES) {
        return;
    }
    if let Some(required) = map.get(REQUIRED_RESOURCES).cloned() {
        log::debug!("Copying {REQUIRED_RESOURCES} to {EXTRA_RESOURCES}");
        map.insert(EXTRA_RESOURCES.to_string(), required);
    }
}
