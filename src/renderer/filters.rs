use base64::{engine::general_purpose::STANDARD, Engine};
use log::warn;
use minijinja::{Error, ErrorKind, Value};
use regex::Regex;
use sha2::{Digest, Sha256};

// Re-export the case conversion functions
pub use cruet::case::{
    camel::to_camel_case, kebab::to_kebab_case, pascal::to_pascal_case,
    screaming_snake::to_screaming_snake_case, snake::to_snake_case, train::to_train_case,
};

fn invalid(msg: impl Into<String>) -> Error {
    Error::new(ErrorKind::InvalidOperation, msg.into())
}

/// Serializes a value as a YAML block, without the trailing newline.
pub fn to_yaml(value: Value) -> Result<String, Error> {
    let yaml = serde_yaml::to_string(&value)
        .map_err(|e| invalid(format!("cannot serialize to YAML: {e}")))?;
    Ok(yaml.trim_end_matches('\n').to_string())
}

/// Parses a YAML document into a template value.
pub fn from_yaml(text: &str) -> Result<Value, Error> {
    let parsed: serde_json::Value = serde_yaml::from_str(text)
        .map_err(|e| invalid(format!("cannot parse YAML: {e}")))?;
    Ok(Value::from_serialize(&parsed))
}

/// Parses a JSON document into a template value.
pub fn from_json(text: &str) -> Result<Value, Error> {
    let parsed: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| invalid(format!("cannot parse JSON: {e}")))?;
    Ok(Value::from_serialize(&parsed))
}

pub fn b64enc(text: &str) -> String {
    STANDARD.encode(text)
}

pub fn b64dec(text: &str) -> Result<String, Error> {
    let bytes = STANDARD
        .decode(text)
        .map_err(|e| invalid(format!("cannot decode base64: {e}")))?;
    String::from_utf8(bytes).map_err(|e| invalid(format!("decoded base64 is not UTF-8: {e}")))
}

pub fn sha256sum(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// Custom regex filter for template processing.
///
/// Tests if a string matches a given regular expression pattern.
///
/// # Arguments
/// * `val` - The string to test
/// * `re` - The regular expression pattern
///
/// # Returns
/// * `bool` - True if the string matches the pattern, false otherwise
pub fn regex_filter(val: &str, re: &str) -> bool {
    match Regex::new(re) {
        Ok(re) => re.is_match(val),
        Err(err) => {
            warn!("Invalid regex '{re}': {err}");
            false
        }
    }
}

/// Replaces every match of `re` in `val`.
pub fn regex_replace(val: &str, re: &str, replacement: &str) -> Result<String, Error> {
    let re = Regex::new(re).map_err(|e| invalid(format!("invalid regex '{re}': {e}")))?;
    Ok(re.replace_all(val, replacement).into_owned())
}
