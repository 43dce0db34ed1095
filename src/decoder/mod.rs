//! Decoding of rendered output into desired resources
//!
//! The module is structured as:
//! - `stream`: Splits the output into documents and decodes each one
//! - `resources`: Records decoded documents in the desired state
//! - `diagnostics`: Locates a decode failure in the rendered output

pub mod diagnostics;
pub mod resources;
pub mod stream;

pub use diagnostics::{get_yaml_error_context, move_to_next_doc, YamlErrorContext};
pub use resources::{record_document, Recorded};
pub use stream::{DecodeError, DocumentStream};

use crate::{
    error::{Error, Result},
    protocol::State,
};
use serde_json::{Map, Value};

/// Decodes rendered manifests into the desired state.
///
/// Documents are recorded in order until the first failure; whatever was
/// recorded before it stays in `desired`. A failure carries the location of
/// the offending line when it can be recovered.
///
/// # Returns
/// * `Result<usize>` - Number of documents recorded as resources
pub fn decode_manifests(
    data: &str,
    desired: &mut State,
    observed_composite: Option<&Map<String, Value>>,
) -> Result<usize> {
    let lines: Vec<&str> = data.lines().collect();
    let mut start_line = 0;
    let mut index = 0;
    let mut recorded = 0;

    for (position, document) in DocumentStream::new(data).enumerate() {
        if position > 0 {
            start_line = move_to_next_doc(&lines, start_line);
        }

        let failure = match document {
            Ok(None) => continue,
            Ok(Some(doc)) => {
                index += 1;
                match record_document(desired, doc, index, observed_composite) {
                    Ok(Recorded::Skipped) => continue,
                    Ok(_) => {
                        recorded += 1;
                        continue;
                    }
                    Err(e) => e,
                }
            }
            Err(e) => e,
        };

        let diagnostic = get_yaml_error_context(&failure, start_line, &lines);
        if !diagnostic.is_empty() {
            log::debug!(
                "Decode failure at line {} ({}): {}",
                diagnostic.abs_line,
                diagnostic.message,
                diagnostic.context
            );
        }
        return Err(Error::DecodeError { source: failure, diagnostic });
    }

    Ok(recorded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Ready;
    use serde_json::json;

    #[test]
    fn records_every_document() {
        let mut desired = State::default();
        let data = "apiVersion: v1\nkind: A\nmetadata:\n  name: a\n---\napiVersion: v1\nkind: B\nmetadata:\n  name: b\n";
        assert_eq!(decode_manifests(data, &mut desired, None).unwrap(), 2);
        assert_eq!(desired.resources.len(), 2);
        assert_eq!(desired.resources["b"].resource["kind"], json!("B"));
    }

    #[test]
    fn failure_points_at_the_offending_line() {
        let mut desired = State::default();
        let err = decode_manifests("a: 1\n---\nb: [1,2\n", &mut desired, None).unwrap_err();

        let Error::DecodeError { diagnostic, .. } = &err else {
            panic!("expected a decode error, got {err:?}");
        };
        assert_eq!(diagnostic.rel_line, 1);
        assert_eq!(diagnostic.abs_line, 3);
        assert_eq!(diagnostic.context, "b: [1,2");
        assert!(err.to_string().ends_with("(line 3: \"b: [1,2\")"));

        // The first document was recorded before the failure.
        assert_eq!(desired.resources.len(), 1);
    }

    #[test]
    fn cursor_accounts_for_skipped_documents() {
        let mut desired = State::default();
        let data = "---\n# nothing\n---\nok: true\n---\nkey: value\n  bad: indent\n";
        let err = decode_manifests(data, &mut desired, None).unwrap_err();

        let Error::DecodeError { diagnostic, .. } = err else { panic!("expected a decode error") };
        assert_eq!(diagnostic.abs_line, 7);
        assert_eq!(diagnostic.context, "  bad: indent");
    }

    #[test]
    fn indented_separator_in_block_scalar_stays_in_the_document() {
        let mut desired = State::default();
        let data = "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: cm\ndata:\n  nested.yaml: |\n    a: 1\n    ---\n    b: 2\n";
        assert_eq!(decode_manifests(data, &mut desired, None).unwrap(), 1);
        assert_eq!(
            desired.resources["cm"].resource["data"]["nested.yaml"],
            json!("a: 1\n---\nb: 2\n")
        );
    }

    #[test]
    fn separator_with_comment_splits_documents() {
        let mut desired = State::default();
        let data = "kind: A\nmetadata:\n  name: a\n--- # second\nkind: B\nmetadata:\n  name: b\n";
        assert_eq!(decode_manifests(data, &mut desired, None).unwrap(), 2);
        assert_eq!(desired.resources["b"].resource["kind"], json!("B"));
    }

    #[test]
    fn cursor_follows_commented_separators() {
        let mut desired = State::default();
        let data = "a: 1\n--- # next\nb: 2\n  c: 3\n";
        let err = decode_manifests(data, &mut desired, None).unwrap_err();

        let Error::DecodeError { diagnostic, .. } = err else { panic!("expected a decode error") };
        assert_eq!(diagnostic.abs_line, 4);
        assert_eq!(diagnostic.context, "  c: 3");
    }

    #[test]
    fn merge_keys_do_not_leak_into_resources() {
        let mut desired = State::default();
        let data = "kind: A\nmetadata:\n  name: a\nbase: &b\n  x: 1\nspec:\n  <<: *b\n  y: 2\n";
        decode_manifests(data, &mut desired, None).unwrap();
        assert_eq!(desired.resources["a"].resource["spec"], json!({"x": 1, "y": 2}));
    }

    #[test]
    fn ready_annotation_reaches_the_resource() {
        let mut desired = State::default();
        let data = "kind: X\nmetadata:\n  annotations:\n    gotemplating.fn.crossplane.io/ready: \"True\"\n";
        decode_manifests(data, &mut desired, None).unwrap();

        let resource = &desired.resources["resource-1"];
        assert_eq!(resource.ready, Ready::True);
        assert!(resource.resource["metadata"].get("annotations").is_none());
    }

    #[test]
    fn empty_output_records_nothing() {
        let mut desired = State::default();
        assert_eq!(decode_manifests("", &mut desired, None).unwrap(), 0);
        assert_eq!(decode_manifests("---\n---\n", &mut desired, None).unwrap(), 0);
        assert!(desired.resources.is_empty());
    }

    #[test]
    fn non_syntax_failures_have_no_location() {
        let mut desired = State::default();
        let err = decode_manifests("- a\n- b\n", &mut desired, None).unwrap_err();
        let Error::DecodeError { source, diagnostic } = err else { panic!("expected a decode error") };
        assert_eq!(source, DecodeError::NotAnObject { document: 1 });
        assert!(diagnostic.is_empty());
    }
}
