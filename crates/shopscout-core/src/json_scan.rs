//! Generic depth-first search over untyped JSON documents.
//!
//! Collaborator APIs wrap their payloads in nesting that drifts across
//! versions (`data`/`result`/`output` envelopes, graph wrappers, arrays of
//! candidates). Rather than chase exact schemas, callers scan the whole
//! document for the first value that satisfies a predicate. The walk is
//! iterative (explicit stack) and treats the document as the usual sum
//! type: scalar | sequence | mapping.

use serde_json::Value;

/// Returns the first string in depth-first document order for which
/// `pred` returns `true`.
///
/// Note: `serde_json` maps iterate in key-sorted order unless the
/// `preserve_order` feature is enabled, so "document order" within a
/// mapping means key order, not source order. Callers that care about a
/// specific field should match on content, not position.
pub fn find_first_str<F>(doc: &Value, pred: F) -> Option<&str>
where
    F: Fn(&str) -> bool,
{
    let mut stack = vec![doc];
    while let Some(node) = stack.pop() {
        match node {
            Value::String(s) => {
                if pred(s) {
                    return Some(s);
                }
            }
            Value::Array(items) => {
                stack.extend(items.iter().rev());
            }
            Value::Object(map) => {
                stack.extend(map.values().rev());
            }
            _ => {}
        }
    }
    None
}

/// Returns the first sequence in depth-first document order whose elements
/// are all non-empty strings, cloned out as a `Vec<String>`.
///
/// Empty sequences and sequences with any non-string element are skipped;
/// the walk continues into them in case a qualifying sequence is nested
/// deeper.
#[must_use]
pub fn first_string_seq(doc: &Value) -> Option<Vec<String>> {
    let mut stack = vec![doc];
    while let Some(node) = stack.pop() {
        match node {
            Value::Array(items) => {
                if !items.is_empty() {
                    let strings: Vec<String> = items
                        .iter()
                        .filter_map(Value::as_str)
                        .filter(|s| !s.trim().is_empty())
                        .map(ToString::to_string)
                        .collect();
                    if strings.len() == items.len() {
                        return Some(strings);
                    }
                }
                stack.extend(items.iter().rev());
            }
            Value::Object(map) => {
                stack.extend(map.values().rev());
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn is_glb(s: &str) -> bool {
        s.starts_with("https://") && s.ends_with(".glb")
    }

    #[test]
    fn finds_string_at_top_level() {
        let doc = json!("https://cdn.example/model.glb");
        assert_eq!(
            find_first_str(&doc, is_glb),
            Some("https://cdn.example/model.glb")
        );
    }

    #[test]
    fn finds_string_nested_in_arrays_and_objects() {
        let doc = json!({
            "result": {
                "outputs": [
                    {"kind": "preview", "uri": "https://cdn.example/preview.png"},
                    {"kind": "mesh", "uri": "https://cdn.example/model.glb"}
                ]
            }
        });
        assert_eq!(
            find_first_str(&doc, is_glb),
            Some("https://cdn.example/model.glb")
        );
    }

    #[test]
    fn returns_none_when_nothing_matches() {
        let doc = json!({"a": [1, 2, {"b": "not-a-match"}]});
        assert_eq!(find_first_str(&doc, is_glb), None);
    }

    #[test]
    fn array_elements_scan_in_order() {
        let doc = json!(["first.glb", "https://cdn.example/a.glb", "https://cdn.example/b.glb"]);
        assert_eq!(
            find_first_str(&doc, is_glb),
            Some("https://cdn.example/a.glb")
        );
    }

    #[test]
    fn first_string_seq_finds_bare_array() {
        let doc = json!(["modern lamp", "brass lamp"]);
        assert_eq!(
            first_string_seq(&doc),
            Some(vec!["modern lamp".to_string(), "brass lamp".to_string()])
        );
    }

    #[test]
    fn first_string_seq_finds_wrapped_array() {
        let doc = json!({"queries": ["a", "b", "c"]});
        assert_eq!(
            first_string_seq(&doc),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn first_string_seq_skips_mixed_arrays() {
        let doc = json!({"outer": [1, "two"], "inner": {"queries": ["a", "b"]}});
        assert_eq!(
            first_string_seq(&doc),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn first_string_seq_none_for_scalars() {
        assert_eq!(first_string_seq(&json!(42)), None);
        assert_eq!(first_string_seq(&json!({"a": 1})), None);
    }
}
