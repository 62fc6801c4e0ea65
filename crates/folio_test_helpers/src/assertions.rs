//! Domain-specific assertions for Folio tests

use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;

/// Assert that stderr does NOT contain any of the given strings
pub fn stderr_not_contains(values: &[&str]) -> impl Predicate<str> {
    let owned_values: Vec<String> = values.iter().map(|&s| s.to_string()).collect();
    predicate::function(move |s: &str| !owned_values.iter().any(|v| s.contains(v.as_str())))
}

/// Assert that a string is valid JSON-RPC response
///
/// Checks for basic JSON-RPC structure (jsonrpc field, id, result or error).
///
/// # Example
/// ```rust
/// use folio_test_helpers::assertions::valid_jsonrpc_response;
/// use predicates::prelude::*;
///
/// let response = r#"{"jsonrpc":"2.0","id":1,"result":{}}"#;
/// assert!(valid_jsonrpc_response().eval(response));
/// ```
pub fn valid_jsonrpc_response() -> impl Predicate<str> {
    contains("\"jsonrpc\"")
        .and(contains("\"id\""))
        .and(contains("\"result\"").or(contains("\"error\"")))
}

/// Extract the text of a `{content: [{type: "text", text}]}` tool result
///
/// Panics with the offending value if the shape is wrong.
pub fn tool_text(result: &Value) -> String {
    let content = result
        .get("content")
        .and_then(Value::as_array)
        .unwrap_or_else(|| panic!("tool result has no content array: {}", result));
    assert_eq!(content.len(), 1, "expected exactly one content block: {}", result);
    assert_eq!(content[0]["type"], "text", "content block is not text: {}", result);
    content[0]["text"]
        .as_str()
        .unwrap_or_else(|| panic!("content text is not a string: {}", result))
        .to_string()
}

/// Ids of the pages in a serialized document
pub fn page_ids(doc: &Value) -> Vec<String> {
    ids_in(doc, "pages")
}

/// Ids of the sidebar entries in a serialized document
pub fn sidebar_ids(doc: &Value) -> Vec<String> {
    ids_in(doc, "sidebar")
}

fn ids_in(doc: &Value, key: &str) -> Vec<String> {
    doc[key]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stderr_not_contains() {
        let stderr = "Some output without errors";
        assert!(stderr_not_contains(&["ERROR", "WARN"]).eval(stderr));

        let stderr_with_error = "ERROR: something went wrong";
        assert!(!stderr_not_contains(&["ERROR"]).eval(stderr_with_error));
    }

    #[test]
    fn test_valid_jsonrpc_response() {
        let valid = r#"{"jsonrpc":"2.0","id":1,"result":{}}"#;
        assert!(valid_jsonrpc_response().eval(valid));

        let valid_error = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32600}}"#;
        assert!(valid_jsonrpc_response().eval(valid_error));

        let invalid = r#"{"data":"test"}"#;
        assert!(!valid_jsonrpc_response().eval(invalid));
    }

    #[test]
    fn test_tool_text() {
        let result = json!({ "content": [{ "type": "text", "text": "done" }] });
        assert_eq!(tool_text(&result), "done");
    }

    #[test]
    fn test_ids() {
        let doc = json!({ "pages": [{ "id": "a" }], "sidebar": [] });
        assert_eq!(page_ids(&doc), vec!["a".to_string()]);
        assert!(sidebar_ids(&doc).is_empty());
    }
}
