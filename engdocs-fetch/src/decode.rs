//! Response decoding with a single control-character repair pass.

use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::client::RawResponse;

/// Decodes a response body as JSON.
///
/// Returns `None` when there is no response. A body that does not parse is
/// stripped of disallowed control characters and parsed once more; if that
/// also fails the result is an empty object.
pub fn decode(response: Option<&RawResponse>) -> Option<Value> {
    let response = response?;
    let text = response.text();

    match serde_json::from_str::<Value>(&text) {
        Ok(value) => Some(value),
        Err(first) => {
            warn!("JSON parse error: {}. Attempting to clean response...", first);
            let cleaned = strip_control_chars(&text);
            match serde_json::from_str::<Value>(&cleaned) {
                Ok(value) => {
                    debug!("JSON parsed after removing control characters");
                    Some(value)
                }
                Err(second) => {
                    error!("Failed to parse JSON even after cleaning: {}", second);
                    Some(Value::Object(Map::new()))
                }
            }
        }
    }
}

/// Removes ASCII control characters 0-31 except tab, newline and carriage
/// return.
pub fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| c >= ' ' || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

/// True for values that carry no usable data.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_none() {
        assert!(decode(None).is_none());
    }

    #[test]
    fn test_decode_valid_json() {
        let response = RawResponse::ok(r#"{"GTPs": [{"id": 1}]}"#);
        assert_eq!(decode(Some(&response)), Some(json!({"GTPs": [{"id": 1}]})));
    }

    #[test]
    fn test_decode_repairs_control_characters() {
        let response = RawResponse::ok("{\"a\": 1\u{7}}");
        assert_eq!(decode(Some(&response)), Some(json!({"a": 1})));
    }

    #[test]
    fn test_decode_control_chars_inside_string() {
        let response = RawResponse::ok("[{\"title\": \"line\u{1}break\"}]");
        assert_eq!(decode(Some(&response)), Some(json!([{"title": "linebreak"}])));
    }

    #[test]
    fn test_decode_unrepairable_is_empty_object() {
        let response = RawResponse::ok("<html><body>login</body></html>");
        assert_eq!(decode(Some(&response)), Some(json!({})));
    }

    #[test]
    fn test_strip_keeps_whitespace_controls() {
        assert_eq!(strip_control_chars("a\tb\nc\rd\u{0}e\u{1f}f"), "a\tb\nc\rdef");
        assert_eq!(strip_control_chars("del\u{7f}kept"), "del\u{7f}kept");
    }

    #[test]
    fn test_falsy_values() {
        assert!(is_falsy(&json!(null)));
        assert!(is_falsy(&json!(false)));
        assert!(is_falsy(&json!(0)));
        assert!(is_falsy(&json!(0.0)));
        assert!(is_falsy(&json!("")));
        assert!(is_falsy(&json!([])));
        assert!(is_falsy(&json!({})));

        assert!(!is_falsy(&json!(true)));
        assert!(!is_falsy(&json!(2)));
        assert!(!is_falsy(&json!("x")));
        assert!(!is_falsy(&json!([0])));
        assert!(!is_falsy(&json!({"a": null})));
    }
}
