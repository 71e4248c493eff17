//! Record extraction from payloads of unknown shape.

use serde_json::Value;
use tracing::{debug, warn};

/// Envelope keys of the document feeds (GTP, BDI, TechRep), in priority order.
pub const DOCUMENT_ENVELOPE_KEYS: &[&str] = &["GTPs", "docs", "documents", "data", "items"];

/// Envelope keys of the SAR feed, in priority order.
pub const SAR_ENVELOPE_KEYS: &[&str] = &["SARList", "sarList", "sars", "data", "results"];

/// Which rule located the records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractPath {
    /// The payload was a non-empty array; its first element was taken.
    FirstElement,
    /// A known envelope key matched.
    EnvelopeKey(String),
    /// No known key; the object's only key was used.
    SingleKey(String),
    /// The object itself is the record collection.
    WholeObject,
}

/// Located records, borrowed from the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<'a> {
    /// The record collection.
    pub records: &'a Value,
    /// How it was found.
    pub path: ExtractPath,
}

/// Locates the record collection inside `payload`.
///
/// A non-empty array yields its first element only. The upstream API wraps
/// each page in a one-element list, so anything past the first element is
/// discarded. Objects are searched with `envelope_keys` first, then the
/// single-key fallback, then taken whole. Empty arrays, `null` and scalars
/// yield `None`.
pub fn extract<'a>(payload: &'a Value, envelope_keys: &[&str]) -> Option<Extraction<'a>> {
    match payload {
        Value::Array(items) => items.first().map(|first| Extraction {
            records: first,
            path: ExtractPath::FirstElement,
        }),
        Value::Object(map) => {
            if let Some((key, records)) = envelope_keys
                .iter()
                .find_map(|key| map.get(*key).map(|records| (*key, records)))
            {
                debug!(key, "Found records under envelope key");
                return Some(Extraction {
                    records,
                    path: ExtractPath::EnvelopeKey(key.to_string()),
                });
            }

            if map.len() == 1 {
                if let Some((key, records)) = map.iter().next() {
                    warn!(key = %key, "Using single key fallback");
                    return Some(Extraction {
                        records,
                        path: ExtractPath::SingleKey(key.clone()),
                    });
                }
            }

            Some(Extraction {
                records: payload,
                path: ExtractPath::WholeObject,
            })
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_element_of_array() {
        let payload = json!([{"a": 1}, {"a": 2}]);
        let found = extract(&payload, DOCUMENT_ENVELOPE_KEYS).unwrap();
        assert_eq!(found.records, &json!({"a": 1}));
        assert_eq!(found.path, ExtractPath::FirstElement);
    }

    #[test]
    fn test_one_element_list_unwraps_inner_array() {
        let payload = json!([[{"id": 1}, {"id": 2}]]);
        let found = extract(&payload, DOCUMENT_ENVELOPE_KEYS).unwrap();
        assert_eq!(found.records, &json!([{"id": 1}, {"id": 2}]));
    }

    #[test]
    fn test_envelope_priority() {
        let payload = json!({"data": [2], "GTPs": [1]});
        let found = extract(&payload, DOCUMENT_ENVELOPE_KEYS).unwrap();
        assert_eq!(found.records, &json!([1]));
        assert_eq!(found.path, ExtractPath::EnvelopeKey("GTPs".to_string()));
    }

    #[test]
    fn test_sar_keys() {
        let payload = json!({"sarList": [{"n": 1}], "total": 1});
        let found = extract(&payload, SAR_ENVELOPE_KEYS).unwrap();
        assert_eq!(found.records, &json!([{"n": 1}]));

        // Document keys do not apply to the SAR feed.
        let payload = json!({"GTPs": [1], "total": 1});
        let found = extract(&payload, SAR_ENVELOPE_KEYS).unwrap();
        assert_eq!(found.path, ExtractPath::WholeObject);
    }

    #[test]
    fn test_single_key_fallback() {
        let payload = json!({"records": [{"x": 1}]});
        let found = extract(&payload, DOCUMENT_ENVELOPE_KEYS).unwrap();
        assert_eq!(found.records, &json!([{"x": 1}]));
        assert_eq!(found.path, ExtractPath::SingleKey("records".to_string()));
    }

    #[test]
    fn test_whole_object() {
        let payload = json!({"id": 1, "name": "n"});
        let found = extract(&payload, DOCUMENT_ENVELOPE_KEYS).unwrap();
        assert_eq!(found.records, &payload);
        assert_eq!(found.path, ExtractPath::WholeObject);
    }

    #[test]
    fn test_unusable_shapes() {
        assert!(extract(&json!([]), DOCUMENT_ENVELOPE_KEYS).is_none());
        assert!(extract(&json!(null), DOCUMENT_ENVELOPE_KEYS).is_none());
        assert!(extract(&json!(42), DOCUMENT_ENVELOPE_KEYS).is_none());
        assert!(extract(&json!("text"), DOCUMENT_ENVELOPE_KEYS).is_none());
    }
}
