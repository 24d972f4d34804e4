//! Response envelope conventions.
//!
//! Every service wraps successful payloads as `{"data": <payload>}`. The
//! client flattens exactly one level of that wrapper so callers see the inner
//! resource, never the envelope; bodies that are not JSON at all are kept
//! verbatim.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `{"data": ...}` wrapper used on every success path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A normalized response body from a downstream service.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The body decoded as JSON, envelope already unwrapped.
    Json(Value),
    /// The raw body, kept because it did not decode as JSON.
    Raw(String),
}

impl Payload {
    /// Decode a response body: enveloped JSON is unwrapped one level, other
    /// JSON is returned as-is, anything else is kept raw.
    pub fn decode(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Payload::Json(unwrap_envelope(value)),
            Err(_) => Payload::Raw(String::from_utf8_lossy(body).into_owned()),
        }
    }

    /// The payload as a JSON value; raw bodies become JSON strings.
    pub fn into_value(self) -> Value {
        match self {
            Payload::Json(value) => value,
            Payload::Raw(text) => Value::String(text),
        }
    }
}

/// Flatten a `{"data": ...}` object into its inner value.
///
/// Only an object whose single key is `data` counts as an envelope; anything
/// else is returned untouched.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 => match map.remove("data") {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwraps_single_key_data_envelope() {
        let payload = Payload::decode(br#"{"data": {"id": 1, "title": "X"}}"#);
        assert_eq!(payload, Payload::Json(json!({"id": 1, "title": "X"})));
    }

    #[test]
    fn leaves_unenveloped_object_unchanged() {
        let payload = Payload::decode(br#"{"id": 1, "title": "X"}"#);
        assert_eq!(payload, Payload::Json(json!({"id": 1, "title": "X"})));
    }

    #[test]
    fn data_key_among_others_is_not_an_envelope() {
        let payload = Payload::decode(br#"{"data": 1, "meta": 2}"#);
        assert_eq!(payload, Payload::Json(json!({"data": 1, "meta": 2})));
    }

    #[test]
    fn single_key_object_without_data_is_kept() {
        let payload = Payload::decode(br#"{"result": 1}"#);
        assert_eq!(payload, Payload::Json(json!({"result": 1})));
    }

    #[test]
    fn arrays_pass_through() {
        let payload = Payload::decode(br#"[1, 2, 3]"#);
        assert_eq!(payload, Payload::Json(json!([1, 2, 3])));
    }

    #[test]
    fn unwraps_only_one_level() {
        let payload = Payload::decode(br#"{"data": {"data": 1}}"#);
        assert_eq!(payload, Payload::Json(json!({"data": 1})));
    }

    #[test]
    fn non_json_body_is_kept_raw() {
        let payload = Payload::decode(b"<html>oops</html>");
        assert_eq!(payload, Payload::Raw("<html>oops</html>".to_string()));
    }
}
