//! # Canonical Serialization
//!
//! Defines [`CanonicalBytes`], the sole construction path for bytes used in
//! digest computation across the ledger.
//!
//! ## Integrity Invariant
//!
//! The inner `Vec<u8>` is private. The only way to construct `CanonicalBytes`
//! is through [`CanonicalBytes::new()`], so every digest in the system is
//! computed over the same serialization. Equal logical content always
//! canonicalizes to equal bytes.
//!
//! ## Canonicalization Rules
//!
//! A coercion pass runs over the value tree first:
//!
//! 1. Floats are rejected — amounts must be integers or strings.
//! 2. Strings that parse as RFC 3339 datetimes are normalized to UTC with a
//!    `Z` suffix, truncated to seconds.
//!
//! After coercion, serialization uses `serde_jcs` for RFC 8785 (JSON
//! Canonicalization Scheme) compliant output: sorted keys, compact
//! separators, deterministic byte sequence.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by canonical JSON serialization.
///
/// The inner `Vec<u8>` is private — downstream code cannot construct
/// `CanonicalBytes` except through [`CanonicalBytes::new()`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// Applies the coercion pass (float rejection, datetime normalization)
    /// and then JCS serialization. This is the only way to construct
    /// `CanonicalBytes`; all digest computation flows through here.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::FloatRejected`] if the value contains
    /// a float anywhere in its tree, or
    /// [`CanonicalizationError::SerializationFailed`] if the value's
    /// `Serialize` implementation or JCS serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let coerced = coerce_json_value(value)?;
        let bytes = serialize_canonical(&coerced)?;
        Ok(Self(bytes))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume and return the inner byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively coerce JSON values ahead of JCS serialization: floats are
/// rejected, datetime strings are normalized, containers are recursed.
fn coerce_json_value(value: Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Number(n) => {
            if !n.is_i64() && !n.is_u64() {
                return Err(CanonicalizationError::FloatRejected(
                    n.as_f64().unwrap_or(f64::NAN),
                ));
            }
            Ok(Value::Number(n))
        }
        Value::String(s) => Ok(Value::String(normalize_datetime(&s))),
        Value::Array(arr) => {
            let coerced: Result<Vec<_>, _> = arr.into_iter().map(coerce_json_value).collect();
            Ok(Value::Array(coerced?))
        }
        Value::Object(map) => {
            let mut coerced = serde_json::Map::new();
            for (k, v) in map {
                coerced.insert(k, coerce_json_value(v)?);
            }
            Ok(Value::Object(coerced))
        }
        // Bool and Null pass through unchanged.
        other => Ok(other),
    }
}

/// Serialize a coerced JSON value in JCS-canonical form (RFC 8785):
/// keys sorted per the JCS ordering rules, compact separators.
fn serialize_canonical(value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
    let s = serde_jcs::to_string(value)?;
    Ok(s.into_bytes())
}

/// If `s` parses as an RFC 3339 datetime, normalize it to UTC ISO 8601 with
/// `Z` suffix, truncated to seconds. Other strings pass through unchanged.
fn normalize_datetime(s: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(s) {
        Ok(dt) => dt
            .with_timezone(&chrono::Utc)
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string(),
        Err(_) => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn canonical_str(value: &Value) -> String {
        let cb = CanonicalBytes::new(value).unwrap();
        String::from_utf8(cb.into_bytes()).unwrap()
    }

    #[test]
    fn object_keys_are_sorted() {
        let v = json!({"b": 2, "a": 1, "c": "hello"});
        assert_eq!(canonical_str(&v), r#"{"a":1,"b":2,"c":"hello"}"#);
    }

    #[test]
    fn nested_objects_are_sorted_recursively() {
        let v = json!({"nested": {"z": 1, "a": 2}, "top": true});
        assert_eq!(canonical_str(&v), r#"{"nested":{"a":2,"z":1},"top":true}"#);
    }

    #[test]
    fn arrays_preserve_order() {
        let v = json!({"arr": [3, 2, 1], "key": "value"});
        assert_eq!(canonical_str(&v), r#"{"arr":[3,2,1],"key":"value"}"#);
    }

    #[test]
    fn scalars_render_compact() {
        let v = json!({"n": null, "b": false, "t": true, "i": 42, "s": "text"});
        assert_eq!(
            canonical_str(&v),
            r#"{"b":false,"i":42,"n":null,"s":"text","t":true}"#
        );
    }

    #[test]
    fn large_and_negative_integers_pass() {
        assert_eq!(canonical_str(&json!({"big": 999999999999u64})), r#"{"big":999999999999}"#);
        assert_eq!(canonical_str(&json!({"neg": -42})), r#"{"neg":-42}"#);
    }

    #[test]
    fn floats_are_rejected() {
        let v = json!({"price": 1.5});
        let err = CanonicalBytes::new(&v).unwrap_err();
        assert!(matches!(err, CanonicalizationError::FloatRejected(_)));
    }

    #[test]
    fn floats_nested_in_arrays_are_rejected() {
        let v = json!({"values": [1, 2.5, 3]});
        assert!(CanonicalBytes::new(&v).is_err());
    }

    #[test]
    fn rfc3339_strings_normalize_to_utc_seconds() {
        let v = json!({"ts": "2026-08-04T17:30:00.123456+05:00"});
        assert_eq!(canonical_str(&v), r#"{"ts":"2026-08-04T12:30:00Z"}"#);
    }

    #[test]
    fn non_datetime_strings_pass_through() {
        let v = json!({"id": "a1b2c3d4"});
        assert_eq!(canonical_str(&v), r#"{"id":"a1b2c3d4"}"#);
    }

    #[test]
    fn string_escapes_survive() {
        let v = json!({"s": "line\nbreak \"quoted\""});
        assert_eq!(canonical_str(&v), r#"{"s":"line\nbreak \"quoted\""}"#);
    }

    #[test]
    fn equal_content_yields_equal_bytes() {
        let a = json!({"x": 1, "y": [true, null]});
        let b = json!({"y": [true, null], "x": 1});
        assert_eq!(
            CanonicalBytes::new(&a).unwrap(),
            CanonicalBytes::new(&b).unwrap()
        );
    }

    #[test]
    fn empty_containers() {
        assert_eq!(canonical_str(&json!({})), "{}");
        assert_eq!(canonical_str(&json!([])), "[]");
    }
}
