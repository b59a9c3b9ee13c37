// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Small helpers over `serde_json::Value` shared by the configuration view,
//! the lifecycle controller and the asset helpers.

use serde_json::{Map, Value};
use std::sync::OnceLock;

/// A JSON object, the shape of every "mapping" in a payload.
pub type Document = Map<String, Value>;

/// Shared empty mapping handed out by accessors when a field is absent.
pub fn empty_map() -> &'static Document {
    static EMPTY: OnceLock<Document> = OnceLock::new();
    EMPTY.get_or_init(Map::new)
}

/// Python-style truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
///
/// # Example
/// ```
/// use serde_json::json;
/// use stac_task::utils::is_truthy;
///
/// assert!(!is_truthy(&json!({})));
/// assert!(is_truthy(&json!({"path_template": "/x"})));
/// ```
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Human readable name of a value's JSON type, used in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness_table() {
        let cases = vec![
            (json!(null), false),
            (json!(false), false),
            (json!(true), true),
            (json!(0), false),
            (json!(0.0), false),
            (json!(3), true),
            (json!(""), false),
            (json!("x"), true),
            (json!([]), false),
            (json!([1]), true),
            (json!({}), false),
            (json!({"a": 1}), true),
        ];

        for (value, expected) in cases {
            assert_eq!(is_truthy(&value), expected, "truthiness of {}", value);
        }
    }

    #[test]
    fn test_empty_map_is_shared_and_empty() {
        assert!(empty_map().is_empty());
        assert!(std::ptr::eq(empty_map(), empty_map()));
    }
}
