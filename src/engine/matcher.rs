// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! JSONPath predicate evaluation over a single record.

use serde_json::Value;

use crate::errors::ConfigError;

/// True when `expression` selects exactly one node.
///
/// The record is wrapped in a one-element array before evaluation, so filter
/// expressions such as `$[?(@.id == 'a')]` test the record itself. Zero or
/// several selected nodes is not a match.
///
/// # Example
/// ```
/// use serde_json::json;
/// use stac_task::engine::matches_exactly_one;
///
/// let record = json!({"id": "a", "properties": {"platform": "sentinel-2b"}});
/// assert!(matches_exactly_one(&record, "$[?(@.id == 'a')]").unwrap());
/// assert!(!matches_exactly_one(&record, "$[?(@.id == 'b')]").unwrap());
/// assert!(matches_exactly_one(&record, "$[?(@.properties.platform == 'sentinel-2b')]").unwrap());
/// ```
pub fn matches_exactly_one(record: &Value, expression: &str) -> Result<bool, ConfigError> {
    let wrapped = Value::Array(vec![record.clone()]);
    let selected = jsonpath_lib::select(&wrapped, expression).map_err(|e| {
        ConfigError::InvalidMatcherPattern {
            pattern: expression.to_string(),
            reason: format!("{:?}", e),
        }
    })?;
    Ok(selected.len() == 1)
}
