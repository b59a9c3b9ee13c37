// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Record-level helpers tasks use from their hooks: software provenance and
//! derived items.

use serde_json::{json, Value};

use crate::config::consts::{PROCESSING_EXTENSION, PROCESSING_SOFTWARE_PROPERTY};
use crate::errors::TaskError;

/// Stamp `processing:software = {name: version}` and declare the processing
/// extension once.
pub fn add_software_version(record: &mut Value, name: &str, version: &str) -> Result<(), TaskError> {
    let object = record.as_object_mut().ok_or_else(|| TaskError::PostProcessType {
        field: "feature".to_string(),
        expected: "type dict",
    })?;

    let extensions = object
        .entry("stac_extensions")
        .or_insert_with(|| Value::Array(Vec::new()));
    let extensions = extensions.as_array_mut().ok_or_else(|| TaskError::PostProcessType {
        field: "stac_extensions".to_string(),
        expected: "type list",
    })?;
    if !extensions.iter().any(|e| e.as_str() == Some(PROCESSING_EXTENSION)) {
        extensions.push(Value::String(PROCESSING_EXTENSION.to_string()));
    }

    let properties = object
        .entry("properties")
        .or_insert_with(|| json!({}));
    let properties = properties.as_object_mut().ok_or_else(|| TaskError::PostProcessType {
        field: "properties".to_string(),
        expected: "type dict",
    })?;
    properties.insert(PROCESSING_SOFTWARE_PROPERTY.to_string(), json!({ name: version }));

    Ok(())
}

/// Deep copy `item`; when it carries exactly one `self` link, the copy gets a
/// `derived_from` link pointing at it.
pub fn create_item_from_item(item: &Value) -> Value {
    let mut derived = item.clone();

    let self_hrefs: Vec<&str> = item
        .get("links")
        .and_then(Value::as_array)
        .map(|links| {
            links
                .iter()
                .filter(|l| l.get("rel").and_then(Value::as_str) == Some("self"))
                .filter_map(|l| l.get("href").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if let [href] = self_hrefs.as_slice() {
        if let Some(links) = derived.get_mut("links").and_then(Value::as_array_mut) {
            links.push(json!({
                "title": "Source STAC Item",
                "rel": "derived_from",
                "href": href,
                "type": "application/json"
            }));
        }
    }

    derived
}
