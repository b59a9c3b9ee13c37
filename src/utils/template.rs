// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! `${...}` path templates for upload destinations.
//!
//! Supported keys:
//! * `collection`, `id` - top-level record fields
//! * `year`, `month`, `day`, `date` - derived from `properties.datetime`
//!   (falling back to `properties.start_datetime`)
//! * any other key - looked up in `properties`, then at the top level
//!
//! ```
//! use serde_json::json;
//! use stac_task::utils::substitute_template;
//!
//! let item = json!({
//!     "id": "S2A_1",
//!     "collection": "sentinel-2-l2a",
//!     "properties": {"datetime": "2023-06-07T10:20:30Z"}
//! });
//! let path = substitute_template("s3://bucket/${collection}/${year}/${month}/${day}/${id}", &item).unwrap();
//! assert_eq!(path, "s3://bucket/sentinel-2-l2a/2023/06/07/S2A_1");
//! ```

use chrono::{DateTime, Datelike, Utc};
use serde_json::Value;

use crate::errors::TemplateError;

/// Substitute every `${key}` in `template` with values taken from `record`.
pub fn substitute_template(template: &str, record: &Value) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find('}').ok_or_else(|| TemplateError::Unterminated {
            template: template.to_string(),
        })?;
        let key = &after[..end];
        output.push_str(&resolve_key(key, record)?);
        rest = &after[end + 1..];
    }
    output.push_str(rest);

    Ok(output)
}

fn resolve_key(key: &str, record: &Value) -> Result<String, TemplateError> {
    let missing = || TemplateError::MissingValue {
        key: key.to_string(),
    };

    match key {
        "year" | "month" | "day" | "date" => {
            let datetime = record_datetime(record)?.ok_or_else(missing)?;
            Ok(match key {
                "year" => format!("{:04}", datetime.year()),
                "month" => format!("{:02}", datetime.month()),
                "day" => format!("{:02}", datetime.day()),
                _ => datetime.format("%Y-%m-%d").to_string(),
            })
        }
        "collection" | "id" => record.get(key).and_then(scalar_to_string).ok_or_else(missing),
        _ => record
            .get("properties")
            .and_then(|p| p.get(key))
            .or_else(|| record.get(key))
            .and_then(scalar_to_string)
            .ok_or_else(missing),
    }
}

fn record_datetime(record: &Value) -> Result<Option<DateTime<Utc>>, TemplateError> {
    let properties = match record.get("properties") {
        Some(p) => p,
        None => return Ok(None),
    };
    let raw = properties
        .get("datetime")
        .and_then(Value::as_str)
        .or_else(|| properties.get("start_datetime").and_then(Value::as_str));

    match raw {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| TemplateError::InvalidDatetime {
                value: raw.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
