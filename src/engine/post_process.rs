// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::config::consts::STAC_EXTENSIONS;
use crate::errors::TaskError;

/// Framework checks applied to each output record after the task's own
/// `post_process` hook: the record must be a mapping, and its
/// `stac_extensions`, when present, must be a list of strings. The list is
/// stable-sorted ascending; duplicates are kept.
pub fn normalize_record(mut record: Value) -> Result<Value, TaskError> {
    let fields = record.as_object_mut().ok_or_else(|| TaskError::PostProcessType {
        field: "item".to_string(),
        expected: "type dict",
    })?;

    if let Some(extensions) = fields.get_mut(STAC_EXTENSIONS) {
        let list = extensions.as_array_mut().ok_or_else(extension_error)?;
        if !list.iter().all(Value::is_string) {
            return Err(extension_error());
        }
        list.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
    }

    Ok(record)
}

fn extension_error() -> TaskError {
    TaskError::PostProcessType {
        field: STAC_EXTENSIONS.to_string(),
        expected: "type list of str",
    }
}
