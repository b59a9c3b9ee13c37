// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Moving item assets and items between storage and the working directory.

pub mod download;
pub mod upload;

pub use download::download_item_assets;
pub use upload::{upload_item, upload_item_assets};

use serde_json::Value;

use crate::errors::TaskError;
use crate::utils::Document;

/// The item's `assets` mapping, or `None` when the item has none.
pub(crate) fn asset_map_mut(item: &mut Value) -> Result<Option<&mut Document>, TaskError> {
    match item.get_mut("assets") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(assets)) => Ok(Some(assets)),
        Some(_) => Err(TaskError::InvalidInput(
            "item 'assets' must be a mapping".to_string(),
        )),
    }
}

pub(crate) fn asset_href<'a>(key: &str, asset: &'a Value) -> Result<&'a str, TaskError> {
    asset
        .get("href")
        .and_then(Value::as_str)
        .ok_or_else(|| TaskError::InvalidInput(format!("asset '{}' has no href", key)))
}

/// Last path segment of an href.
pub(crate) fn file_name(href: &str) -> &str {
    href.rsplit('/').next().unwrap_or(href)
}
