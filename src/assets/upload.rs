// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::assets::{asset_href, asset_map_mut, file_name};
use crate::config::UploadOptions;
use crate::errors::TaskError;
use crate::traits::StorageClient;
use crate::utils::substitute_template;

/// Upload an item's local asset files and point their hrefs at the uploads.
///
/// Each asset goes to `<path_template>/<file name>`, with the template
/// filled from the item. The asset's `type` is sent as `ContentType`, merged
/// with the configured headers (configured values win). Assets whose local
/// file does not exist are skipped with a warning; selected keys the item does
/// not have are ignored.
pub async fn upload_item_assets(
    storage: &dyn StorageClient,
    item: &Value,
    assets: Option<&[&str]>,
    options: &UploadOptions,
) -> Result<Value, TaskError> {
    let template = options.require_path_template()?;
    let mut updated = item.clone();
    let Some(asset_map) = asset_map_mut(&mut updated)? else {
        return Ok(updated);
    };

    let keys: Vec<String> = match assets {
        Some(keys) => keys
            .iter()
            .filter(|k| asset_map.contains_key(**k))
            .map(|k| k.to_string())
            .collect(),
        None => asset_map.keys().cloned().collect(),
    };

    for key in keys {
        let Some(asset) = asset_map.get_mut(&key) else {
            continue;
        };
        let local = asset_href(&key, asset)?.to_string();
        if !tokio::fs::try_exists(&local).await.unwrap_or(false) {
            warn!(asset = %key, file = %local, "cannot upload asset: file does not exist");
            continue;
        }

        let mut headers = BTreeMap::new();
        if let Some(content_type) = asset.get("type").and_then(Value::as_str) {
            headers.insert("ContentType".to_string(), content_type.to_string());
        }
        headers.extend(options.headers.clone());

        let url = substitute_template(&join_template(template, file_name(&local)), item)?;
        debug!(asset = %key, source = %local, destination = %url, "uploading asset");
        let uploaded = storage
            .upload(Path::new(&local), &url, options.is_public(&key), &headers)
            .await?;

        asset["href"] = Value::String(options.published_url(&uploaded));
    }

    Ok(updated)
}

/// Write an item's JSON to `<path_template>/<id>.json`.
///
/// `created` is carried over from a copy already at the destination, or set
/// to now; `updated` is always now. Existing `self` and `canonical` links are
/// replaced with links to the destination, which is returned.
pub async fn upload_item(
    storage: &dyn StorageClient,
    item: &mut Value,
    options: &UploadOptions,
) -> Result<String, TaskError> {
    let template = options.require_path_template()?;
    let id = item
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| TaskError::InvalidInput("item has no string 'id'".to_string()))?;
    let url = substitute_template(&join_template(template, &format!("{}.json", id)), item)?;

    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let existing = if storage.exists(&url).await? {
        existing_created(storage, &url).await?
    } else {
        None
    };
    let created = existing.unwrap_or_else(|| now.clone());

    let fields = item
        .as_object_mut()
        .ok_or_else(|| TaskError::InvalidInput("item must be a mapping".to_string()))?;

    let properties = fields
        .entry("properties")
        .or_insert_with(|| json!({}))
        .as_object_mut()
        .ok_or_else(|| TaskError::InvalidInput("item 'properties' must be a mapping".to_string()))?;
    properties.insert("created".to_string(), Value::String(created));
    properties.insert("updated".to_string(), Value::String(now));

    let links = fields
        .entry("links")
        .or_insert_with(|| json!([]))
        .as_array_mut()
        .ok_or_else(|| TaskError::InvalidInput("item 'links' must be a list".to_string()))?;
    links.retain(|link| !matches!(link.get("rel").and_then(Value::as_str), Some("self" | "canonical")));
    for rel in ["self", "canonical"] {
        links.push(json!({"rel": rel, "href": url, "type": "application/json"}));
    }

    let body = serde_json::to_vec(&*item).map_err(|e| TaskError::InvalidInput(e.to_string()))?;
    debug!(destination = %url, "uploading item");
    storage.write(&url, &body).await?;

    Ok(url)
}

async fn existing_created(
    storage: &dyn StorageClient,
    url: &str,
) -> Result<Option<String>, TaskError> {
    let bytes = storage.read(url).await?;
    let existing: Value = match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(error) => {
            warn!(%url, %error, "existing item is not valid JSON; resetting 'created'");
            return Ok(None);
        }
    };
    Ok(existing
        .pointer("/properties/created")
        .and_then(Value::as_str)
        .map(str::to_string))
}

fn join_template(template: &str, name: &str) -> String {
    format!("{}/{}", template.trim_end_matches('/'), name)
}
