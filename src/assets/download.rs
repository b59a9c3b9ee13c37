// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::assets::{asset_href, asset_map_mut, file_name};
use crate::errors::TaskError;
use crate::traits::StorageClient;

/// Copy an item's assets into `directory` and point their hrefs at the copies.
///
/// `assets` selects keys to download; `None` downloads every asset. Selecting
/// a key the item does not have is an error, as is an asset whose source
/// cannot be read.
pub async fn download_item_assets(
    storage: &dyn StorageClient,
    item: &Value,
    directory: &Path,
    assets: Option<&[&str]>,
) -> Result<Value, TaskError> {
    let mut item = item.clone();
    let Some(asset_map) = asset_map_mut(&mut item)? else {
        return Ok(item);
    };

    let keys: Vec<String> = match assets {
        Some(keys) => {
            if let Some(missing) = keys.iter().find(|k| !asset_map.contains_key(**k)) {
                return Err(TaskError::InvalidInput(format!(
                    "asset '{}' does not exist on the item",
                    missing
                )));
            }
            keys.iter().map(|k| k.to_string()).collect()
        }
        None => asset_map.keys().cloned().collect(),
    };

    if keys.is_empty() {
        return Ok(item);
    }
    tokio::fs::create_dir_all(directory).await?;

    for key in keys {
        let Some(asset) = asset_map.get_mut(&key) else {
            continue;
        };
        let href = asset_href(&key, asset)?.to_string();
        let local = directory.join(file_name(&href));

        debug!(asset = %key, source = %href, destination = %local.display(), "downloading asset");
        storage.download(&href, &local).await?;

        asset["href"] = Value::String(local.display().to_string());
    }

    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryStorage;
    use crate::errors::StorageError;
    use serde_json::json;

    fn item() -> Value {
        json!({
            "id": "scene",
            "assets": {
                "red": {"href": "mem://bucket/scene/red.tif", "type": "image/tiff"},
                "meta": {"href": "mem://bucket/scene/meta.xml"}
            }
        })
    }

    #[tokio::test]
    async fn test_download_selected_assets() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MemoryStorage::new();
        storage.insert("mem://bucket/scene/red.tif", b"red".to_vec());

        let updated = download_item_assets(&storage, &item(), dir.path(), Some(&["red"]))
            .await
            .unwrap();

        let local = dir.path().join("red.tif");
        assert_eq!(updated["assets"]["red"]["href"], local.display().to_string());
        assert_eq!(updated["assets"]["meta"]["href"], "mem://bucket/scene/meta.xml");
        assert_eq!(std::fs::read(local).unwrap(), b"red");
    }

    #[tokio::test]
    async fn test_download_all_assets() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MemoryStorage::new();
        storage.insert("mem://bucket/scene/red.tif", b"red".to_vec());
        storage.insert("mem://bucket/scene/meta.xml", b"<xml/>".to_vec());

        let updated = download_item_assets(&storage, &item(), dir.path(), None)
            .await
            .unwrap();

        assert!(dir.path().join("meta.xml").exists());
        assert_eq!(
            updated["assets"]["meta"]["href"],
            dir.path().join("meta.xml").display().to_string()
        );
    }

    #[tokio::test]
    async fn test_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MemoryStorage::new();

        let err = download_item_assets(&storage, &item(), dir.path(), Some(&["red"]))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::Storage(StorageError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_unknown_asset_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = download_item_assets(&MemoryStorage::new(), &item(), dir.path(), Some(&["nir"]))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::InvalidInput(_)));
    }
}
