// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

use crate::assets;
use crate::config::consts::COLLECTION;
use crate::config::{UploadConfig, UploadOptions};
use crate::errors::TaskError;
use crate::traits::StorageClient;
use crate::utils::make_absolute_href;

/// Everything a task sees while it runs: the input records, the working
/// directory, storage, and the upload settings of the current payload.
pub struct TaskContext {
    task_name: String,
    items: Vec<Value>,
    workdir: PathBuf,
    storage: Arc<dyn StorageClient>,
    upload: bool,
    payload_href: Option<String>,
    upload_config: UploadConfig,
}

impl TaskContext {
    pub fn new(
        task_name: impl Into<String>,
        items: Vec<Value>,
        workdir: impl Into<PathBuf>,
        storage: Arc<dyn StorageClient>,
    ) -> Self {
        Self {
            task_name: task_name.into(),
            items,
            workdir: workdir.into(),
            storage,
            upload: true,
            payload_href: None,
            upload_config: UploadConfig::default(),
        }
    }

    pub fn with_upload(mut self, upload: bool) -> Self {
        self.upload = upload;
        self
    }

    pub fn with_payload_href(mut self, href: Option<String>) -> Self {
        self.payload_href = href;
        self
    }

    pub fn with_upload_config(mut self, upload_config: UploadConfig) -> Self {
        self.upload_config = upload_config;
        self
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    /// Input records, in payload order.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn storage(&self) -> &dyn StorageClient {
        self.storage.as_ref()
    }

    pub fn upload_enabled(&self) -> bool {
        self.upload
    }

    /// Where the payload was read from, if known.
    pub fn payload_href(&self) -> Option<&str> {
        self.payload_href.as_deref()
    }

    /// Resolve an href found in the payload against the payload's location.
    pub fn resolve_href(&self, href: &str) -> String {
        make_absolute_href(href, self.payload_href())
    }

    /// Upload options for `record`, chosen by its `collection`.
    pub fn upload_options_for(&self, record: &Value) -> Result<UploadOptions, TaskError> {
        let collection = record.get(COLLECTION).and_then(Value::as_str);
        Ok(self.upload_config.options_for(collection)?)
    }

    /// Download assets into `<workdir>/<item id>/`.
    pub async fn download_item_assets(
        &self,
        item: &Value,
        assets: Option<&[&str]>,
    ) -> Result<Value, TaskError> {
        let id = item
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| TaskError::InvalidInput("item has no string 'id'".to_string()))?;
        let directory = self.workdir.join(id);
        assets::download_item_assets(self.storage(), item, &directory, assets).await
    }

    /// Upload local assets when uploads are enabled; otherwise return the item
    /// unchanged.
    pub async fn upload_item_assets(
        &self,
        item: &Value,
        assets: Option<&[&str]>,
    ) -> Result<Value, TaskError> {
        if !self.upload {
            warn!(task = %self.task_name, "skipping upload of new and modified assets");
            return Ok(item.clone());
        }
        let options = self.upload_options_for(item)?;
        assets::upload_item_assets(self.storage(), item, assets, &options).await
    }

    /// Upload the item JSON when uploads are enabled, returning its URL.
    pub async fn upload_item(&self, item: &mut Value) -> Result<Option<String>, TaskError> {
        if !self.upload {
            warn!(task = %self.task_name, "skipping upload of item");
            return Ok(None);
        }
        let options = self.upload_options_for(item)?;
        assets::upload_item(self.storage(), item, &options).await.map(Some)
    }
}

impl std::fmt::Debug for TaskContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskContext")
            .field("task_name", &self.task_name)
            .field("item_count", &self.items.len())
            .field("workdir", &self.workdir)
            .field("storage", &self.storage.name())
            .field("upload", &self.upload)
            .field("payload_href", &self.payload_href)
            .finish()
    }
}
