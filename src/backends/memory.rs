// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::errors::StorageError;
use crate::traits::StorageClient;

/// One call to [`StorageClient::upload`] observed by [`MemoryStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    pub local_path: PathBuf,
    pub url: String,
    pub public: bool,
    pub headers: BTreeMap<String, String>,
}

/// Storage kept entirely in memory. Any URL is accepted as a key.
///
/// Uploads read the local file and store its bytes under the target URL,
/// and are recorded so callers can inspect what was published.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    uploads: Mutex<Vec<UploadRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.objects().insert(url.into(), bytes.into());
    }

    pub fn insert_json(&self, url: impl Into<String>, value: &Value) {
        self.insert(url, value.to_string());
    }

    pub fn get(&self, url: &str) -> Option<Vec<u8>> {
        self.objects().get(url).cloned()
    }

    /// The object at `url` parsed as JSON, if present and valid.
    pub fn get_json(&self, url: &str) -> Option<Value> {
        self.get(url)
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
    }

    pub fn uploads(&self) -> Vec<UploadRecord> {
        self.uploads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn objects(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl StorageClient for MemoryStorage {
    async fn read(&self, url: &str) -> Result<Vec<u8>, StorageError> {
        self.get(url).ok_or_else(|| StorageError::NotFound {
            url: url.to_string(),
        })
    }

    async fn write(&self, url: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.insert(url, bytes);
        Ok(())
    }

    async fn upload(
        &self,
        local_path: &Path,
        url: &str,
        public: bool,
        headers: &BTreeMap<String, String>,
    ) -> Result<String, StorageError> {
        let bytes = tokio::fs::read(local_path)
            .await
            .map_err(|source| StorageError::Io {
                url: local_path.display().to_string(),
                source,
            })?;
        self.insert(url, bytes);
        self.uploads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(UploadRecord {
                local_path: local_path.to_path_buf(),
                url: url.to_string(),
                public,
                headers: headers.clone(),
            });
        Ok(url.to_string())
    }

    async fn exists(&self, url: &str) -> Result<bool, StorageError> {
        Ok(self.objects().contains_key(url))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
