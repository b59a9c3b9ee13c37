// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::StorageError;

/// Remote object storage as seen by the task framework.
///
/// URLs are opaque to the framework; each implementation decides which
/// schemes it serves and returns [`StorageError::UnsupportedUrl`] otherwise.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Read the whole object at `url`.
    async fn read(&self, url: &str) -> Result<Vec<u8>, StorageError>;

    /// Create or replace the object at `url`.
    async fn write(&self, url: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Upload a local file and return the URL it is reachable at.
    async fn upload(
        &self,
        local_path: &Path,
        url: &str,
        public: bool,
        headers: &BTreeMap<String, String>,
    ) -> Result<String, StorageError>;

    async fn exists(&self, url: &str) -> Result<bool, StorageError>;

    /// Copy the object at `url` to `local_path`.
    async fn download(&self, url: &str, local_path: &Path) -> Result<(), StorageError> {
        let bytes = self.read(url).await?;
        tokio::fs::write(local_path, bytes)
            .await
            .map_err(|source| StorageError::Io {
                url: local_path.display().to_string(),
                source,
            })
    }

    fn name(&self) -> &'static str;
}
