// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::StorageError;
use crate::traits::StorageClient;

const FILE_SCHEME: &str = "file://";

/// Storage on the local filesystem, addressed by plain paths or `file://` URLs.
///
/// Uploads copy the file to the destination path. `public` and headers have no
/// meaning for local files and are ignored.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn to_path(url: &str) -> Result<PathBuf, StorageError> {
        if let Some(path) = url.strip_prefix(FILE_SCHEME) {
            return Ok(PathBuf::from(path));
        }
        if url.contains("://") {
            return Err(StorageError::UnsupportedUrl {
                url: url.to_string(),
                reason: "only local paths and file:// URLs are supported".to_string(),
            });
        }
        Ok(PathBuf::from(url))
    }

    fn io_error(url: &str, source: std::io::Error) -> StorageError {
        if source.kind() == ErrorKind::NotFound {
            StorageError::NotFound {
                url: url.to_string(),
            }
        } else {
            StorageError::Io {
                url: url.to_string(),
                source,
            }
        }
    }

    async fn ensure_parent(url: &str, path: &Path) -> Result<(), StorageError> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| Self::io_error(url, source)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl StorageClient for LocalStorage {
    async fn read(&self, url: &str) -> Result<Vec<u8>, StorageError> {
        let path = Self::to_path(url)?;
        tokio::fs::read(&path)
            .await
            .map_err(|source| Self::io_error(url, source))
    }

    async fn write(&self, url: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = Self::to_path(url)?;
        Self::ensure_parent(url, &path).await?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| Self::io_error(url, source))
    }

    async fn upload(
        &self,
        local_path: &Path,
        url: &str,
        _public: bool,
        _headers: &BTreeMap<String, String>,
    ) -> Result<String, StorageError> {
        let destination = Self::to_path(url)?;
        Self::ensure_parent(url, &destination).await?;
        debug!(source = %local_path.display(), destination = %destination.display(), "copying file");
        tokio::fs::copy(local_path, &destination)
            .await
            .map_err(|source| Self::io_error(&local_path.display().to_string(), source))?;
        Ok(url.to_string())
    }

    async fn exists(&self, url: &str) -> Result<bool, StorageError> {
        let path = Self::to_path(url)?;
        tokio::fs::try_exists(&path)
            .await
            .map_err(|source| Self::io_error(url, source))
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
