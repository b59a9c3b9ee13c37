// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info, warn};

/// Scratch directory for one task invocation, released on drop.
///
/// A caller-supplied directory is created if absent and kept by default. A
/// fresh temporary directory is discarded by default. Either default can be
/// overridden with the `keep` flag.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
    temp: Option<TempDir>,
    keep: bool,
}

impl WorkDir {
    pub fn acquire(path: Option<&Path>, keep: Option<bool>) -> io::Result<Self> {
        match path {
            Some(path) => {
                std::fs::create_dir_all(path)?;
                Ok(Self {
                    path: path.to_path_buf(),
                    temp: None,
                    keep: keep.unwrap_or(true),
                })
            }
            None => {
                let temp = tempfile::Builder::new().prefix("stac-task-").tempdir()?;
                Ok(Self {
                    path: temp.path().to_path_buf(),
                    temp: Some(temp),
                    keep: keep.unwrap_or(false),
                })
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn keep(&self) -> bool {
        self.keep
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if self.keep {
            if let Some(temp) = self.temp.take() {
                let _ = temp.into_path();
            }
            info!(workdir = %self.path.display(), "keeping working directory");
            return;
        }

        debug!(workdir = %self.path.display(), "removing working directory");
        let result = match self.temp.take() {
            Some(temp) => temp.close(),
            None => std::fs::remove_dir_all(&self.path),
        };
        if let Err(error) = result {
            warn!(workdir = %self.path.display(), %error, "failed to remove working directory");
        }
    }
}
