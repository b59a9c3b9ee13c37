// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for storage clients and payload loading.

use thiserror::Error;

/// Errors returned by a [`crate::traits::StorageClient`].
#[derive(Error, Debug)]
pub enum StorageError {
    /// Nothing exists at the URL.
    #[error("not found: {url}")]
    NotFound { url: String },

    /// The client cannot handle this URL scheme.
    #[error("unsupported URL '{url}': {reason}")]
    UnsupportedUrl { url: String, reason: String },

    /// Local file I/O error.
    #[error("I/O error for '{url}': {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors while loading or serializing a payload document.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("unable to parse payload JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unable to parse payload YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The payload is not a JSON object.
    #[error("payload must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// An indirect payload pointed at another indirect payload.
    #[error("multiple payload indirections are not supported (second indirection at '{href}')")]
    MultipleIndirections { href: String },
}
