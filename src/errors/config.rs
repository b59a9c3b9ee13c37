// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while reading the payload's `process` block.
//!
//! Every variant is fatal to the invocation: the orchestrator should treat
//! `ConfigShape` as "bad payload, reject input" and the remaining variants as
//! "bad configuration".

use thiserror::Error;

/// Errors from the configuration view and the collection resolver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A named configuration field has the wrong structural type.
    #[error("unable to parse '{field}': must be {expected}")]
    ConfigShape {
        /// Offending field, e.g. `workflow_options` or `collection_matchers[1].pattern`
        field: String,
        /// The shape the field must have, e.g. `type dict`
        expected: &'static str,
    },

    /// Both `collection_matchers` and the legacy `upload_options.collections` are set.
    #[error(
        "a payload must not contain both 'collection_matchers' and the legacy 'upload_options.collections'"
    )]
    MutuallyExclusiveConfig,

    /// A collection referenced by a matcher has no resolvable upload options.
    #[error("no upload options found for collection '{collection}': set 'collection_options.{collection}.upload_options' or a global 'upload_options'")]
    MissingUploadOptions { collection: String },

    /// A matcher's `type` is not one of the recognized values.
    #[error("unknown matcher type: '{matcher_type}'")]
    UnknownMatcherType { matcher_type: String },

    /// A JSONPath expression could not be parsed.
    #[error("invalid JSONPath expression '{pattern}': {reason}")]
    InvalidMatcherPattern { pattern: String, reason: String },
}

impl ConfigError {
    /// Shorthand for a [`ConfigError::ConfigShape`] error.
    pub fn shape(field: impl Into<String>, expected: &'static str) -> Self {
        ConfigError::ConfigShape {
            field: field.into(),
            expected,
        }
    }
}
