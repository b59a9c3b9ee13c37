// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors surfaced by a single task invocation.
//!
//! The variants keep the three failure families apart so the orchestrator can
//! tell them apart: bad input (`TaskValidationFailed`, `InvalidInput`,
//! `Config(ConfigShape)`), bad configuration (`Config(..)`,
//! `MissingPathTemplate`) and bugs in task logic (`Processing`,
//! `PostProcessType`).

use thiserror::Error;

use crate::errors::{ConfigError, PayloadError, StorageError, TemplateError};

/// Error type for the task lifecycle and everything a task calls into.
#[derive(Error, Debug)]
pub enum TaskError {
    /// The task's validation hook rejected the payload. Execution never started.
    #[error("task '{task}' rejected the payload: {reason}")]
    TaskValidationFailed { task: String, reason: String },

    /// A post-processed record had the wrong shape.
    #[error("unable to post-process '{field}': must be {expected}")]
    PostProcessType {
        field: String,
        expected: &'static str,
    },

    /// The input records cannot be processed by this task.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Parameters could not be converted into the task's parameter type.
    #[error("invalid parameters for task '{task}': {reason}")]
    InvalidParameters { task: String, reason: String },

    /// Task logic failed.
    #[error("task '{task}' failed: {message}")]
    Processing { task: String, message: String },

    /// An upload was requested but the resolved upload options have no `path_template`.
    #[error("missing required 'path_template' in upload options")]
    MissingPathTemplate,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TaskError {
    /// Short class name used when reporting failures to the caller.
    pub fn kind(&self) -> &'static str {
        match self {
            TaskError::TaskValidationFailed { .. } => "TaskValidationFailure",
            TaskError::PostProcessType { .. } => "PostProcessTypeError",
            TaskError::InvalidInput(_) => "InvalidInput",
            TaskError::InvalidParameters { .. } => "InvalidParameters",
            TaskError::Processing { .. } => "ProcessingError",
            TaskError::MissingPathTemplate => "MissingPathTemplate",
            TaskError::Config(ConfigError::ConfigShape { .. }) => "ConfigShapeError",
            TaskError::Config(ConfigError::MutuallyExclusiveConfig) => "MutuallyExclusiveConfigError",
            TaskError::Config(ConfigError::MissingUploadOptions { .. }) => "MissingUploadOptionsError",
            TaskError::Config(ConfigError::UnknownMatcherType { .. }) => "UnknownMatcherTypeError",
            TaskError::Config(ConfigError::InvalidMatcherPattern { .. }) => "InvalidMatcherPatternError",
            TaskError::Payload(_) => "PayloadError",
            TaskError::Storage(_) => "StorageError",
            TaskError::Template(_) => "TemplateError",
            TaskError::Io(_) => "IoError",
        }
    }
}
