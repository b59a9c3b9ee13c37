// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ConfigView;
use crate::errors::{ConfigError, TaskError};
use crate::utils::Document;

/// Effective parameters for one task: workflow options overlaid with the
/// task's own options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskParameters(Document);

impl TaskParameters {
    pub fn new(parameters: Document) -> Self {
        Self(parameters)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_document(&self) -> &Document {
        &self.0
    }

    pub fn into_document(self) -> Document {
        self.0
    }

    /// Deserialize into a task's own parameter type.
    ///
    /// ```
    /// use serde::Deserialize;
    /// use serde_json::json;
    /// use stac_task::engine::TaskParameters;
    ///
    /// #[derive(Deserialize)]
    /// struct Params {
    ///     scale: f64,
    ///     #[serde(default)]
    ///     bands: Vec<String>,
    /// }
    ///
    /// let parameters = TaskParameters::new(json!({"scale": 0.5}).as_object().unwrap().clone());
    /// let params: Params = parameters.deserialize("resample").unwrap();
    /// assert_eq!(params.scale, 0.5);
    /// assert!(params.bands.is_empty());
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self, task: &str) -> Result<T, TaskError> {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(|e| {
            TaskError::InvalidParameters {
                task: task.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

impl From<Document> for TaskParameters {
    fn from(parameters: Document) -> Self {
        Self(parameters)
    }
}

/// `{**workflow_options, **task_options(task)}`: a shallow merge where task
/// options win on key collisions.
pub fn resolve_parameters(view: &ConfigView<'_>, task: &str) -> Result<TaskParameters, ConfigError> {
    let mut parameters = view.workflow_options()?.clone();
    for (key, value) in view.task_options(task)? {
        parameters.insert(key, value);
    }
    Ok(TaskParameters(parameters))
}
