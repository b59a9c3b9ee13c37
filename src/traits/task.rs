// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::config::ConfigView;
use crate::engine::{TaskContext, TaskParameters};
use crate::errors::TaskError;

/// Optional JSON schemas describing a task's input, output and configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

/// A unit of catalog processing run once per invocation.
///
/// Only [`Task::process`] is required. The hooks default to accepting every
/// payload and leaving records unchanged.
#[async_trait]
pub trait Task: Send + Sync {
    fn name(&self) -> &'static str;

    fn version(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn schema(&self) -> TaskSchema {
        TaskSchema::default()
    }

    /// Inspect the payload before execution. `Ok(false)` rejects it.
    fn validate(&self, _view: &ConfigView<'_>) -> Result<bool, TaskError> {
        Ok(true)
    }

    /// Produce output records from the context's input records.
    async fn process(
        &self,
        ctx: &TaskContext,
        parameters: TaskParameters,
    ) -> Result<Vec<Value>, TaskError>;

    /// Adjust one output record before it is written back.
    fn post_process(&self, record: Value) -> Result<Value, TaskError> {
        Ok(record)
    }
}
