// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::ConfigView;
use crate::engine::{TaskContext, TaskParameters};
use crate::errors::TaskError;
use crate::traits::Task;

const STUB_VERSION: &str = "0.0.0";

/// A stub task that returns its input records unchanged
pub struct StubTask {
    pub name: &'static str,
}

impl StubTask {
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait::async_trait]
impl Task for StubTask {
    fn name(&self) -> &'static str {
        self.name
    }

    fn version(&self) -> &'static str {
        STUB_VERSION
    }

    fn description(&self) -> &'static str {
        "Returns its input unchanged"
    }

    async fn process(
        &self,
        ctx: &TaskContext,
        _parameters: TaskParameters,
    ) -> Result<Vec<Value>, TaskError> {
        Ok(ctx.items().to_vec())
    }
}

/// A task whose processing always fails
pub struct FailingTask;

#[async_trait::async_trait]
impl Task for FailingTask {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn version(&self) -> &'static str {
        STUB_VERSION
    }

    fn description(&self) -> &'static str {
        "Always fails"
    }

    async fn process(
        &self,
        _ctx: &TaskContext,
        _parameters: TaskParameters,
    ) -> Result<Vec<Value>, TaskError> {
        Err(TaskError::Processing {
            task: self.name().to_string(),
            message: "simulated failure".to_string(),
        })
    }
}

/// A task whose validation hook rejects every payload, either by returning
/// `false` or by failing. Records whether `process` was ever reached.
pub struct RejectingTask {
    pub fail_with_error: bool,
    pub process_called: Arc<AtomicBool>,
}

impl RejectingTask {
    pub fn new(fail_with_error: bool) -> Self {
        Self {
            fail_with_error,
            process_called: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait::async_trait]
impl Task for RejectingTask {
    fn name(&self) -> &'static str {
        "rejecting"
    }

    fn version(&self) -> &'static str {
        STUB_VERSION
    }

    fn description(&self) -> &'static str {
        "Rejects every payload"
    }

    fn validate(&self, _view: &ConfigView<'_>) -> Result<bool, TaskError> {
        if self.fail_with_error {
            Err(TaskError::InvalidInput("no items this task can use".to_string()))
        } else {
            Ok(false)
        }
    }

    async fn process(
        &self,
        ctx: &TaskContext,
        _parameters: TaskParameters,
    ) -> Result<Vec<Value>, TaskError> {
        self.process_called.store(true, Ordering::SeqCst);
        Ok(ctx.items().to_vec())
    }
}

/// A task that ignores its input and returns a fixed list of records
pub struct FixedOutputTask {
    pub records: Vec<Value>,
}

#[async_trait::async_trait]
impl Task for FixedOutputTask {
    fn name(&self) -> &'static str {
        "fixed-output"
    }

    fn version(&self) -> &'static str {
        STUB_VERSION
    }

    fn description(&self) -> &'static str {
        "Returns a fixed set of records"
    }

    async fn process(
        &self,
        _ctx: &TaskContext,
        _parameters: TaskParameters,
    ) -> Result<Vec<Value>, TaskError> {
        Ok(self.records.clone())
    }
}

/// A task that returns one record carrying the parameters it received
pub struct ParameterEchoTask;

#[async_trait::async_trait]
impl Task for ParameterEchoTask {
    fn name(&self) -> &'static str {
        "parameter-echo"
    }

    fn version(&self) -> &'static str {
        STUB_VERSION
    }

    fn description(&self) -> &'static str {
        "Returns its resolved parameters"
    }

    async fn process(
        &self,
        _ctx: &TaskContext,
        parameters: TaskParameters,
    ) -> Result<Vec<Value>, TaskError> {
        Ok(vec![serde_json::json!({
            "id": "parameters",
            "properties": Value::Object(parameters.into_document()),
        })])
    }
}
