// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::{TaskContext, TaskParameters};
use crate::errors::TaskError;
use crate::traits::Task;

/// Passthrough task - returns its input records unchanged
pub struct PassthroughTask;

impl PassthroughTask {
    pub const NAME: &'static str = "passthrough";

    pub fn new() -> Self {
        Self
    }
}

impl Default for PassthroughTask {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Task for PassthroughTask {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Returns the input items unchanged"
    }

    async fn process(
        &self,
        ctx: &TaskContext,
        _parameters: TaskParameters,
    ) -> Result<Vec<Value>, TaskError> {
        Ok(ctx.items().to_vec())
    }
}
