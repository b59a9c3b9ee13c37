// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Runs one task against one payload.
//!
//! # Lifecycle
//!
//! ```text
//! Created -> Validated -> Executing -> PostProcessing -> CollectionAssigning -> Done
//!    \___________\____________\______________\___________________\______-> Failed
//! ```
//!
//! 1. **Created**: the working directory is acquired and the payload's
//!    configuration is checked, then the task's own `validate` hook runs. A
//!    rejection is [`TaskError::TaskValidationFailed`] and the task never
//!    executes.
//! 2. **Executing**: parameters are resolved and `process` is awaited.
//! 3. **PostProcessing**: every output record goes through the task's
//!    `post_process` hook, then the framework's record checks.
//! 4. **CollectionAssigning**: each record's collection is resolved and set.
//! 5. **Done**: the records replace the payload's `features`.
//!
//! Any failure is logged with the task name and payload id and returned
//! unchanged. The working directory is released on every path.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Payload;
use crate::engine::context::TaskContext;
use crate::engine::parameters::resolve_parameters;
use crate::engine::post_process::normalize_record;
use crate::engine::resolver::assign_collections;
use crate::engine::workdir::WorkDir;
use crate::errors::TaskError;
use crate::observability::messages::config::{ConfigNotice, ValidationSkipped};
use crate::observability::messages::task::{StageEntered, TaskCompleted, TaskFailed, TaskStarted};
use crate::observability::messages::StructuredLog;
use crate::traits::{StorageClient, Task};
use tracing::Instrument;

/// Where a task invocation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStage {
    Created,
    Validated,
    Executing,
    PostProcessing,
    CollectionAssigning,
    Done,
    Failed,
}

impl Display for LifecycleStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LifecycleStage::Created => "Created",
            LifecycleStage::Validated => "Validated",
            LifecycleStage::Executing => "Executing",
            LifecycleStage::PostProcessing => "PostProcessing",
            LifecycleStage::CollectionAssigning => "CollectionAssigning",
            LifecycleStage::Done => "Done",
            LifecycleStage::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// Per-invocation switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Working directory to use; a temporary one when `None`.
    pub workdir: Option<PathBuf>,
    /// Override whether the working directory is kept afterwards.
    pub save_workdir: Option<bool>,
    /// Allow tasks to upload assets and items.
    pub upload: bool,
    /// Check the payload configuration and run the task's `validate` hook.
    pub validate: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            workdir: None,
            save_workdir: None,
            upload: true,
            validate: true,
        }
    }
}

/// Drives a single [`Task`] through its lifecycle.
pub struct TaskRunner {
    task: Arc<dyn Task>,
    storage: Arc<dyn StorageClient>,
    options: RunOptions,
}

impl TaskRunner {
    pub fn new(task: Arc<dyn Task>, storage: Arc<dyn StorageClient>) -> Self {
        Self {
            task,
            storage,
            options: RunOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Run the task and return the updated payload.
    pub async fn run(&self, payload: Payload) -> Result<Payload, TaskError> {
        let started = Instant::now();
        let payload_id = payload.id().map(str::to_string);
        let input_count = payload.view().items_as_dicts().map(|i| i.len()).unwrap_or(0);
        let mut stage = LifecycleStage::Created;
        let span = TaskStarted {
            task_name: self.task.name(),
            payload_id: payload_id.as_deref(),
            item_count: input_count,
        }
        .span("run");

        match self.execute(payload, &mut stage).instrument(span).await {
            Ok(payload) => {
                TaskCompleted {
                    task_name: self.task.name(),
                    payload_id: payload_id.as_deref(),
                    input_count,
                    output_count: payload.view().items_as_dicts().map(|i| i.len()).unwrap_or(0),
                    duration: started.elapsed(),
                }
                .log();
                Ok(payload)
            }
            Err(error) => {
                TaskFailed {
                    task_name: self.task.name(),
                    payload_id: payload_id.as_deref(),
                    stage: &stage.to_string(),
                    kind: error.kind(),
                    error: &error,
                }
                .log();
                self.enter(&mut stage, LifecycleStage::Failed);
                Err(error)
            }
        }
    }

    async fn execute(
        &self,
        mut payload: Payload,
        stage: &mut LifecycleStage,
    ) -> Result<Payload, TaskError> {
        let task_name = self.task.name();
        let workdir = WorkDir::acquire(self.options.workdir.as_deref(), self.options.save_workdir)?;

        let view = payload.view();
        for diagnostic in view.diagnostics() {
            ConfigNotice {
                task_name,
                diagnostic: &diagnostic,
            }
            .log();
        }

        if self.options.validate {
            view.validate()?;
            let accepted = self.task.validate(&view).map_err(|e| TaskError::TaskValidationFailed {
                task: task_name.to_string(),
                reason: e.to_string(),
            })?;
            if !accepted {
                return Err(TaskError::TaskValidationFailed {
                    task: task_name.to_string(),
                    reason: "the task's validation rejected the payload".to_string(),
                });
            }
        } else {
            ValidationSkipped { task_name }.log();
        }
        self.enter(stage, LifecycleStage::Validated);

        let parameters = resolve_parameters(&view, task_name)?;
        let items = view.items_as_dicts()?.to_vec();
        let ctx = TaskContext::new(task_name, items, workdir.path(), self.storage.clone())
            .with_upload(self.options.upload)
            .with_payload_href(payload.self_href().map(str::to_string))
            .with_upload_config(view.upload_config()?);

        TaskStarted {
            task_name,
            payload_id: payload.id(),
            item_count: ctx.items().len(),
        }
        .log();

        self.enter(stage, LifecycleStage::Executing);
        let output = self.task.process(&ctx, parameters).await?;

        self.enter(stage, LifecycleStage::PostProcessing);
        let mut records = output
            .into_iter()
            .map(|record| self.task.post_process(record).and_then(normalize_record))
            .collect::<Result<Vec<_>, _>>()?;

        self.enter(stage, LifecycleStage::CollectionAssigning);
        let collection_config = payload.view().collection_config()?;
        assign_collections(&collection_config, &mut records)?;

        payload.set_features(records);
        self.enter(stage, LifecycleStage::Done);
        drop(workdir);
        Ok(payload)
    }

    fn enter(&self, stage: &mut LifecycleStage, next: LifecycleStage) {
        *stage = next;
        StageEntered {
            task_name: self.task.name(),
            stage: &next.to_string(),
        }
        .log();
    }
}
