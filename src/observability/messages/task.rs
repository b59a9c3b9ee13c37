// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for task lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Task invocation (start, completion, failure)
//! * Lifecycle state transitions
//! * Task selection from the registry

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Task invocation started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use stac_task::observability::messages::task::TaskStarted;
///
/// let msg = TaskStarted {
///     task_name: "my-task",
///     payload_id: Some("payload-1"),
///     item_count: 2,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Task 'my-task' started on payload 'payload-1' with 2 item(s)"
/// );
/// ```
pub struct TaskStarted<'a> {
    pub task_name: &'a str,
    pub payload_id: Option<&'a str>,
    pub item_count: usize,
}

impl Display for TaskStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Task '{}' started on payload '{}' with {} item(s)",
            self.task_name,
            self.payload_id.unwrap_or("<no id>"),
            self.item_count
        )
    }
}

impl StructuredLog for TaskStarted<'_> {
    fn log(&self) {
        tracing::info!(
            task = self.task_name,
            payload_id = self.payload_id,
            item_count = self.item_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "task",
            span_name = name,
            task = self.task_name,
            payload_id = self.payload_id,
        )
    }
}

/// Task invocation completed successfully.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use stac_task::observability::messages::task::TaskCompleted;
/// use std::time::Duration;
///
/// let msg = TaskCompleted {
///     task_name: "my-task",
///     payload_id: None,
///     input_count: 2,
///     output_count: 4,
///     duration: Duration::from_millis(120),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct TaskCompleted<'a> {
    pub task_name: &'a str,
    pub payload_id: Option<&'a str>,
    pub input_count: usize,
    pub output_count: usize,
    pub duration: std::time::Duration,
}

impl Display for TaskCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Task '{}' completed: {} item(s) in, {} item(s) out, duration={:?}",
            self.task_name, self.input_count, self.output_count, self.duration
        )
    }
}

impl StructuredLog for TaskCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            task = self.task_name,
            payload_id = self.payload_id,
            input_count = self.input_count,
            output_count = self.output_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "task_completed",
            span_name = name,
            task = self.task_name,
            duration = ?self.duration,
        )
    }
}

/// Task invocation failed. The error is re-raised unchanged after logging.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use stac_task::observability::messages::task::TaskFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// let msg = TaskFailed {
///     task_name: "my-task",
///     payload_id: Some("payload-1"),
///     stage: "Executing",
///     kind: "IoError",
///     error: &error,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Task 'my-task' failed on payload 'payload-1' (stage Executing): IoError: disk full"
/// );
/// ```
pub struct TaskFailed<'a> {
    pub task_name: &'a str,
    pub payload_id: Option<&'a str>,
    pub stage: &'a str,
    pub kind: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for TaskFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Task '{}' failed on payload '{}' (stage {}): {}: {}",
            self.task_name,
            self.payload_id.unwrap_or("<no id>"),
            self.stage,
            self.kind,
            self.error
        )
    }
}

impl StructuredLog for TaskFailed<'_> {
    fn log(&self) {
        tracing::error!(
            task = self.task_name,
            payload_id = self.payload_id,
            stage = self.stage,
            error_kind = self.kind,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "task_failed",
            span_name = name,
            task = self.task_name,
            stage = self.stage,
        )
    }
}

/// Lifecycle state transition.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
pub struct StageEntered<'a> {
    pub task_name: &'a str,
    pub stage: &'a str,
}

impl Display for StageEntered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Task '{}' entered {}", self.task_name, self.stage)
    }
}

impl StructuredLog for StageEntered<'_> {
    fn log(&self) {
        tracing::debug!(task = self.task_name, stage = self.stage, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("stage", span_name = name, task = self.task_name, stage = self.stage)
    }
}

/// A task was picked from the payload because `--task` was not given.
///
/// # Log Level
/// `info!` - Important operational event
pub struct TaskSelected<'a> {
    pub task_name: &'a str,
}

impl Display for TaskSelected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "No task named on the command line; running '{}', the only registered task configured in the payload",
            self.task_name
        )
    }
}

impl StructuredLog for TaskSelected<'_> {
    fn log(&self) {
        tracing::info!(task = self.task_name, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("task_selected", span_name = name, task = self.task_name)
    }
}
