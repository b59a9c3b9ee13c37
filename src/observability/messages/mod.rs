// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for a consistent, human-readable
//! line, and [`StructuredLog`] to emit the same event with typed fields.
//!
//! # Organization
//!
//! * `task` - task lifecycle events (start, completion, failure, hooks)
//! * `config` - payload configuration notices
//!
//! # Usage Pattern
//!
//! ```rust
//! use stac_task::observability::messages::task::TaskStarted;
//! use stac_task::observability::messages::StructuredLog;
//!
//! let msg = TaskStarted {
//!     task_name: "my-task",
//!     payload_id: Some("payload-1"),
//!     item_count: 3,
//! };
//!
//! msg.log();
//! tracing::info!("{}", msg);
//! ```

use tracing::Span;

pub mod config;
pub mod task;

/// A log message that can emit itself with structured fields.
pub trait StructuredLog {
    /// Emit the event at the message's log level.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
