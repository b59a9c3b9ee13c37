// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Message types follow a struct-based pattern with `Display` and
//! [`messages::StructuredLog`] implementations, so log text lives in one place
//! and every event carries typed fields.
//!
//! * `messages::task` - task lifecycle events
//! * `messages::config` - configuration notices and deprecations
//!
//! Log output goes to stderr; stdout is reserved for the output payload.

use tracing_subscriber::EnvFilter;

pub mod messages;

/// Install the global `tracing` subscriber.
///
/// An explicit `level` (an `EnvFilter` directive such as `debug` or
/// `stac_task=trace`) wins; otherwise `RUST_LOG` is used, then `info`.
pub fn init_tracing(level: Option<&str>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match level {
        Some(directive) => EnvFilter::try_new(directive)?,
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
