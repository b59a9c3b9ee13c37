// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for payload configuration notices.

use crate::config::Diagnostic;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A deprecation or advisory notice about the payload's configuration.
///
/// # Log Level
/// `warn!` - Potential issue or degraded behavior
///
/// # Example
/// ```
/// use stac_task::config::Diagnostic;
/// use stac_task::observability::messages::config::ConfigNotice;
///
/// let diagnostic = Diagnostic::TaskListForm;
/// let msg = ConfigNotice {
///     task_name: "my-task",
///     diagnostic: &diagnostic,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct ConfigNotice<'a> {
    pub task_name: &'a str,
    pub diagnostic: &'a Diagnostic,
}

impl Display for ConfigNotice<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let label = if self.diagnostic.is_deprecation() {
            "Deprecated configuration"
        } else {
            "Configuration notice"
        };
        write!(f, "{} for task '{}': {}", label, self.task_name, self.diagnostic)
    }
}

impl StructuredLog for ConfigNotice<'_> {
    fn log(&self) {
        tracing::warn!(
            task = self.task_name,
            deprecation = self.diagnostic.is_deprecation(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("config_notice", span_name = name, task = self.task_name)
    }
}

/// Payload validation was turned off for this run.
///
/// # Log Level
/// `warn!` - Potential issue or degraded behavior
pub struct ValidationSkipped<'a> {
    pub task_name: &'a str,
}

impl Display for ValidationSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Skipping payload validation for task '{}'", self.task_name)
    }
}

impl StructuredLog for ValidationSkipped<'_> {
    fn log(&self) {
        tracing::warn!(task = self.task_name, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("validation_skipped", span_name = name, task = self.task_name)
    }
}

/// A deprecated command-line flag was used.
///
/// # Log Level
/// `warn!` - Potential issue or degraded behavior
pub struct DeprecatedFlag<'a> {
    pub flag: &'a str,
    pub replacement: &'a str,
}

impl Display for DeprecatedFlag<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "'{}' is deprecated and will be removed in a future version; use '{}'",
            self.flag, self.replacement
        )
    }
}

impl StructuredLog for DeprecatedFlag<'_> {
    fn log(&self) {
        tracing::warn!(flag = self.flag, replacement = self.replacement, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("deprecated_flag", span_name = name, flag = self.flag)
    }
}
