// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors from `${...}` path template substitution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("path template references '{key}' but the item has no such value")]
    MissingValue { key: String },

    #[error("unterminated '${{' in path template '{template}'")]
    Unterminated { template: String },

    #[error("unable to parse datetime '{value}': {reason}")]
    InvalidDatetime { value: String, reason: String },
}
