// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Non-fatal signals raised while reading a payload.
//!
//! The configuration view returns these as a plain list so callers (and tests)
//! can inspect them; the lifecycle controller logs each one.

use std::fmt::{Display, Formatter};

/// A deprecation or advisory notice about a payload's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `process` was a bare mapping instead of a list.
    BareProcessDefinition,
    /// `tasks` used the list-of-`{name, parameters}` form.
    TaskListForm,
    /// `upload_options.collections` is set.
    LegacyCollectionMapping,
    /// A `catch_all` matcher is followed by other matchers, which it shadows.
    ShadowingCatchAll { index: usize, shadowed: usize },
}

impl Diagnostic {
    /// Whether the diagnostic reports a deprecated form that still works.
    pub fn is_deprecation(&self) -> bool {
        !matches!(self, Diagnostic::ShadowingCatchAll { .. })
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::BareProcessDefinition => write!(
                f,
                "'process' as a bare dictionary will be unsupported in a future version; wrap it in a list"
            ),
            Diagnostic::TaskListForm => write!(
                f,
                "'tasks' as a list of task configurations will be unsupported in a future version; use a dictionary of task options"
            ),
            Diagnostic::LegacyCollectionMapping => write!(
                f,
                "'upload_options.collections' is deprecated and will be removed in a future version; use 'collection_matchers'"
            ),
            Diagnostic::ShadowingCatchAll { index, shadowed } => write!(
                f,
                "catch_all matcher at position {} shadows {} matcher(s) after it",
                index, shadowed
            ),
        }
    }
}
