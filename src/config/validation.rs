// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Whole-payload validation of the `process` block.
//!
//! Validation runs in a fixed order and stops at the first violation:
//!
//! 1. **Shape checks**: every accessor on [`ConfigView`] is exercised, so a
//!    mistyped field anywhere in the block is reported by name.
//! 2. **Mutual exclusion**: a non-empty `collection_matchers` list and a
//!    non-empty legacy `upload_options.collections` mapping cannot coexist.
//! 3. **Upload options**: every collection named by a matcher must resolve to
//!    non-empty upload options, either its own or the global ones.
//!
//! Matcher `type` values are not checked here. An unrecognized type only fails
//! when collection resolution actually reaches it.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use stac_task::config::ConfigView;
//! use stac_task::errors::ConfigError;
//!
//! let payload = json!({
//!     "features": [],
//!     "process": [{
//!         "upload_options": {"collections": {"a": "$"}},
//!         "collection_matchers": [{"type": "catch_all", "collection_name": "a"}]
//!     }]
//! });
//! let view = ConfigView::new(payload.as_object().unwrap());
//!
//! assert_eq!(view.validate(), Err(ConfigError::MutuallyExclusiveConfig));
//! ```

use crate::config::view::ConfigView;
use crate::errors::ConfigError;

impl ConfigView<'_> {
    /// Validate the payload's configuration, failing fast on the first
    /// violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.process_definition()?;
        self.workflow_options()?;
        self.task_options_map()?;
        self.upload_options()?;
        let mapping = self.collection_mapping()?;
        self.items_as_dicts()?;
        let matchers = self.collection_matchers()?;
        self.collection_options()?;

        if !matchers.is_empty() && !mapping.is_empty() {
            return Err(ConfigError::MutuallyExclusiveConfig);
        }

        for matcher in &matchers {
            self.get_collection_upload_options(&matcher.collection_name)?;
        }

        Ok(())
    }
}
