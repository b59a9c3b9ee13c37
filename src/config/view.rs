// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Read-only, validating accessors over a payload document.
//!
//! [`ConfigView`] is the single place that knows the shape of the `process`
//! block. It accepts both configuration schema generations and hands
//! downstream code one normalized shape:
//!
//! | Accessor | Default when absent | Deprecated form accepted |
//! |----------|---------------------|--------------------------|
//! | `process_definition` | `{}` | bare mapping instead of a list |
//! | `workflow_options` | `{}` | |
//! | `task_options_map` | `{}` | list of `{name, parameters}` |
//! | `upload_options` | `{}` | |
//! | `collection_mapping` | empty | the whole legacy mapping |
//! | `collection_matchers` | empty | |
//! | `collection_options` | `{}` | |
//! | `items_as_dicts` | empty | |
//!
//! Every accessor checks the shape of the field it reads and returns
//! [`ConfigError::ConfigShape`] naming the field on mismatch.
//!
//! # Example
//! ```
//! use serde_json::json;
//! use stac_task::config::ConfigView;
//!
//! let payload = json!({
//!     "features": [],
//!     "process": [{
//!         "workflow_options": {"a": 1},
//!         "tasks": {"my-task": {"b": 2}}
//!     }]
//! });
//! let view = ConfigView::new(payload.as_object().unwrap());
//! assert_eq!(view.task_options("my-task").unwrap()["b"], 2);
//! assert!(view.task_options("other").unwrap().is_empty());
//! ```

use serde_json::Value;

use crate::config::consts::{
    COLLECTION_MATCHERS, COLLECTION_OPTIONS, FEATURES, LEGACY_COLLECTIONS, PROCESS, TASKS,
    UPLOAD_OPTIONS, WORKFLOW_OPTIONS,
};
use crate::config::diagnostics::Diagnostic;
use crate::config::matchers::{CollectionConfig, MatcherKind, MatcherRecord};
use crate::config::upload::{collection_entry, resolve_collection_upload_options, UploadConfig};
use crate::errors::ConfigError;
use crate::utils::{empty_map, Document};

/// Validating accessor layer borrowing one payload document.
#[derive(Debug, Clone, Copy)]
pub struct ConfigView<'a> {
    document: &'a Document,
}

impl<'a> ConfigView<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// The underlying payload document.
    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// Top-level `id` of the payload, used to label log lines.
    pub fn payload_id(&self) -> Option<&'a str> {
        self.document.get("id").and_then(Value::as_str)
    }

    /// The process definition: `process[0]`, or the bare mapping in the
    /// deprecated form. `{}` when absent or an empty list.
    pub fn process_definition(&self) -> Result<&'a Document, ConfigError> {
        match self.document.get(PROCESS) {
            None => Ok(empty_map()),
            Some(Value::Object(process)) => Ok(process),
            Some(Value::Array(list)) => match list.first() {
                None => Ok(empty_map()),
                Some(Value::Object(process)) => Ok(process),
                Some(_) => Err(ConfigError::shape(
                    PROCESS,
                    "type list whose first element is type dict",
                )),
            },
            Some(_) => Err(ConfigError::shape(PROCESS, "type list")),
        }
    }

    pub fn workflow_options(&self) -> Result<&'a Document, ConfigError> {
        self.process_mapping(WORKFLOW_OPTIONS)
    }

    /// All task options keyed by task name, normalizing the deprecated list form.
    ///
    /// In the list form the first entry wins when a name repeats.
    pub fn task_options_map(&self) -> Result<Document, ConfigError> {
        match self.process_definition()?.get(TASKS) {
            None => Ok(Document::new()),
            Some(Value::Object(tasks)) => {
                for (name, options) in tasks {
                    if !options.is_object() {
                        return Err(ConfigError::shape(format!("{}.{}", TASKS, name), "type dict"));
                    }
                }
                Ok(tasks.clone())
            }
            Some(Value::Array(entries)) => {
                let mut options = Document::new();
                for (index, entry) in entries.iter().enumerate() {
                    let entry = entry.as_object().ok_or_else(|| {
                        ConfigError::shape(format!("{}[{}]", TASKS, index), "type dict")
                    })?;
                    let name = entry.get("name").and_then(Value::as_str).ok_or_else(|| {
                        ConfigError::shape(format!("{}[{}].name", TASKS, index), "type str")
                    })?;
                    let parameters = match entry.get("parameters") {
                        None => Value::Object(Document::new()),
                        Some(p @ Value::Object(_)) => p.clone(),
                        Some(_) => {
                            return Err(ConfigError::shape(
                                format!("{}.{}.parameters", TASKS, name),
                                "type dict",
                            ))
                        }
                    };
                    if !options.contains_key(name) {
                        options.insert(name.to_string(), parameters);
                    }
                }
                Ok(options)
            }
            Some(_) => Err(ConfigError::shape(
                TASKS,
                "type dict or type list (deprecated)",
            )),
        }
    }

    /// Options for `task_name`, or `{}` when the task is not configured.
    pub fn task_options(&self, task_name: &str) -> Result<Document, ConfigError> {
        Ok(self
            .task_options_map()?
            .get(task_name)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default())
    }

    /// Global upload options.
    pub fn upload_options(&self) -> Result<&'a Document, ConfigError> {
        self.process_mapping(UPLOAD_OPTIONS)
    }

    /// Legacy `upload_options.collections` as ordered `(collection, JSONPath)` pairs.
    pub fn collection_mapping(&self) -> Result<Vec<(String, String)>, ConfigError> {
        match self.upload_options()?.get(LEGACY_COLLECTIONS) {
            None => Ok(Vec::new()),
            Some(Value::Object(mapping)) => mapping
                .iter()
                .map(|(name, pattern)| match pattern {
                    Value::String(p) => Ok((name.clone(), p.clone())),
                    _ => Err(ConfigError::shape(
                        format!("{}.{}.{}", UPLOAD_OPTIONS, LEGACY_COLLECTIONS, name),
                        "type str",
                    )),
                })
                .collect(),
            Some(_) => Err(ConfigError::shape(LEGACY_COLLECTIONS, "type dict")),
        }
    }

    /// Current-schema matchers in list order.
    pub fn collection_matchers(&self) -> Result<Vec<MatcherRecord>, ConfigError> {
        let matchers = match self.process_definition()?.get(COLLECTION_MATCHERS) {
            None => return Ok(Vec::new()),
            Some(Value::Array(list)) => list,
            Some(_) => return Err(ConfigError::shape(COLLECTION_MATCHERS, "type list")),
        };

        matchers
            .iter()
            .enumerate()
            .map(|(index, matcher)| match matcher {
                Value::Object(document) => MatcherRecord::from_document(index, document),
                _ => Err(ConfigError::shape(
                    COLLECTION_MATCHERS,
                    "a list where each matcher is type dict",
                )),
            })
            .collect()
    }

    pub fn collection_options(&self) -> Result<&'a Document, ConfigError> {
        self.process_mapping(COLLECTION_OPTIONS)
    }

    /// `collection_options[name]`, or `{}`.
    pub fn get_collection_options(&self, name: &str) -> Result<&'a Document, ConfigError> {
        Ok(collection_entry(self.collection_options()?, name)?.unwrap_or(empty_map()))
    }

    /// Upload options for a collection under the current schema: its own
    /// `upload_options` when present and non-empty, else the global options.
    pub fn get_collection_upload_options(&self, name: &str) -> Result<&'a Document, ConfigError> {
        resolve_collection_upload_options(self.upload_options()?, self.collection_options()?, name)
    }

    /// Upload options under the legacy schema, which has no per-collection
    /// overrides: always the global options.
    pub fn legacy_collection_upload_options(&self) -> Result<&'a Document, ConfigError> {
        self.upload_options()
    }

    /// The payload's records.
    pub fn items_as_dicts(&self) -> Result<&'a [Value], ConfigError> {
        match self.document.get(FEATURES) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(_) => Err(ConfigError::shape(FEATURES, "type list")),
        }
    }

    /// Normalize whichever collection schema generation is configured.
    pub fn collection_config(&self) -> Result<CollectionConfig, ConfigError> {
        let matchers = self.collection_matchers()?;
        let mapping = self.collection_mapping()?;

        match (matchers.is_empty(), mapping.is_empty()) {
            (false, false) => Err(ConfigError::MutuallyExclusiveConfig),
            (false, true) => Ok(CollectionConfig::MatcherList(matchers)),
            (true, false) => Ok(CollectionConfig::LegacyMapping(mapping)),
            (true, true) => Ok(CollectionConfig::None),
        }
    }

    /// Owned snapshot of upload configuration for use after the view is gone.
    pub fn upload_config(&self) -> Result<UploadConfig, ConfigError> {
        Ok(UploadConfig {
            global: self.upload_options()?.clone(),
            collection_options: self.collection_options()?.clone(),
            legacy: !self.collection_mapping()?.is_empty(),
        })
    }

    /// Deprecation and advisory notices for this payload. Fields that fail
    /// their shape checks are skipped here; `validate` reports them.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if matches!(self.document.get(PROCESS), Some(Value::Object(_))) {
            diagnostics.push(Diagnostic::BareProcessDefinition);
        }

        if let Ok(process) = self.process_definition() {
            if matches!(process.get(TASKS), Some(Value::Array(_))) {
                diagnostics.push(Diagnostic::TaskListForm);
            }
        }

        if matches!(self.collection_mapping(), Ok(ref m) if !m.is_empty()) {
            diagnostics.push(Diagnostic::LegacyCollectionMapping);
        }

        if let Ok(matchers) = self.collection_matchers() {
            let last = matchers.len().saturating_sub(1);
            if let Some(index) = matchers
                .iter()
                .position(|m| m.kind == MatcherKind::CatchAll)
                .filter(|index| *index < last)
            {
                diagnostics.push(Diagnostic::ShadowingCatchAll {
                    index,
                    shadowed: last - index,
                });
            }
        }

        diagnostics
    }

    fn process_mapping(&self, field: &'static str) -> Result<&'a Document, ConfigError> {
        match self.process_definition()?.get(field) {
            None => Ok(empty_map()),
            Some(Value::Object(mapping)) => Ok(mapping),
            Some(_) => Err(ConfigError::shape(field, "type dict")),
        }
    }
}
