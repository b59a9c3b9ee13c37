// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Collection assignment for output records.
//!
//! Resolution walks the configured entries in order and the first match wins:
//!
//! | Configuration | Behavior |
//! |---------------|----------|
//! | none | no collection |
//! | legacy mapping | first `(name, JSONPath)` pair matching exactly one node |
//! | `jsonpath` matcher | returns its collection on an exactly-one match |
//! | `catch_all` matcher | returns its collection unconditionally |
//! | unknown matcher type | [`ConfigError::UnknownMatcherType`] |
//!
//! Running out of entries is not an error. The record simply keeps whatever
//! `collection` it already had.

use serde_json::Value;
use tracing::trace;

use crate::config::consts::COLLECTION;
use crate::config::{CollectionConfig, MatcherKind};
use crate::engine::matcher::matches_exactly_one;
use crate::errors::ConfigError;

/// Collection name for `record`, or `None` when nothing matches.
pub fn find_collection(
    config: &CollectionConfig,
    record: &Value,
) -> Result<Option<String>, ConfigError> {
    match config {
        CollectionConfig::None => Ok(None),
        CollectionConfig::LegacyMapping(pairs) => {
            for (name, expression) in pairs {
                if matches_exactly_one(record, expression)? {
                    return Ok(Some(name.clone()));
                }
            }
            Ok(None)
        }
        CollectionConfig::MatcherList(matchers) => {
            for matcher in matchers {
                let matched = match &matcher.kind {
                    MatcherKind::JsonPath { pattern } => matches_exactly_one(record, pattern)?,
                    MatcherKind::CatchAll => true,
                    MatcherKind::Unrecognized(matcher_type) => {
                        return Err(ConfigError::UnknownMatcherType {
                            matcher_type: matcher_type.clone(),
                        })
                    }
                };
                if matched {
                    return Ok(Some(matcher.collection_name.clone()));
                }
            }
            Ok(None)
        }
    }
}

/// Set `collection` on each record that resolves to one. Records that match
/// nothing are left untouched.
pub fn assign_collections(
    config: &CollectionConfig,
    records: &mut [Value],
) -> Result<(), ConfigError> {
    if config.is_empty() {
        return Ok(());
    }

    for record in records.iter_mut() {
        if let Some(name) = find_collection(config, record)? {
            trace!(record_id = ?record.get("id"), collection = %name, "assigned collection");
            if let Value::Object(fields) = record {
                fields.insert(COLLECTION.to_string(), Value::String(name));
            }
        }
    }
    Ok(())
}
