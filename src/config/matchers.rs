// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed collection-assignment configuration.
//!
//! Two schema generations describe how output records map to collections:
//!
//! * legacy: `upload_options.collections`, an ordered `name -> JSONPath` mapping
//! * current: `collection_matchers`, an ordered list of typed matchers
//!
//! Both are normalized into [`CollectionConfig`] once, and the resolver pattern
//! matches on it.

use serde_json::Value;

use crate::errors::ConfigError;
use crate::utils::Document;

/// Wire value of the `jsonpath` matcher type
pub const JSONPATH_MATCHER: &str = "jsonpath";
/// Wire value of the `catch_all` matcher type
pub const CATCH_ALL_MATCHER: &str = "catch_all";

/// What a matcher tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatcherKind {
    /// Matches when `pattern` selects exactly one node of the record.
    JsonPath { pattern: String },
    /// Matches every record.
    CatchAll,
    /// A `type` value this version does not know. Kept so that resolution fails
    /// loudly when it reaches the matcher instead of silently skipping it.
    Unrecognized(String),
}

/// One entry of `collection_matchers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherRecord {
    pub kind: MatcherKind,
    pub collection_name: String,
}

impl MatcherRecord {
    /// A `jsonpath` matcher.
    pub fn jsonpath(pattern: impl Into<String>, collection_name: impl Into<String>) -> Self {
        Self {
            kind: MatcherKind::JsonPath {
                pattern: pattern.into(),
            },
            collection_name: collection_name.into(),
        }
    }

    /// A `catch_all` matcher.
    pub fn catch_all(collection_name: impl Into<String>) -> Self {
        Self {
            kind: MatcherKind::CatchAll,
            collection_name: collection_name.into(),
        }
    }

    /// Parse the matcher at `index` of `collection_matchers`.
    pub fn from_document(index: usize, document: &Document) -> Result<Self, ConfigError> {
        let field = |name: &str| format!("collection_matchers[{}].{}", index, name);

        let matcher_type = match document.get("type") {
            Some(Value::String(t)) => t.as_str(),
            _ => return Err(ConfigError::shape(field("type"), "type str")),
        };

        let collection_name = match document.get("collection_name") {
            Some(Value::String(name)) => name.clone(),
            _ => return Err(ConfigError::shape(field("collection_name"), "type str")),
        };

        let kind = match matcher_type {
            JSONPATH_MATCHER => match document.get("pattern") {
                Some(Value::String(pattern)) => MatcherKind::JsonPath {
                    pattern: pattern.clone(),
                },
                _ => return Err(ConfigError::shape(field("pattern"), "type str")),
            },
            CATCH_ALL_MATCHER => MatcherKind::CatchAll,
            other => MatcherKind::Unrecognized(other.to_string()),
        };

        Ok(Self {
            kind,
            collection_name,
        })
    }
}

/// Normalized collection-assignment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CollectionConfig {
    /// Neither schema generation is configured.
    #[default]
    None,
    /// Legacy `(collection name, JSONPath)` pairs in insertion order.
    LegacyMapping(Vec<(String, String)>),
    /// Current-schema matchers in list order.
    MatcherList(Vec<MatcherRecord>),
}

impl CollectionConfig {
    /// True when there is nothing to match against.
    pub fn is_empty(&self) -> bool {
        match self {
            CollectionConfig::None => true,
            CollectionConfig::LegacyMapping(pairs) => pairs.is_empty(),
            CollectionConfig::MatcherList(matchers) => matchers.is_empty(),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, CollectionConfig::LegacyMapping(_))
    }
}
