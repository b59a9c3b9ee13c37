// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The payload document handed to one task invocation.
//!
//! A payload is a JSON object. Its key order is preserved from input to
//! output. Payloads may be *indirect*: a document with an `href` (or `url`)
//! and no features points at the real payload, which is fetched once. A
//! second indirection is rejected.

use serde_json::Value;

use crate::config::consts::FEATURES;
use crate::config::view::ConfigView;
use crate::errors::PayloadError;
use crate::traits::StorageClient;
use crate::utils::{is_truthy, make_absolute_href, type_name, Document};

/// A payload document plus the location it was read from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Payload {
    document: Document,
    self_href: Option<String>,
}

impl Payload {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            self_href: None,
        }
    }

    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        match value {
            Value::Object(document) => Ok(Self::new(document)),
            other => Err(PayloadError::NotAnObject {
                found: type_name(&other),
            }),
        }
    }

    pub fn from_json_str(input: &str) -> Result<Self, PayloadError> {
        Self::from_value(serde_json::from_str(input)?)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, PayloadError> {
        Self::from_value(serde_yaml::from_str(input)?)
    }

    /// Parse `bytes`, choosing YAML when `href` ends in `.yaml` or `.yml`.
    pub fn from_slice(href: &str, bytes: &[u8]) -> Result<Self, PayloadError> {
        if is_yaml_href(href) {
            Self::from_value(serde_yaml::from_slice(bytes)?)
        } else {
            Self::from_value(serde_json::from_slice(bytes)?)
        }
    }

    /// Read a payload from storage, following at most one indirection.
    ///
    /// A relative indirection href resolves against `href`. The returned
    /// payload remembers where it was finally read from.
    pub async fn from_href(storage: &dyn StorageClient, href: &str) -> Result<Self, PayloadError> {
        let outer = Self::from_slice(href, &storage.read(href).await?)?;

        let (mut payload, location) = match outer.indirection() {
            Some(target) => {
                let inner_href = make_absolute_href(target, Some(href));
                let inner = Self::from_slice(&inner_href, &storage.read(&inner_href).await?)?;
                if inner.indirection().is_some() {
                    return Err(PayloadError::MultipleIndirections { href: inner_href });
                }
                (inner, inner_href)
            }
            None => (outer, href.to_string()),
        };

        payload.self_href = Some(location);
        Ok(payload)
    }

    /// The `href` (or `url`) this payload points at, when it has no features.
    pub fn indirection(&self) -> Option<&str> {
        let has_features = self.document.get(FEATURES).is_some_and(is_truthy);
        if has_features {
            return None;
        }
        self.document
            .get("href")
            .or_else(|| self.document.get("url"))
            .and_then(Value::as_str)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// A configuration view over this payload.
    pub fn view(&self) -> ConfigView<'_> {
        ConfigView::new(&self.document)
    }

    pub fn self_href(&self) -> Option<&str> {
        self.self_href.as_deref()
    }

    pub fn set_self_href(&mut self, href: impl Into<String>) {
        self.self_href = Some(href.into());
    }

    pub fn id(&self) -> Option<&str> {
        self.document.get("id").and_then(Value::as_str)
    }

    /// Replace `features`, keeping its position among the payload's keys.
    pub fn set_features(&mut self, features: Vec<Value>) {
        self.document
            .insert(FEATURES.to_string(), Value::Array(features));
    }

    pub fn to_json_string(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(&self.document)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }
}

impl From<Document> for Payload {
    fn from(document: Document) -> Self {
        Self::new(document)
    }
}

fn is_yaml_href(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    lower.ends_with(".yaml") || lower.ends_with(".yml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryStorage;
    use serde_json::json;

    #[test]
    fn test_payload_must_be_an_object() {
        let err = Payload::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, PayloadError::NotAnObject { found: "list" }));

        let err = Payload::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, PayloadError::Json(_)));
    }

    #[test]
    fn test_yaml_payload() {
        let payload = Payload::from_yaml_str(
            "type: FeatureCollection\nfeatures: []\nprocess:\n  - tasks:\n      x: {a: 1}\n",
        )
        .unwrap();
        assert_eq!(payload.view().task_options("x").unwrap()["a"], 1);
    }

    #[test]
    fn test_set_features_preserves_key_order() {
        let mut payload =
            Payload::from_json_str(r#"{"type": "FeatureCollection", "features": [], "process": []}"#)
                .unwrap();
        payload.set_features(vec![json!({"id": "a"})]);
        let keys: Vec<&String> = payload.document().keys().collect();
        assert_eq!(keys, vec!["type", "features", "process"]);
    }

    #[test]
    fn test_indirection_detection() {
        let indirect = Payload::from_value(json!({"href": "s3://b/p.json"})).unwrap();
        assert_eq!(indirect.indirection(), Some("s3://b/p.json"));

        let url = Payload::from_value(json!({"url": "s3://b/p.json", "features": []})).unwrap();
        assert_eq!(url.indirection(), Some("s3://b/p.json"));

        let direct = Payload::from_value(json!({"href": "x", "features": [{"id": "a"}]})).unwrap();
        assert_eq!(direct.indirection(), None);
    }

    #[tokio::test]
    async fn test_from_href_direct() {
        let storage = MemoryStorage::new();
        storage.insert_json("mem://payloads/a.json", &json!({"id": "a", "features": []}));

        let payload = Payload::from_href(&storage, "mem://payloads/a.json").await.unwrap();
        assert_eq!(payload.id(), Some("a"));
        assert_eq!(payload.self_href(), Some("mem://payloads/a.json"));
    }

    #[tokio::test]
    async fn test_from_href_follows_one_relative_indirection() {
        let storage = MemoryStorage::new();
        storage.insert_json("mem://payloads/outer.json", &json!({"href": "big/inner.json"}));
        storage.insert_json(
            "mem://payloads/big/inner.json",
            &json!({"id": "inner", "features": [{"id": "x"}]}),
        );

        let payload = Payload::from_href(&storage, "mem://payloads/outer.json").await.unwrap();
        assert_eq!(payload.id(), Some("inner"));
        assert_eq!(payload.self_href(), Some("mem://payloads/big/inner.json"));
    }

    #[tokio::test]
    async fn test_from_href_rejects_second_indirection() {
        let storage = MemoryStorage::new();
        storage.insert_json("mem://a.json", &json!({"href": "mem://b.json"}));
        storage.insert_json("mem://b.json", &json!({"href": "mem://c.json"}));

        let err = Payload::from_href(&storage, "mem://a.json").await.unwrap_err();
        assert!(matches!(err, PayloadError::MultipleIndirections { ref href } if href == "mem://b.json"));
    }

    #[tokio::test]
    async fn test_from_href_missing() {
        let storage = MemoryStorage::new();
        let err = Payload::from_href(&storage, "mem://nope.json").await.unwrap_err();
        assert!(matches!(err, PayloadError::Storage(_)));
    }
}
