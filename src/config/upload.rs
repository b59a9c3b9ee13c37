// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Upload options: global, per-collection, and the fallback between them.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::consts::{COLLECTION_OPTIONS, PUBLIC_ASSETS_ALL, UPLOAD_OPTIONS};
use crate::errors::{ConfigError, TaskError};
use crate::utils::{is_truthy, Document};

/// Which uploaded assets are made public.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PublicAssets {
    #[default]
    None,
    All,
    Keys(Vec<String>),
}

/// Typed view of one `upload_options` mapping. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadOptions {
    pub path_template: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub public_assets: PublicAssets,
    /// Keep `s3://` URLs instead of rewriting them to https.
    pub s3_urls: bool,
}

impl UploadOptions {
    pub fn from_document(document: &Document) -> Result<Self, ConfigError> {
        let path_template = match document.get("path_template") {
            None | Some(Value::Null) => None,
            Some(Value::String(t)) => Some(t.clone()),
            Some(_) => return Err(ConfigError::shape("upload_options.path_template", "type str")),
        };

        let mut headers = BTreeMap::new();
        match document.get("headers") {
            None | Some(Value::Null) => {}
            Some(Value::Object(map)) => {
                for (key, value) in map {
                    let value = value.as_str().ok_or_else(|| {
                        ConfigError::shape(format!("upload_options.headers.{}", key), "type str")
                    })?;
                    headers.insert(key.clone(), value.to_string());
                }
            }
            Some(_) => return Err(ConfigError::shape("upload_options.headers", "type dict")),
        }

        let public_assets = match document.get("public_assets") {
            None | Some(Value::Null) => PublicAssets::None,
            Some(Value::String(s)) if s == PUBLIC_ASSETS_ALL => PublicAssets::All,
            Some(Value::Array(keys)) => PublicAssets::Keys(
                keys.iter()
                    .map(|k| {
                        k.as_str().map(str::to_string).ok_or_else(|| {
                            ConfigError::shape("upload_options.public_assets", "'ALL' or a list of str")
                        })
                    })
                    .collect::<Result<_, _>>()?,
            ),
            Some(_) => {
                return Err(ConfigError::shape(
                    "upload_options.public_assets",
                    "'ALL' or a list of str",
                ))
            }
        };

        let s3_urls = match document.get("s3_urls") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => return Err(ConfigError::shape("upload_options.s3_urls", "type bool")),
        };

        Ok(Self {
            path_template,
            headers,
            public_assets,
            s3_urls,
        })
    }

    /// The path template, required for any upload.
    pub fn require_path_template(&self) -> Result<&str, TaskError> {
        self.path_template
            .as_deref()
            .ok_or(TaskError::MissingPathTemplate)
    }

    pub fn is_public(&self, asset_key: &str) -> bool {
        match &self.public_assets {
            PublicAssets::None => false,
            PublicAssets::All => true,
            PublicAssets::Keys(keys) => keys.iter().any(|k| k == asset_key),
        }
    }

    /// Rewrite `s3://bucket/key` to its https form unless `s3_urls` is set.
    pub fn published_url(&self, url: &str) -> String {
        if self.s3_urls {
            return url.to_string();
        }
        match url.strip_prefix("s3://").and_then(|rest| rest.split_once('/')) {
            Some((bucket, key)) => format!("https://{}.s3.amazonaws.com/{}", bucket, key),
            None => url.to_string(),
        }
    }
}

/// Look up `collection_options[name]`, which must be a mapping when present.
pub fn collection_entry<'a>(
    collection_options: &'a Document,
    name: &str,
) -> Result<Option<&'a Document>, ConfigError> {
    match collection_options.get(name) {
        None => Ok(None),
        Some(Value::Object(entry)) => Ok(Some(entry)),
        Some(_) => Err(ConfigError::shape(
            format!("{}.{}", COLLECTION_OPTIONS, name),
            "type dict",
        )),
    }
}

/// Per-collection upload options when present and non-empty, else the global
/// ones. An empty result is [`ConfigError::MissingUploadOptions`].
pub fn resolve_collection_upload_options<'a>(
    global: &'a Document,
    collection_options: &'a Document,
    name: &str,
) -> Result<&'a Document, ConfigError> {
    let own = match collection_entry(collection_options, name)?.and_then(|e| e.get(UPLOAD_OPTIONS)) {
        Some(value) if is_truthy(value) => Some(value.as_object().ok_or_else(|| {
            ConfigError::shape(
                format!("{}.{}.{}", COLLECTION_OPTIONS, name, UPLOAD_OPTIONS),
                "type dict",
            )
        })?),
        _ => None,
    };

    let resolved = own.unwrap_or(global);
    if resolved.is_empty() {
        return Err(ConfigError::MissingUploadOptions {
            collection: name.to_string(),
        });
    }
    Ok(resolved)
}

/// Owned snapshot of everything needed to pick upload options for a record,
/// handed to tasks through the task context.
#[derive(Debug, Clone, Default)]
pub struct UploadConfig {
    pub global: Document,
    pub collection_options: Document,
    /// Legacy schema: no per-collection overrides, global options always apply.
    pub legacy: bool,
}

impl UploadConfig {
    /// Upload options for a record in `collection`.
    pub fn options_for(&self, collection: Option<&str>) -> Result<UploadOptions, ConfigError> {
        let document = match collection {
            Some(name) if !self.legacy => {
                resolve_collection_upload_options(&self.global, &self.collection_options, name)?
            }
            _ => &self.global,
        };
        UploadOptions::from_document(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_parse_full_upload_options() {
        let options = UploadOptions::from_document(&doc(json!({
            "path_template": "s3://bucket/${collection}/${id}",
            "headers": {"CacheControl": "max-age=300"},
            "public_assets": ["thumbnail"],
            "s3_urls": true,
            "collections": {"ignored": "$"}
        })))
        .unwrap();

        assert_eq!(options.path_template.as_deref(), Some("s3://bucket/${collection}/${id}"));
        assert_eq!(options.headers.get("CacheControl").map(String::as_str), Some("max-age=300"));
        assert!(options.is_public("thumbnail"));
        assert!(!options.is_public("data"));
        assert!(options.s3_urls);
    }

    #[test]
    fn test_public_assets_all_and_invalid() {
        let all = UploadOptions::from_document(&doc(json!({"public_assets": "ALL"}))).unwrap();
        assert!(all.is_public("anything"));

        let err = UploadOptions::from_document(&doc(json!({"public_assets": "SOME"}))).unwrap_err();
        assert_eq!(
            err,
            ConfigError::shape("upload_options.public_assets", "'ALL' or a list of str")
        );
    }

    #[test]
    fn test_published_url() {
        let https = UploadOptions::default();
        assert_eq!(
            https.published_url("s3://bucket/a/b.tif"),
            "https://bucket.s3.amazonaws.com/a/b.tif"
        );
        assert_eq!(https.published_url("/tmp/out/b.tif"), "/tmp/out/b.tif");

        let s3 = UploadOptions {
            s3_urls: true,
            ..UploadOptions::default()
        };
        assert_eq!(s3.published_url("s3://bucket/a/b.tif"), "s3://bucket/a/b.tif");
    }

    #[test]
    fn test_missing_path_template() {
        let options = UploadOptions::default();
        assert!(matches!(options.require_path_template(), Err(TaskError::MissingPathTemplate)));
    }

    #[test]
    fn test_resolution_falls_back_to_global() {
        let global = doc(json!({"path_template": "/g"}));
        let per_collection = doc(json!({
            "C": {"upload_options": {"path_template": "/c"}},
            "E": {"upload_options": {}}
        }));

        let c = resolve_collection_upload_options(&global, &per_collection, "C").unwrap();
        assert_eq!(c["path_template"], "/c");

        let e = resolve_collection_upload_options(&global, &per_collection, "E").unwrap();
        assert_eq!(e["path_template"], "/g");

        let other = resolve_collection_upload_options(&global, &per_collection, "other").unwrap();
        assert_eq!(other["path_template"], "/g");
    }

    #[test]
    fn test_resolution_without_any_options_fails() {
        let empty = Document::new();
        let err = resolve_collection_upload_options(&empty, &empty, "Z").unwrap_err();
        assert_eq!(err, ConfigError::MissingUploadOptions { collection: "Z".to_string() });
    }

    #[test]
    fn test_legacy_upload_config_ignores_collection_overrides() {
        let config = UploadConfig {
            global: doc(json!({"path_template": "/g"})),
            collection_options: doc(json!({"C": {"upload_options": {"path_template": "/c"}}})),
            legacy: true,
        };
        let options = config.options_for(Some("C")).unwrap();
        assert_eq!(options.path_template.as_deref(), Some("/g"));
    }
}
