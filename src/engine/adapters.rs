// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Common task shapes expressed as helpers for [`crate::traits::Task::process`].
//!
//! * [`one_to_one`] - exactly one output per input record
//! * [`one_to_many`] - any number of outputs per input record, flattened
//! * [`href_to_item`] - input records are `{"href": ...}`, outputs are items
//!
//! Inputs are handled in order and the first error stops the run.
//!
//! ```
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//! use stac_task::backends::MemoryStorage;
//! use stac_task::engine::{adapters, TaskContext};
//!
//! # tokio_test_block(async {
//! let ctx = TaskContext::new(
//!     "tag",
//!     vec![json!({"id": "a"}), json!({"id": "b"})],
//!     "/tmp",
//!     Arc::new(MemoryStorage::new()),
//! );
//! let output = adapters::one_to_one(&ctx, |mut item: Value| async move {
//!     item["properties"] = json!({"tagged": true});
//!     Ok(item)
//! })
//! .await
//! .unwrap();
//! assert_eq!(output.len(), 2);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

use serde_json::Value;
use std::future::Future;
use std::path::PathBuf;

use crate::assets::file_name;
use crate::engine::context::TaskContext;
use crate::errors::TaskError;

pub async fn one_to_one<F, Fut>(ctx: &TaskContext, mut f: F) -> Result<Vec<Value>, TaskError>
where
    F: FnMut(Value) -> Fut,
    Fut: Future<Output = Result<Value, TaskError>>,
{
    let mut output = Vec::with_capacity(ctx.items().len());
    for item in ctx.items() {
        output.push(f(item.clone()).await?);
    }
    Ok(output)
}

pub async fn one_to_many<F, Fut>(ctx: &TaskContext, mut f: F) -> Result<Vec<Value>, TaskError>
where
    F: FnMut(Value) -> Fut,
    Fut: Future<Output = Result<Vec<Value>, TaskError>>,
{
    let mut output = Vec::new();
    for item in ctx.items() {
        output.extend(f(item.clone()).await?);
    }
    Ok(output)
}

/// The `href` of every input record, resolved against the payload location.
pub fn input_hrefs(ctx: &TaskContext) -> Result<Vec<String>, TaskError> {
    ctx.items()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.get("href")
                .and_then(Value::as_str)
                .map(|href| ctx.resolve_href(href))
                .ok_or_else(|| {
                    TaskError::InvalidInput(format!("input record {} has no string 'href'", index))
                })
        })
        .collect()
}

/// Build one item per input href.
pub async fn href_to_item<F, Fut>(ctx: &TaskContext, mut f: F) -> Result<Vec<Value>, TaskError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Value, TaskError>>,
{
    let hrefs = input_hrefs(ctx)?;
    let mut output = Vec::with_capacity(hrefs.len());
    for href in hrefs {
        output.push(f(href).await?);
    }
    Ok(output)
}

/// Copy `href` into the working directory under its file name, replacing any
/// file already there.
pub async fn download_href(ctx: &TaskContext, href: &str) -> Result<PathBuf, TaskError> {
    let target = ctx.workdir().join(file_name(href));
    ctx.storage().download(href, &target).await?;
    Ok(target)
}
