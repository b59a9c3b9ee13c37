// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::engine::{adapters, TaskContext, TaskParameters};
use crate::errors::TaskError;
use crate::traits::{Task, TaskSchema};
use crate::utils::{add_software_version, create_item_from_item};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DerivedItemParameters {
    /// Appended to each derived item's `id`.
    id_suffix: Option<String>,
}

/// Derived Item task - creates one derived item per input, linked back to its
/// source, and stamps this software's version on the output.
pub struct DerivedItemTask;

impl DerivedItemTask {
    pub const NAME: &'static str = "derived-item";

    pub fn new() -> Self {
        Self
    }
}

impl Default for DerivedItemTask {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Task for DerivedItemTask {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Creates a derived item for every input item"
    }

    fn schema(&self) -> TaskSchema {
        TaskSchema {
            config: Some(json!({
                "type": "object",
                "properties": {
                    "id_suffix": {"type": "string"}
                },
                "additionalProperties": true
            })),
            ..TaskSchema::default()
        }
    }

    async fn process(
        &self,
        ctx: &TaskContext,
        parameters: TaskParameters,
    ) -> Result<Vec<Value>, TaskError> {
        let params: DerivedItemParameters = parameters.deserialize(self.name())?;

        adapters::one_to_one(ctx, |item| {
            let suffix = params.id_suffix.clone();
            async move {
                if !item.is_object() {
                    return Err(TaskError::InvalidInput(
                        "derived items can only be created from mappings".to_string(),
                    ));
                }
                let mut derived = create_item_from_item(&item);
                if let (Some(suffix), Some(Value::String(id))) = (suffix, derived.get_mut("id")) {
                    id.push_str(&suffix);
                }
                Ok(derived)
            }
        })
        .await
    }

    fn post_process(&self, mut record: Value) -> Result<Value, TaskError> {
        add_software_version(&mut record, self.name(), self.version())?;
        Ok(record)
    }
}
