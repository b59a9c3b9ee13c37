// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{anyhow, bail, Context};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

use crate::backends::LocalStorage;
use crate::cli::args::{JsonSchemaArgs, ListArgs, RunArgs, SchemaKind};
use crate::config::consts::{LOCAL_OUTPUT_FILE, LOCAL_WORKDIR};
use crate::config::{load_settings, Payload, RunnerSettings, TaskRegistry};
use crate::engine::{RunOptions, TaskRunner};
use crate::observability::messages::config::DeprecatedFlag;
use crate::observability::messages::task::TaskSelected;
use crate::observability::messages::StructuredLog;
use crate::traits::{StorageClient, Task};

/// Run options and output location after applying the settings file, then
/// `--local`, then explicit flags.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub options: RunOptions,
    pub output: Option<String>,
}

pub fn plan_run(args: &RunArgs, settings: &RunnerSettings) -> RunPlan {
    let mut options = settings.run_options();
    let mut output = settings.output.clone();

    if args.local {
        options.workdir = Some(PathBuf::from(LOCAL_WORKDIR));
        options.save_workdir = Some(true);
        options.upload = false;
        output = Some(format!("{}/{}", LOCAL_WORKDIR, LOCAL_OUTPUT_FILE));
    }

    if args.skip_upload {
        DeprecatedFlag {
            flag: "--skip-upload",
            replacement: "--no-upload",
        }
        .log();
        options.upload = false;
    }
    if args.skip_validation {
        DeprecatedFlag {
            flag: "--skip-validation",
            replacement: "--no-validate",
        }
        .log();
        options.validate = false;
    }

    if let Some(workdir) = &args.workdir {
        options.workdir = Some(workdir.clone());
    }
    if args.save_workdir {
        options.save_workdir = Some(true);
    }
    if let Some(path) = &args.output {
        output = Some(path.clone());
    }
    if args.upload {
        options.upload = true;
    }
    if args.no_upload {
        options.upload = false;
    }
    if args.validate {
        options.validate = true;
    }
    if args.no_validate {
        options.validate = false;
    }

    RunPlan { options, output }
}

/// The task named on the command line, or the single registered task the
/// payload configures.
pub fn select_task(
    registry: &TaskRegistry,
    requested: Option<&str>,
    payload: &Payload,
) -> anyhow::Result<Arc<dyn Task>> {
    if let Some(name) = requested {
        return Ok(registry.get(name)?);
    }

    let configured = payload.view().task_options_map()?;
    let task = registry.select_configured(configured.keys().map(String::as_str))?;
    TaskSelected {
        task_name: task.name(),
    }
    .log();
    Ok(task)
}

pub async fn run(args: RunArgs, registry: &TaskRegistry) -> anyhow::Result<()> {
    let settings = match &args.config {
        Some(path) => load_settings(path)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => RunnerSettings::default(),
    };
    let plan = plan_run(&args, &settings);
    let storage = Arc::new(LocalStorage::new());

    let payload = match &args.input {
        Some(href) => Payload::from_href(storage.as_ref(), href)
            .await
            .with_context(|| format!("failed to read payload from {}", href))?,
        None => {
            let mut input = String::new();
            tokio::io::stdin()
                .read_to_string(&mut input)
                .await
                .context("failed to read payload from stdin")?;
            Payload::from_json_str(&input)?
        }
    };

    let task = select_task(registry, args.task.as_deref(), &payload)?;
    let output = TaskRunner::new(task, storage.clone())
        .with_options(plan.options)
        .run(payload)
        .await
        .map_err(|e| anyhow!("{}: {}", e.kind(), e))?;

    let body = output.to_json_string()?;
    match plan.output {
        Some(url) => {
            storage
                .write(&url, body.as_bytes())
                .await
                .with_context(|| format!("failed to write output payload to {}", url))?;
        }
        None => println!("{}", body),
    }
    Ok(())
}

pub fn list(args: ListArgs, registry: &TaskRegistry) -> anyhow::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(&registry.metadata())?);
        return Ok(());
    }
    for task in registry.tasks() {
        println!("{}: {}", task.name(), task.description());
    }
    Ok(())
}

pub fn jsonschema(args: JsonSchemaArgs, registry: &TaskRegistry) -> anyhow::Result<()> {
    let task = match args.task.as_deref() {
        Some(name) => registry.get(name)?,
        None => match registry.only() {
            Some(task) => task,
            None => bail!(
                "more than one task is registered; name one of: {}",
                registry.names().join(", ")
            ),
        },
    };

    let schema = task.schema();
    let selected = match args.schema {
        SchemaKind::Input => schema.input,
        SchemaKind::Output => schema.output,
        SchemaKind::Config => schema.config,
    };
    match selected {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => bail!("task '{}' defines no {} schema", task.name(), args.schema),
    }
    Ok(())
}
