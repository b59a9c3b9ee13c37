// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Payload href or path (reads JSON from stdin when omitted)
    #[arg(value_name = "INPUT")]
    pub input: Option<String>,

    /// Task to run (defaults to the one registered task named in the payload)
    #[arg(long, short = 't', value_name = "NAME")]
    pub task: Option<String>,

    /// Write the output payload here instead of stdout
    #[arg(long, value_name = "URL")]
    pub output: Option<String>,

    /// Working directory (a temporary directory when omitted)
    #[arg(long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Keep the working directory after the run
    #[arg(long)]
    pub save_workdir: bool,

    /// Upload assets and items (default)
    #[arg(long, overrides_with = "no_upload", help_heading = "Switches")]
    pub upload: bool,

    /// Do not upload assets or items
    #[arg(long, help_heading = "Switches")]
    pub no_upload: bool,

    /// Validate the payload before running (default)
    #[arg(long, overrides_with = "no_validate", help_heading = "Switches")]
    pub validate: bool,

    /// Skip payload and task validation
    #[arg(long, help_heading = "Switches")]
    pub no_validate: bool,

    /// Deprecated alias of --no-upload
    #[arg(long, hide = true)]
    pub skip_upload: bool,

    /// Deprecated alias of --no-validate
    #[arg(long, hide = true)]
    pub skip_validation: bool,

    /// Run locally: keep the working directory, skip uploads, write output
    /// to local-output/output-payload.json
    #[arg(long)]
    pub local: bool,

    /// YAML file with run defaults
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Print task metadata as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct JsonSchemaArgs {
    /// Task name (may be omitted when only one task is registered)
    #[arg(value_name = "TASK")]
    pub task: Option<String>,

    /// Which schema to print
    #[arg(value_enum, value_name = "SCHEMA", default_value_t = SchemaKind::Input)]
    pub schema: SchemaKind,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    Input,
    Output,
    Config,
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SchemaKind::Input => "input",
            SchemaKind::Output => "output",
            SchemaKind::Config => "config",
        };
        f.write_str(name)
    }
}
