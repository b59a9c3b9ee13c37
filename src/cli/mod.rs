// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod args;
pub mod commands;

pub use args::{JsonSchemaArgs, ListArgs, RunArgs, SchemaKind};
use clap::{Parser, Subcommand};

use crate::config::TaskRegistry;

#[derive(Parser, Debug)]
#[command(name = "stac-task")]
#[command(version = crate::VERSION)]
#[command(about = "Run STAC processing tasks against a payload")]
pub struct Args {
    /// Log filter, e.g. `debug` or `stac_task=trace` (defaults to RUST_LOG, then info)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub logging: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "Run a task on an input payload",
        after_help = "Examples:\n    stac-task run payload.json --task derived-item\n    cat payload.json | stac-task run --local"
    )]
    Run(RunArgs),
    #[command(about = "List the registered tasks")]
    List(ListArgs),
    #[command(
        about = "Print a task's JSON schema",
        after_help = "Example:\n    stac-task jsonschema derived-item config"
    )]
    Jsonschema(JsonSchemaArgs),
}

pub async fn run(args: Args, registry: &TaskRegistry) -> anyhow::Result<()> {
    match args.command {
        Command::Run(run_args) => commands::run(run_args, registry).await,
        Command::List(list_args) => commands::list(list_args, registry),
        Command::Jsonschema(schema_args) => commands::jsonschema(schema_args, registry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_flags() {
        let args = Args::try_parse_from([
            "stac-task", "run", "payload.json", "--task", "passthrough", "--no-upload", "--logging", "debug",
        ])
        .unwrap();

        assert_eq!(args.logging.as_deref(), Some("debug"));
        match args.command {
            Command::Run(run) => {
                assert_eq!(run.input.as_deref(), Some("payload.json"));
                assert_eq!(run.task.as_deref(), Some("passthrough"));
                assert!(run.no_upload);
                assert!(!run.upload);
            }
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn test_later_switch_wins() {
        let args = Args::try_parse_from(["stac-task", "run", "--no-upload", "--upload"]).unwrap();
        match args.command {
            Command::Run(run) => {
                assert!(run.upload);
                assert!(!run.no_upload);
            }
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_jsonschema() {
        let args = Args::try_parse_from(["stac-task", "jsonschema", "derived-item", "config"]).unwrap();
        match args.command {
            Command::Jsonschema(schema) => {
                assert_eq!(schema.task.as_deref(), Some("derived-item"));
                assert_eq!(schema.schema, SchemaKind::Config);
            }
            other => panic!("expected jsonschema, got {:?}", other),
        }

        assert!(Args::try_parse_from(["stac-task", "jsonschema", "t", "bogus"]).is_err());
    }
}
