// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use clap::Parser;
use std::process::ExitCode;

use stac_task::backends::LocalTaskFactory;
use stac_task::cli::{self, Args};
use stac_task::observability::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = init_tracing(args.logging.as_deref()) {
        eprintln!("failed to initialize logging: {}", error);
        return ExitCode::FAILURE;
    }

    let registry = match LocalTaskFactory::builtin_registry() {
        Ok(registry) => registry,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    match cli::run(args, &registry).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{:#}", error);
            ExitCode::FAILURE
        }
    }
}
