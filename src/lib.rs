// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod assets;         // asset download and upload
pub mod backends;       // storage clients + built-in tasks
pub mod cli;            // command-line surface
pub mod config;         // payload view, validation, registry
pub mod engine;         // task lifecycle and collection assignment
pub mod errors;         // error handling
pub mod observability;
pub mod traits;         // Task and StorageClient
pub mod utils;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
