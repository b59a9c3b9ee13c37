// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod adapters;
pub mod context;
pub mod lifecycle;
pub mod matcher;
pub mod parameters;
pub mod post_process;
pub mod resolver;
pub mod workdir;
#[cfg(test)]
pub mod integration_tests;

pub use context::TaskContext;
pub use lifecycle::{LifecycleStage, RunOptions, TaskRunner};
pub use matcher::matches_exactly_one;
pub use parameters::{resolve_parameters, TaskParameters};
pub use resolver::{assign_collections, find_collection};
pub use workdir::WorkDir;
