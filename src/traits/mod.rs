// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod storage;
pub mod task;

pub use storage::StorageClient;
pub use task::{Task, TaskSchema};
