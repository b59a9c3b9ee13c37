// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod registry;
mod storage;
mod task;
mod template;

pub use config::ConfigError;
pub use registry::RegistryError;
pub use storage::{PayloadError, StorageError};
pub use task::TaskError;
pub use template::TemplateError;
