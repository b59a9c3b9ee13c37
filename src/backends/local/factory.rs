// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::tasks::*;
use crate::config::TaskRegistry;
use crate::errors::RegistryError;
use crate::traits::Task;

/// Factory for the tasks compiled into this binary
pub struct LocalTaskFactory;

impl LocalTaskFactory {
    /// Create a built-in task by name:
    /// - "passthrough" -> PassthroughTask
    /// - "derived-item" -> DerivedItemTask
    pub fn create_task(name: &str) -> Result<Arc<dyn Task>, RegistryError> {
        match name {
            PassthroughTask::NAME => Ok(Arc::new(PassthroughTask::new())),
            DerivedItemTask::NAME => Ok(Arc::new(DerivedItemTask::new())),
            _ => Err(RegistryError::TaskNotFound {
                name: name.to_string(),
                available: Self::list_available_tasks()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            }),
        }
    }

    pub fn list_available_tasks() -> Vec<&'static str> {
        vec![DerivedItemTask::NAME, PassthroughTask::NAME]
    }

    pub fn is_task_available(name: &str) -> bool {
        Self::list_available_tasks().contains(&name)
    }

    pub fn register_builtins(registry: &mut TaskRegistry) -> Result<(), RegistryError> {
        for name in Self::list_available_tasks() {
            registry.register(Self::create_task(name)?)?;
        }
        Ok(())
    }

    /// A registry holding every built-in task.
    pub fn builtin_registry() -> Result<TaskRegistry, RegistryError> {
        let mut registry = TaskRegistry::new();
        Self::register_builtins(&mut registry)?;
        Ok(registry)
    }
}
