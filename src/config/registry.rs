// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::RegistryError;
use crate::traits::{Task, TaskSchema};

/// Public description of a registered task, as printed by `list --json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
    #[serde(flatten)]
    pub schema: TaskSchema,
}

impl TaskMetadata {
    pub fn from_task(task: &dyn Task) -> Self {
        Self {
            name: task.name().to_string(),
            version: task.version().to_string(),
            description: task.description().to_string(),
            schema: task.schema(),
        }
    }
}

/// Tasks available to the runner, keyed by name.
#[derive(Clone, Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<String, Arc<dyn Task>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task under its own name.
    pub fn register(&mut self, task: Arc<dyn Task>) -> Result<(), RegistryError> {
        let name = task.name();
        if self.tasks.contains_key(name) {
            return Err(RegistryError::AlreadyRegistered {
                name: name.to_string(),
            });
        }
        self.tasks.insert(name.to_string(), task);
        Ok(())
    }

    pub fn unregister(&mut self, name: &str) -> Result<Arc<dyn Task>, RegistryError> {
        self.tasks
            .remove(name)
            .ok_or_else(|| RegistryError::NotRegistered {
                name: name.to_string(),
            })
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Task>, RegistryError> {
        self.tasks
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::TaskNotFound {
                name: name.to_string(),
                available: self.names(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Registered names in ascending order.
    pub fn names(&self) -> Vec<String> {
        self.tasks.keys().cloned().collect()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Arc<dyn Task>> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn metadata(&self) -> Vec<TaskMetadata> {
        self.tasks
            .values()
            .map(|task| TaskMetadata::from_task(task.as_ref()))
            .collect()
    }

    /// The single registered task among `configured` names, used when the
    /// caller did not name one.
    pub fn select_configured<'a>(
        &self,
        configured: impl IntoIterator<Item = &'a str>,
    ) -> Result<Arc<dyn Task>, RegistryError> {
        let mut matches: Vec<&str> = configured
            .into_iter()
            .filter(|name| self.tasks.contains_key(*name))
            .collect();
        matches.dedup();

        match matches.as_slice() {
            [] => Err(RegistryError::NoMatchingTask),
            [name] => self.get(name),
            _ => Err(RegistryError::AmbiguousTask {
                matches: matches.iter().map(|m| m.to_string()).collect(),
            }),
        }
    }

    /// The only registered task, when exactly one is registered.
    pub fn only(&self) -> Option<Arc<dyn Task>> {
        match self.tasks.len() {
            1 => self.tasks.values().next().cloned(),
            _ => None,
        }
    }
}

impl std::fmt::Debug for TaskRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskRegistry")
            .field("task_count", &self.tasks.len())
            .field("task_names", &self.tasks.keys().collect::<Vec<_>>())
            .finish()
    }
}
