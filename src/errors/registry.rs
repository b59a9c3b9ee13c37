// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for task registration and lookup.

use std::error::Error;
use std::fmt;

/// Errors that can occur while registering or looking up tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A task with this name is already registered
    AlreadyRegistered { name: String },

    /// Unregistering a task that was never registered
    NotRegistered { name: String },

    /// Lookup of an unknown task
    TaskNotFound { name: String, available: Vec<String> },

    /// No task was named and the payload did not single one out
    NoMatchingTask,

    /// No task was named and several registered tasks are configured in the payload
    AmbiguousTask { matches: Vec<String> },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::AlreadyRegistered { name } => {
                write!(f, "task is already registered: {}", name)
            }
            RegistryError::NotRegistered { name } => {
                write!(f, "task is not registered: {}", name)
            }
            RegistryError::TaskNotFound { name, available } => {
                write!(
                    f,
                    "task not found: {} (available tasks: {})",
                    name,
                    available.join(", ")
                )
            }
            RegistryError::NoMatchingTask => {
                write!(
                    f,
                    "no task provided, and no registered tasks match the process tasks list"
                )
            }
            RegistryError::AmbiguousTask { matches } => {
                write!(
                    f,
                    "no task provided, and more than one registered task matches the process tasks list: {}",
                    matches.join(", ")
                )
            }
        }
    }
}

impl Error for RegistryError {}
