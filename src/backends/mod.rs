// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Storage and task backends.
//!
//! # Available Backends
//!
//! ## Local Backend
//! - **LocalStorage**: plain paths and `file://` URLs on the local filesystem
//! - **LocalTaskFactory**: the tasks compiled into the binary (`passthrough`, `derived-item`)
//!
//! ## Memory Backend
//! - **MemoryStorage**: an in-process object map keyed by URL, recording every upload.
//!   Used by tests and by embedders that want to inspect what a task wrote.
//!
//! ## Stub Backend (Test-Only)
//! Tasks with scripted behavior for lifecycle tests:
//! - **StubTask**: echoes its input
//! - **FailingTask**: fails during processing
//! - **RejectingTask**: rejects the payload in its validation hook
//! - **Note**: NOT available in production builds
//!
//! # Examples
//!
//! ```rust
//! use stac_task::backends::local::LocalTaskFactory;
//!
//! let registry = LocalTaskFactory::builtin_registry()?;
//! let task = registry.get("passthrough")?;
//! assert_eq!(task.name(), "passthrough");
//! # Ok::<(), stac_task::errors::RegistryError>(())
//! ```

pub mod local;
pub mod memory;
#[cfg(test)]
pub mod stub;

pub use local::{LocalStorage, LocalTaskFactory};
pub use memory::{MemoryStorage, UploadRecord};
