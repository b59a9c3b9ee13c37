// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod factory;
pub mod storage;
pub mod tasks;

pub use factory::LocalTaskFactory;
pub use storage::LocalStorage;
pub use tasks::*;
