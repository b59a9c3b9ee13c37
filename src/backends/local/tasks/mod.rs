// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod derived_item;
pub mod passthrough;

pub use derived_item::DerivedItemTask;
pub use passthrough::PassthroughTask;
