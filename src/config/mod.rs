// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod consts;
pub mod diagnostics;
pub mod matchers;
pub mod payload;
pub mod registry;
pub mod runtime;
pub mod upload;
mod validation;
pub mod view;


pub use diagnostics::Diagnostic;
pub use matchers::{CollectionConfig, MatcherKind, MatcherRecord};
pub use payload::Payload;
pub use registry::{TaskMetadata, TaskRegistry};
pub use runtime::{load_settings, RunnerSettings};
pub use upload::{PublicAssets, UploadConfig, UploadOptions};
pub use view::ConfigView;
