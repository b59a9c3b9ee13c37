// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Payload field holding the output records
pub const FEATURES: &str = "features";
/// Payload field holding the process definition
pub const PROCESS: &str = "process";
/// Process field with options applied to every task
pub const WORKFLOW_OPTIONS: &str = "workflow_options";
/// Process field with per-task options
pub const TASKS: &str = "tasks";
/// Process field with global upload options
pub const UPLOAD_OPTIONS: &str = "upload_options";
/// Legacy collection mapping inside `upload_options`
pub const LEGACY_COLLECTIONS: &str = "collections";
/// Process field with the ordered matcher list
pub const COLLECTION_MATCHERS: &str = "collection_matchers";
/// Process field with per-collection options
pub const COLLECTION_OPTIONS: &str = "collection_options";
/// Record field set by collection assignment
pub const COLLECTION: &str = "collection";
/// Record field holding the extension list
pub const STAC_EXTENSIONS: &str = "stac_extensions";

/// Processing extension declared when software provenance is stamped
pub const PROCESSING_EXTENSION: &str =
    "https://stac-extensions.github.io/processing/v1.1.0/schema.json";
/// Property holding `{task name: version}` provenance
pub const PROCESSING_SOFTWARE_PROPERTY: &str = "processing:software";

/// `public_assets` value marking every asset public
pub const PUBLIC_ASSETS_ALL: &str = "ALL";

/// Working directory used by `run --local`
pub const LOCAL_WORKDIR: &str = "local-output";
/// Output payload file name used by `run --local`
pub const LOCAL_OUTPUT_FILE: &str = "output-payload.json";
