// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod href;
pub mod item;
pub mod json;
pub mod template;

pub use href::{is_absolute_href, make_absolute_href};
pub use item::{add_software_version, create_item_from_item};
pub use json::{empty_map, is_truthy, type_name, Document};
pub use template::substitute_template;
