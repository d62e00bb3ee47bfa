//! Validation entry points
//!
//! The validator is organized into focused modules:
//! - `core`: the `Validator` facade holding registry and configuration
//! - `walker`: depth-first traversal of the value graph
//! - `location`: display and declared-name paths
//! - `struct_level`: context for struct-level rules
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

pub mod core;
mod location;
pub mod struct_level;
mod walker;

pub use self::core::Validator;
pub use struct_level::StructLevel;
