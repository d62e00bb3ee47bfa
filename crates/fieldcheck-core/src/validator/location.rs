//! Field paths
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use crate::reflect::{Reflect, Shape};

/// Where in the value graph the walker currently is
///
/// Two paths are tracked side by side: one built from display names and one
/// from declared names. Both start empty for a root value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Location {
    pub(crate) path: String,
    pub(crate) struct_path: String,
    pub(crate) field: String,
    pub(crate) struct_field: String,
    /// Declared name of the enclosing field, without element suffixes
    pub(crate) name: String,
}

impl Location {
    pub(crate) fn root() -> Self {
        Self::default()
    }

    /// Root location of a struct whose paths start with its type name
    pub(crate) fn for_type(type_name: &str) -> Self {
        Self {
            path: type_name.to_string(),
            struct_path: type_name.to_string(),
            field: String::new(),
            struct_field: String::new(),
            name: String::new(),
        }
    }

    /// Location of a struct field
    pub(crate) fn child(&self, display: &str, declared: &str) -> Self {
        Self {
            path: join(&self.path, display),
            struct_path: join(&self.struct_path, declared),
            field: display.to_string(),
            struct_field: declared.to_string(),
            name: declared.to_string(),
        }
    }

    /// Location of a sequence element
    pub(crate) fn child_index(&self, index: usize) -> Self {
        self.suffixed(&format!("[{}]", index))
    }

    /// Location of a mapping value
    pub(crate) fn child_value(&self, key: &str) -> Self {
        self.suffixed(&format!("[{}]", key))
    }

    /// Location of a mapping key
    pub(crate) fn child_key(&self, key: &str) -> Self {
        self.suffixed(&format!("{{{}}}", key))
    }

    fn suffixed(&self, suffix: &str) -> Self {
        Self {
            path: format!("{}{}", self.path, suffix),
            struct_path: format!("{}{}", self.struct_path, suffix),
            field: format!("{}{}", self.field, suffix),
            struct_field: format!("{}{}", self.struct_field, suffix),
            name: self.name.clone(),
        }
    }
}

fn join(base: &str, segment: &str) -> String {
    if base.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", base, segment)
    }
}

/// Text used for a mapping key inside a path
pub(crate) fn key_text(key: &dyn Reflect) -> String {
    match key.shape() {
        Shape::Scalar(scalar) => scalar.to_string(),
        Shape::Nullable(Some(inner)) => key_text(inner),
        Shape::Nullable(None) => "null".to_string(),
        Shape::Struct(structure) => structure.type_name().to_string(),
        other => other.kind().to_string(),
    }
}
