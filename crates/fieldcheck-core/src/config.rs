//! Validator configuration
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};

/// Which name of a field appears in `path` and `field` of reported errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldNames {
    /// The declared Rust field name
    Declared,
    /// The display name given by `#[validate(name = "...")]`, else the declared name
    #[default]
    Display,
}

/// Options for a [`Validator`](crate::Validator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Start struct paths with the root type name (`User.addresses[0].city`)
    pub include_type_name: bool,
    /// Names used for `path` and `field`
    pub field_names: FieldNames,
    /// Let `required` fail on structs whose fields are all empty
    pub required_struct: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            include_type_name: false,
            field_names: FieldNames::Display,
            required_struct: false,
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix struct paths with the root type name
    pub fn with_type_name(mut self) -> Self {
        self.include_type_name = true;
        self
    }

    /// Set which field names appear in error paths
    pub fn with_field_names(mut self, field_names: FieldNames) -> Self {
        self.field_names = field_names;
        self
    }

    /// Enable `required` checks on struct values
    pub fn with_required_struct(mut self) -> Self {
        self.required_struct = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_config_defaults() {
        let config = ValidatorConfig::default();
        assert!(!config.include_type_name);
        assert_eq!(config.field_names, FieldNames::Display);
        assert!(!config.required_struct);
    }

    #[test]
    fn test_validator_config_builders() {
        let config = ValidatorConfig::new()
            .with_type_name()
            .with_field_names(FieldNames::Declared)
            .with_required_struct();
        assert!(config.include_type_name);
        assert_eq!(config.field_names, FieldNames::Declared);
        assert!(config.required_struct);
    }

    #[test]
    fn test_validator_config_deserializes_with_defaults() {
        let config: ValidatorConfig =
            serde_json::from_str(r#"{"field_names": "declared"}"#).unwrap();
        assert_eq!(config.field_names, FieldNames::Declared);
        assert!(!config.include_type_name);
    }
}
