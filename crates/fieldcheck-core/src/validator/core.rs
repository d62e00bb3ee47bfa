//! The `Validator` facade
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use super::location::Location;
use super::struct_level::StructLevel;
use super::walker::Walker;
use crate::config::ValidatorConfig;
use crate::expr::FieldRules;
use crate::reflect::{Reflect, Shape, Structure};
use crate::registry::{Registry, StructRuleFn};
use crate::report::ValidationErrors;
use crate::rules::{FieldLevel, RuleFn};
use crate::{Error, Result};
use std::any::{Any, TypeId};
use std::sync::Arc;

/// Holds registered rules and configuration; validates values against them
///
/// Registration needs `&mut self` and validation only `&self`, so a fully
/// configured validator can be shared across threads behind an `Arc`.
pub struct Validator {
    registry: Registry,
    config: ValidatorConfig,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Validator {
    /// Create a validator with the built-in rules and default configuration
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            registry: Registry::new(),
            config,
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Register a custom rule
    ///
    /// Registering the same function or closure again under the same name is
    /// a no-op. A different implementation under a taken name fails with
    /// [`Error::DuplicateRule`].
    pub fn register_rule<F>(&mut self, name: &str, rule: F) -> Result<()>
    where
        F: Fn(&FieldLevel<'_>) -> bool + Send + Sync + 'static,
    {
        let erased = erase_rule(move |fl| Ok(rule(fl)));
        self.registry.register_rule(name, TypeId::of::<F>(), erased)
    }

    /// Register a custom rule that can fail with a configuration error,
    /// e.g. an unusable parameter
    pub fn register_fallible_rule<F>(&mut self, name: &str, rule: F) -> Result<()>
    where
        F: Fn(&FieldLevel<'_>) -> Result<bool> + Send + Sync + 'static,
    {
        self.registry.register_rule(name, TypeId::of::<F>(), erase_rule(rule))
    }

    /// Register a named shorthand for a list of rules
    pub fn register_alias(&mut self, name: &str, expansion: &str) -> Result<()> {
        self.registry.register_alias(name, expansion)
    }

    /// Register a rule spanning several fields of `T`
    ///
    /// Runs after every field of a `T` value was validated; rules for the
    /// same type run in registration order.
    pub fn register_struct_rule<T, F>(&mut self, rule: F) -> Result<()>
    where
        T: Structure,
        F: Fn(&T, &mut StructLevel<'_>) + Send + Sync + 'static,
    {
        let erased = erase_struct_rule(move |value, level| {
            if let Some(value) = value.downcast_ref::<T>() {
                rule(value, level);
            }
        });
        self.registry
            .register_struct_rule(TypeId::of::<T>(), std::any::type_name::<T>(), erased);
        Ok(())
    }

    /// Parse an expression and check that every rule name in it resolves
    pub fn compile(&self, expression: &str) -> Result<FieldRules> {
        let rules = FieldRules::parse(expression)?;
        self.registry.verify(&rules, "")?;
        Ok(rules)
    }

    /// Validate a standalone value against a rule expression
    pub fn validate_var<V>(&self, value: &V, expression: &str) -> Result<ValidationErrors>
    where
        V: Reflect + ?Sized,
    {
        let rules = FieldRules::parse(expression)?;
        self.validate_with_rules(value, &rules)
    }

    /// Validate a value with access to a second one, for `eqfield`-style rules
    pub fn validate_var_with_value<V, O>(
        &self,
        value: &V,
        other: &O,
        expression: &str,
    ) -> Result<ValidationErrors>
    where
        V: Reflect + ?Sized,
        O: Reflect + ?Sized,
    {
        let rules = FieldRules::parse(expression)?;
        self.registry.verify(&rules, "")?;
        let mut walker = Walker::new(&self.registry, &self.config).with_other(&other);
        walker.walk(&value, &rules, &Location::root(), None)?;
        Ok(walker.finish())
    }

    /// Validate a value against already parsed rules
    ///
    /// Every rule name is resolved before the value is looked at, so a
    /// misconfigured expression fails whatever the input.
    pub fn validate_with_rules<V>(&self, value: &V, rules: &FieldRules) -> Result<ValidationErrors>
    where
        V: Reflect + ?Sized,
    {
        self.registry.verify(rules, "")?;
        let mut walker = Walker::new(&self.registry, &self.config);
        walker.walk(&value, rules, &Location::root(), None)?;
        Ok(walker.finish())
    }

    /// Validate every field of a struct, recursively
    ///
    /// The value must be a struct, or an optional currently holding one.
    pub fn validate_struct<V>(&self, value: &V) -> Result<ValidationErrors>
    where
        V: Reflect + ?Sized,
    {
        let structure = target_struct(&value)?;
        log::debug!("Validating struct {}", structure.type_name());

        let location = if self.config.include_type_name {
            Location::for_type(structure.type_name())
        } else {
            Location::root()
        };

        let mut walker = Walker::new(&self.registry, &self.config);
        walker.walk_struct(structure, &location)?;
        Ok(walker.finish())
    }
}

fn target_struct<'a>(value: &'a dyn Reflect) -> Result<&'a dyn Structure> {
    match value.shape() {
        Shape::Struct(structure) => Ok(structure),
        Shape::Nullable(Some(inner)) => target_struct(inner),
        Shape::Nullable(None) => Err(Error::InvalidTarget {
            message: "expected a struct, found an absent optional".to_string(),
        }),
        other => Err(Error::InvalidTarget {
            message: format!("expected a struct, found {}", other.kind()),
        }),
    }
}

fn erase_rule<F>(rule: F) -> Arc<RuleFn>
where
    F: Fn(&FieldLevel<'_>) -> Result<bool> + Send + Sync + 'static,
{
    Arc::new(rule)
}

fn erase_struct_rule<F>(rule: F) -> Box<StructRuleFn>
where
    F: Fn(&dyn Any, &mut StructLevel<'_>) + Send + Sync + 'static,
{
    Box::new(rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Validator>();
    }

    #[test]
    fn test_validate_var() {
        let validator = Validator::new();
        assert!(validator.validate_var("taufik", "required").unwrap().is_empty());

        let errors = validator.validate_var("", "required").unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].rule, "required");
        assert_eq!(errors.errors()[0].path, "");
    }

    #[test]
    fn test_validate_var_with_value() {
        let validator = Validator::new();
        let errors = validator.validate_var_with_value("secret", "secret", "eqfield").unwrap();
        assert!(errors.is_empty());

        let errors = validator.validate_var_with_value("secret", "other", "eqfield").unwrap();
        assert_eq!(errors.errors()[0].rule, "eqfield");
    }

    #[test]
    fn test_validate_struct_rejects_non_structs() {
        let validator = Validator::new();
        assert!(matches!(validator.validate_struct("text"), Err(Error::InvalidTarget { .. })));
        assert!(matches!(
            validator.validate_struct(&vec![1, 2]),
            Err(Error::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_compile_checks_names() {
        let mut validator = Validator::new();
        assert!(matches!(
            validator.compile("required,pin=6"),
            Err(Error::UnresolvedRuleName { .. })
        ));

        validator.register_rule("pin", |fl| fl.as_str().is_some()).unwrap();
        let rules = validator.compile("required,pin=6").unwrap();
        assert!(validator.validate_with_rules("123456", &rules).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_expression_is_configuration_error() {
        let validator = Validator::new();
        assert!(matches!(
            validator.validate_var("x", "required,,min=1"),
            Err(Error::InvalidExpression(_))
        ));
    }
}
