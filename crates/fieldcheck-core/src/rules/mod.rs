//! Rule evaluation
//!
//! Every rule, built-in or registered, is a function of one [`FieldLevel`]:
//! the value under test, the rule parameter, and access to the enclosing
//! struct for cross-field checks. Built-ins get no API that custom rules lack.
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

pub(crate) mod builtin;
mod format;

use crate::config::ValidatorConfig;
use crate::reflect::{Reflect, Scalar, Shape, Structure};
use crate::{Error, Result};
use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

/// Type-erased rule implementation
pub type RuleFn = dyn Fn(&FieldLevel<'_>) -> Result<bool> + Send + Sync;

/// Context handed to a rule for one evaluation
pub struct FieldLevel<'a> {
    pub(crate) value: &'a dyn Reflect,
    pub(crate) rule: &'a str,
    pub(crate) param: &'a str,
    pub(crate) field_name: &'a str,
    pub(crate) path: &'a str,
    pub(crate) parent: Option<&'a dyn Structure>,
    pub(crate) other: Option<&'a dyn Reflect>,
    pub(crate) config: &'a ValidatorConfig,
}

impl<'a> FieldLevel<'a> {
    /// The value under test
    pub fn value(&self) -> &'a dyn Reflect {
        self.value
    }

    pub fn shape(&self) -> Shape<'a> {
        self.value.shape()
    }

    /// The value as a scalar, if it is one
    pub fn scalar(&self) -> Option<Scalar<'a>> {
        match self.value.shape() {
            Shape::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// The value as a string slice, if it is a string
    pub fn as_str(&self) -> Option<&'a str> {
        self.scalar().and_then(|scalar| scalar.as_str())
    }

    /// Name of the rule being evaluated
    pub fn rule(&self) -> &'a str {
        self.rule
    }

    /// Raw parameter, empty when none was given
    pub fn param(&self) -> &'a str {
        self.param
    }

    /// Parse the parameter; failure is a configuration error
    pub fn param_as<T>(&self) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.param
            .parse::<T>()
            .map_err(|err| Error::invalid_parameter(self.rule, self.param, err.to_string()))
    }

    /// Declared name of the field being validated, without element suffixes
    ///
    /// Empty for a root value.
    pub fn field_name(&self) -> &'a str {
        self.field_name
    }

    /// Path of the value being validated
    pub fn path(&self) -> &'a str {
        self.path
    }

    /// The immediately enclosing struct
    pub fn parent(&self) -> Option<&'a dyn Structure> {
        self.parent
    }

    /// A field of the immediately enclosing struct, by declared name
    pub fn sibling(&self, name: &str) -> Result<&'a dyn Reflect> {
        let unknown = |type_name: &str| Error::UnknownField {
            rule: self.rule.to_string(),
            field: name.to_string(),
            type_name: type_name.to_string(),
        };

        let parent = self.parent.ok_or_else(|| unknown("(no enclosing struct)"))?;
        parent
            .field(name)
            .map(|field| field.value)
            .ok_or_else(|| unknown(parent.type_name()))
    }

    /// The second value given to `validate_var_with_value`
    pub fn other(&self) -> Option<&'a dyn Reflect> {
        self.other
    }

    pub(crate) fn mismatch(&self, expected: &str) -> Error {
        Error::type_mismatch(self.rule, expected, self.value.shape().kind(), self.path)
    }
}

/// Run one rule, turning a panic into a configuration error
pub(crate) fn evaluate(rule: &RuleFn, level: &FieldLevel<'_>) -> Result<bool> {
    log::trace!("Evaluating rule '{}' at '{}'", level.rule, level.path);

    match panic::catch_unwind(AssertUnwindSafe(|| rule(level))) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            log::warn!("Rule '{}' panicked at '{}': {}", level.rule, level.path, message);
            Err(Error::RuleExecution {
                rule: level.rule.to_string(),
                message,
                source: None,
            })
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "rule panicked".to_string()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Evaluate a rule function against a bare value
    pub fn check(
        rule: fn(&FieldLevel<'_>) -> Result<bool>,
        name: &str,
        param: &str,
        value: &dyn Reflect,
    ) -> Result<bool> {
        let config = ValidatorConfig::default();
        let level = FieldLevel {
            value,
            rule: name,
            param,
            field_name: "",
            path: "",
            parent: None,
            other: None,
            config: &config,
        };
        rule(&level)
    }
}
