//! Validation failures and their aggregation
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One failing (field path, rule, parameter) triple
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ValidationError {
    /// Path built from display names, e.g. `addresses[0].city`
    pub path: String,
    /// Same path built from declared field names
    pub struct_path: String,
    /// Last segment of `path`
    pub field: String,
    /// Last segment of `struct_path`
    pub struct_field: String,
    /// The failing rule, or the whole group for an OR-group (`email|numeric`)
    pub rule: String,
    /// The rule parameter, empty when none was given
    pub param: String,
    /// Default human-readable message
    pub message: String,
}

impl ValidationError {
    /// Create a validation error; the message is derived from path, field and rule
    pub fn new<R, P>(
        path: impl Into<String>,
        struct_path: impl Into<String>,
        field: impl Into<String>,
        struct_field: impl Into<String>,
        rule: R,
        param: P,
    ) -> Self
    where
        R: Into<String>,
        P: Into<String>,
    {
        let path = path.into();
        let field = field.into();
        let rule = rule.into();
        let message = format!(
            "Key: '{}' Error:Field validation for '{}' failed on the '{}' tag",
            path, field, rule
        );

        Self {
            path,
            struct_path: struct_path.into(),
            field,
            struct_field: struct_field.into(),
            rule,
            param: param.into(),
            message,
        }
    }
}

/// Ordered set of validation failures; empty means the value is valid
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
            first = false;
        }
        Ok(())
    }
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Append an error, keeping traversal order
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Errors recorded at exactly this path
    pub fn for_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors.iter().filter(move |error| error.path == path)
    }

    /// Errors grouped by path, groups in order of first appearance
    pub fn by_path(&self) -> Vec<(&str, Vec<&ValidationError>)> {
        let mut groups: Vec<(&str, Vec<&ValidationError>)> = Vec::new();
        for error in &self.errors {
            match groups.iter_mut().find(|(path, _)| *path == error.path) {
                Some((_, group)) => group.push(error),
                None => groups.push((error.path.as_str(), vec![error])),
            }
        }
        groups
    }

    /// Convert to result - Ok if no errors, Err if any errors exist
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
