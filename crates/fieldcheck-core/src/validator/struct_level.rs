//! Struct-level rule context
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use super::location::Location;
use crate::config::FieldNames;
use crate::report::{ValidationError, ValidationErrors};

/// Handed to struct-level rules after every field of the struct was validated
pub struct StructLevel<'a> {
    type_name: &'static str,
    location: &'a Location,
    field_names: FieldNames,
    errors: ValidationErrors,
}

impl<'a> StructLevel<'a> {
    pub(crate) fn new(
        type_name: &'static str,
        location: &'a Location,
        field_names: FieldNames,
    ) -> Self {
        Self {
            type_name,
            location,
            field_names,
            errors: ValidationErrors::new(),
        }
    }

    /// Record a failure on one field of the struct
    ///
    /// `field` is the name shown in `path`, `struct_field` the declared name.
    pub fn report_error(&mut self, field: &str, struct_field: &str, rule: &str, param: &str) {
        let display = match self.field_names {
            FieldNames::Display => field,
            FieldNames::Declared => struct_field,
        };
        let at = self.location.child(display, struct_field);
        self.errors.push(ValidationError::new(
            at.path,
            at.struct_path,
            at.field,
            at.struct_field,
            rule,
            param,
        ));
    }

    /// Path of the struct being validated
    pub fn path(&self) -> &str {
        &self.location.path
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Errors reported so far by struct-level rules of this struct
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub(crate) fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}
