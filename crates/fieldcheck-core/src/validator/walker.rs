//! Traversal engine
//!
//! Depth-first and pre-order: a node's own rules run before anything nested
//! in it is visited. Struct-level rules run after all fields of their struct.
//! Data failures are collected; only configuration errors abort the walk.
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use super::location::{key_text, Location};
use super::struct_level::StructLevel;
use crate::config::{FieldNames, ValidatorConfig};
use crate::expr::{Dive, FieldRules, RuleSpec, Slot};
use crate::reflect::{is_empty, Reflect, Shape, Structure};
use crate::registry::Registry;
use crate::report::{ValidationError, ValidationErrors};
use crate::rules::{self, panic_message, FieldLevel};
use crate::{Error, Result};
use std::panic::{self, AssertUnwindSafe};

const REQUIRED: &str = "required";

pub(crate) struct Walker<'a> {
    registry: &'a Registry,
    config: &'a ValidatorConfig,
    other: Option<&'a dyn Reflect>,
    errors: ValidationErrors,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(registry: &'a Registry, config: &'a ValidatorConfig) -> Self {
        Self {
            registry,
            config,
            other: None,
            errors: ValidationErrors::new(),
        }
    }

    /// Second value made available to rules through `FieldLevel::other`
    pub(crate) fn with_other(mut self, other: &'a dyn Reflect) -> Self {
        self.other = Some(other);
        self
    }

    pub(crate) fn finish(self) -> ValidationErrors {
        self.errors
    }

    /// Validate one value against its rules, then whatever is nested in it
    pub(crate) fn walk(
        &mut self,
        value: &'a dyn Reflect,
        rules: &'a FieldRules,
        location: &Location,
        parent: Option<&'a dyn Structure>,
    ) -> Result<()> {
        if rules.skip {
            return Ok(());
        }

        let shape = match value.shape() {
            Shape::Nullable(None) => {
                if !rules.omit_empty {
                    let slots = self.registry.expand(&rules.slots, &location.path)?;
                    if requires_value(&slots) {
                        self.report(location, REQUIRED, "");
                    }
                }
                return Ok(());
            }
            Shape::Nullable(Some(inner)) => return self.walk(inner, rules, location, parent),
            shape => shape,
        };

        let empty = is_empty(value, self.config.required_struct);
        if rules.omit_empty && empty {
            return Ok(());
        }

        let slots = self.registry.expand(&rules.slots, &location.path)?;
        if empty && requires_value(&slots) {
            self.report(location, REQUIRED, "");
            return Ok(());
        }

        for slot in &slots {
            self.check_slot(slot, value, location, parent)?;
        }

        if let Shape::Struct(structure) = shape {
            if rules.dive.is_some() {
                return Err(Error::type_mismatch(
                    "dive",
                    "a sequence or mapping",
                    "struct",
                    &location.path,
                ));
            }
            return self.walk_struct(structure, location);
        }

        match &rules.dive {
            Some(dive) => self.dive(shape, dive, location, parent),
            None => Ok(()),
        }
    }

    /// Validate every field of a struct, then its struct-level rules
    pub(crate) fn walk_struct(
        &mut self,
        structure: &'a dyn Structure,
        location: &Location,
    ) -> Result<()> {
        log::trace!("Entering struct {} at '{}'", structure.type_name(), location.path);

        for field in structure.fields() {
            let rules = field.rules.rules()?;
            let display = match self.config.field_names {
                FieldNames::Display => field.display_name,
                FieldNames::Declared => field.name,
            };
            let child = location.child(display, field.name);
            self.registry.verify(rules, &child.path)?;
            self.walk(field.value, rules, &child, Some(structure))?;
        }

        let hooks = self.registry.struct_rules(structure.as_any().type_id());
        if hooks.is_empty() {
            return Ok(());
        }

        let mut level = StructLevel::new(structure.type_name(), location, self.config.field_names);
        for hook in hooks {
            let outcome =
                panic::catch_unwind(AssertUnwindSafe(|| hook(structure.as_any(), &mut level)));
            if let Err(payload) = outcome {
                let message = panic_message(payload.as_ref());
                log::warn!("Struct rule for {} panicked: {}", structure.type_name(), message);
                return Err(Error::RuleExecution {
                    rule: structure.type_name().to_string(),
                    message,
                    source: None,
                });
            }
        }
        self.errors.extend(level.into_errors());
        Ok(())
    }

    fn dive(
        &mut self,
        shape: Shape<'a>,
        dive: &'a Dive,
        location: &Location,
        parent: Option<&'a dyn Structure>,
    ) -> Result<()> {
        match shape {
            Shape::Sequence(items) => {
                if dive.keys.is_some() {
                    return Err(Error::type_mismatch(
                        "keys",
                        "a mapping",
                        "sequence",
                        &location.path,
                    ));
                }
                for (index, item) in items.into_iter().enumerate() {
                    self.walk(item, &dive.elements, &location.child_index(index), parent)?;
                }
                Ok(())
            }
            Shape::Mapping(entries) => {
                for (key, value) in entries {
                    let text = key_text(key);
                    if let Some(keys) = &dive.keys {
                        self.walk(key, keys, &location.child_key(&text), parent)?;
                    }
                    self.walk(value, &dive.elements, &location.child_value(&text), parent)?;
                }
                Ok(())
            }
            other => Err(Error::type_mismatch(
                "dive",
                "a sequence or mapping",
                other.kind(),
                &location.path,
            )),
        }
    }

    fn check_slot(
        &mut self,
        slot: &Slot,
        value: &'a dyn Reflect,
        location: &Location,
        parent: Option<&'a dyn Structure>,
    ) -> Result<()> {
        match slot {
            Slot::Single(spec) => {
                if !self.evaluate(spec, value, location, parent)? {
                    self.report(location, &spec.name, spec.param());
                }
            }
            Slot::AnyOf(specs) => {
                for spec in specs {
                    if self.evaluate(spec, value, location, parent)? {
                        return Ok(());
                    }
                }
                self.report(location, &slot.to_string(), "");
            }
        }
        Ok(())
    }

    fn evaluate(
        &self,
        spec: &RuleSpec,
        value: &'a dyn Reflect,
        location: &Location,
        parent: Option<&'a dyn Structure>,
    ) -> Result<bool> {
        let rule = self.registry.rule(&spec.name).ok_or_else(|| Error::UnresolvedRuleName {
            name: spec.name.clone(),
            path: location.path.clone(),
        })?;

        let level = FieldLevel {
            value,
            rule: &spec.name,
            param: spec.param(),
            field_name: &location.name,
            path: &location.path,
            parent,
            other: self.other,
            config: self.config,
        };
        rules::evaluate(rule, &level)
    }

    fn report(&mut self, location: &Location, rule: &str, param: &str) {
        self.errors.push(ValidationError::new(
            location.path.as_str(),
            location.struct_path.as_str(),
            location.field.as_str(),
            location.struct_field.as_str(),
            rule,
            param,
        ));
    }
}

fn requires_value(slots: &[Slot]) -> bool {
    slots
        .iter()
        .any(|slot| matches!(slot, Slot::Single(spec) if spec.name == REQUIRED))
}
