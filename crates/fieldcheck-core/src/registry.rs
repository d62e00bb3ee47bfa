//! Rule and alias registry
//!
//! Names live in a single namespace shared by built-in rules, custom rules
//! and aliases. Re-registering a custom rule with the same implementation is
//! a no-op; any other collision is rejected.
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use crate::expr::{FieldRules, ParseError, Slot, DIRECTIVES};
use crate::rules::builtin::BUILTIN_RULES;
use crate::rules::RuleFn;
use crate::validator::StructLevel;
use crate::{Error, Result};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Type-erased struct-level rule; the `Any` is the struct being validated
pub(crate) type StructRuleFn = dyn Fn(&dyn Any, &mut StructLevel<'_>) + Send + Sync;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Builtin,
    /// Identified by the type of the registered function or closure
    Custom(TypeId),
}

struct RuleEntry {
    origin: Origin,
    rule: Arc<RuleFn>,
}

struct Alias {
    expression: String,
    rules: FieldRules,
}

/// What a rule name is bound to
pub(crate) enum Resolved<'a> {
    Rule(&'a RuleFn),
    Alias(&'a FieldRules),
}

/// Registered rules, aliases and struct-level rules
pub(crate) struct Registry {
    rules: HashMap<String, RuleEntry>,
    aliases: HashMap<String, Alias>,
    struct_rules: HashMap<TypeId, Vec<Box<StructRuleFn>>>,
}

impl Registry {
    /// Registry holding the built-in rules
    pub(crate) fn new() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|&(name, rule)| {
                let entry = RuleEntry {
                    origin: Origin::Builtin,
                    rule: Arc::new(rule),
                };
                (name.to_string(), entry)
            })
            .collect();

        Self {
            rules,
            aliases: HashMap::new(),
            struct_rules: HashMap::new(),
        }
    }

    pub(crate) fn register_rule(
        &mut self,
        name: &str,
        identity: TypeId,
        rule: Arc<RuleFn>,
    ) -> Result<()> {
        check_name(name)?;
        if self.aliases.contains_key(name) {
            return Err(duplicate(name));
        }

        match self.rules.get(name) {
            Some(existing) if existing.origin == Origin::Custom(identity) => {
                log::debug!("Rule '{}' re-registered with the same implementation", name);
                Ok(())
            }
            Some(_) => Err(duplicate(name)),
            None => {
                log::debug!("Registered rule '{}'", name);
                self.rules.insert(
                    name.to_string(),
                    RuleEntry {
                        origin: Origin::Custom(identity),
                        rule,
                    },
                );
                Ok(())
            }
        }
    }

    pub(crate) fn register_alias(&mut self, name: &str, expansion: &str) -> Result<()> {
        check_name(name)?;
        if self.rules.contains_key(name) {
            return Err(duplicate(name));
        }
        if let Some(existing) = self.aliases.get(name) {
            return if existing.expression == expansion {
                Ok(())
            } else {
                Err(duplicate(name))
            };
        }

        let rules = FieldRules::parse(expansion)?;
        if rules.dive.is_some() || rules.omit_empty || rules.skip {
            return Err(
                ParseError::new(expansion, 0, "alias expansions cannot contain directives").into(),
            );
        }
        if rules.slots.is_empty() {
            return Err(ParseError::new(expansion, 0, "alias expansion is empty").into());
        }

        self.aliases.insert(
            name.to_string(),
            Alias {
                expression: expansion.to_string(),
                rules,
            },
        );

        // Any new cycle has to pass through the alias just added.
        if let Some(cycle) = self.find_cycle(name) {
            self.aliases.remove(name);
            return Err(Error::CyclicAlias {
                name: name.to_string(),
                cycle,
            });
        }

        for referenced in self.aliases[name].rules.rule_names() {
            if self.resolve(referenced).is_none() {
                log::warn!(
                    "Alias '{}' references '{}', which is not registered yet",
                    name,
                    referenced
                );
            }
        }
        log::debug!("Registered alias '{}' = '{}'", name, expansion);
        Ok(())
    }

    pub(crate) fn register_struct_rule(
        &mut self,
        type_id: TypeId,
        type_name: &str,
        rule: Box<StructRuleFn>,
    ) {
        log::debug!("Registered struct rule for {}", type_name);
        self.struct_rules.entry(type_id).or_default().push(rule);
    }

    pub(crate) fn rule(&self, name: &str) -> Option<&RuleFn> {
        self.rules.get(name).map(|entry| entry.rule.as_ref())
    }

    pub(crate) fn resolve(&self, name: &str) -> Option<Resolved<'_>> {
        if let Some(alias) = self.aliases.get(name) {
            return Some(Resolved::Alias(&alias.rules));
        }
        self.rule(name).map(Resolved::Rule)
    }

    pub(crate) fn struct_rules(&self, type_id: TypeId) -> &[Box<StructRuleFn>] {
        self.struct_rules.get(&type_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace aliases by their expansions and check every name resolves
    pub(crate) fn expand(&self, slots: &[Slot], path: &str) -> Result<Vec<Slot>> {
        let mut expanded = Vec::with_capacity(slots.len());
        for slot in slots {
            self.expand_slot(slot, path, &mut expanded)?;
        }
        Ok(expanded)
    }

    /// Resolve every slot at every depth of `rules` without evaluating anything
    pub(crate) fn verify(&self, rules: &FieldRules, path: &str) -> Result<()> {
        self.expand(&rules.slots, path)?;
        if let Some(dive) = &rules.dive {
            if let Some(keys) = &dive.keys {
                self.verify(keys, path)?;
            }
            self.verify(&dive.elements, path)?;
        }
        Ok(())
    }

    fn expand_slot(&self, slot: &Slot, path: &str, out: &mut Vec<Slot>) -> Result<()> {
        match slot {
            Slot::Single(spec) => match self.resolve(&spec.name) {
                Some(Resolved::Alias(rules)) => {
                    if spec.param.is_some() {
                        return Err(Error::invalid_parameter(
                            &spec.name,
                            spec.param(),
                            "aliases take no parameter",
                        ));
                    }
                    for inner in &rules.slots {
                        self.expand_slot(inner, path, out)?;
                    }
                    Ok(())
                }
                Some(Resolved::Rule(_)) => {
                    out.push(slot.clone());
                    Ok(())
                }
                None => Err(unresolved(&spec.name, path)),
            },
            Slot::AnyOf(specs) => {
                let mut alternatives = Vec::with_capacity(specs.len());
                for spec in specs {
                    let Some(alias) = self.aliases.get(&spec.name) else {
                        self.ensure_rule(&spec.name, path)?;
                        alternatives.push(spec.clone());
                        continue;
                    };

                    let mut inner = Vec::new();
                    self.expand_slot(&Slot::Single(spec.clone()), path, &mut inner)?;
                    match inner.as_slice() {
                        [single] => alternatives.extend(single.specs().iter().cloned()),
                        _ => {
                            return Err(ParseError::new(
                                alias.expression.as_str(),
                                0,
                                format!(
                                    "alias '{}' is used in an OR group but expands to {} rules",
                                    spec.name,
                                    inner.len()
                                ),
                            )
                            .into())
                        }
                    }
                }
                out.push(Slot::AnyOf(alternatives));
                Ok(())
            }
        }
    }

    fn ensure_rule(&self, name: &str, path: &str) -> Result<()> {
        if self.rules.contains_key(name) {
            Ok(())
        } else {
            Err(unresolved(name, path))
        }
    }

    /// Alias chain from `start` back to itself, if there is one
    fn find_cycle(&self, start: &str) -> Option<Vec<String>> {
        let mut trail = vec![start.to_string()];
        if self.visit(start, start, &mut trail) {
            Some(trail)
        } else {
            None
        }
    }

    fn visit(&self, current: &str, start: &str, trail: &mut Vec<String>) -> bool {
        let Some(alias) = self.aliases.get(current) else {
            return false;
        };

        for spec in alias.rules.slots.iter().flat_map(Slot::specs) {
            if spec.name == start {
                trail.push(spec.name.clone());
                return true;
            }
            // Cycles not through `start` were rejected when they were registered.
            if trail.iter().any(|seen| *seen == spec.name) {
                continue;
            }
            trail.push(spec.name.clone());
            if self.visit(&spec.name, start, trail) {
                return true;
            }
            trail.pop();
        }
        false
    }
}

fn duplicate(name: &str) -> Error {
    Error::DuplicateRule {
        name: name.to_string(),
    }
}

fn unresolved(name: &str, path: &str) -> Error {
    Error::UnresolvedRuleName {
        name: name.to_string(),
        path: path.to_string(),
    }
}

fn check_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidRuleName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if DIRECTIVES.contains(&name) {
        return Err(invalid("name is reserved for a directive"));
    }
    if name.chars().any(|c| matches!(c, ',' | '|' | '=') || c.is_whitespace()) {
        return Err(invalid("name contains a separator or whitespace"));
    }
    Ok(())
}
