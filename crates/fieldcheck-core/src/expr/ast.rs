//! Structured form of rule expressions
//!
//! A rule expression such as `required,dive,keys,min=2,endkeys,gt=0` is parsed
//! once into a [`FieldRules`] tree: the slots applying to the value itself,
//! plus an optional [`Dive`] describing what applies to keys and elements.
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use super::error::ParseError;
use super::parser::Parser;
use std::fmt;
use std::sync::OnceLock;

/// Directive descending into sequence elements or mapping entries
pub const DIVE: &str = "dive";
/// Directive opening the key rules of a mapping dive
pub const KEYS: &str = "keys";
/// Directive closing the key rules of a mapping dive
pub const END_KEYS: &str = "endkeys";
/// Directive skipping all rules when the value is empty
pub const OMIT_EMPTY: &str = "omitempty";
/// Directive skipping the field entirely
pub const SKIP: &str = "-";

/// Every token with directive meaning; none of these can name a rule
pub const DIRECTIVES: [&str; 5] = [DIVE, KEYS, END_KEYS, OMIT_EMPTY, SKIP];

/// One atomic rule invocation, e.g. `min` with parameter `5`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub name: String,
    pub param: Option<String>,
}

impl RuleSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param: None,
        }
    }

    pub fn with_param(name: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param: Some(param.into()),
        }
    }

    /// The parameter, or an empty string when none was given
    pub fn param(&self) -> &str {
        self.param.as_deref().unwrap_or("")
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.param {
            Some(param) => write!(f, "{}={}", self.name, param),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A position in a rule list: a single rule or an OR-group of alternatives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Single(RuleSpec),
    AnyOf(Vec<RuleSpec>),
}

impl Slot {
    /// All rule invocations in this slot
    pub fn specs(&self) -> &[RuleSpec] {
        match self {
            Slot::Single(spec) => std::slice::from_ref(spec),
            Slot::AnyOf(specs) => specs,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for spec in self.specs() {
            if !first {
                write!(f, "|")?;
            }
            write!(f, "{}", spec)?;
            first = false;
        }
        Ok(())
    }
}

/// Rules applying to the contents of a collection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dive {
    /// Rules for mapping keys (`keys ... endkeys`)
    pub keys: Option<FieldRules>,
    /// Rules for sequence elements or mapping values
    pub elements: FieldRules,
}

/// Parsed rule expression for one field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldRules {
    /// Slots applying to the value itself, in declaration order
    pub slots: Vec<Slot>,
    /// What applies to elements, if the expression dives
    pub dive: Option<Box<Dive>>,
    /// `omitempty`: skip everything when the value is empty
    pub omit_empty: bool,
    /// `-`: the field is not validated at all
    pub skip: bool,
}

impl FieldRules {
    /// Parse a rule expression
    pub fn parse(expression: &str) -> Result<Self, ParseError> {
        Parser::new(expression).parse()
    }

    /// True when no rule or directive is present at any depth
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty() && self.dive.is_none() && !self.omit_empty && !self.skip
    }

    /// Every rule name referenced at this level and below
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        for slot in &self.slots {
            names.extend(slot.specs().iter().map(|spec| spec.name.as_str()));
        }
        if let Some(dive) = &self.dive {
            if let Some(keys) = &dive.keys {
                keys.collect_names(names);
            }
            dive.elements.collect_names(names);
        }
    }
}

/// A rule expression attached to a struct field, parsed lazily and only once
///
/// `RuleSource::new` is `const`, so bindings declare one `static` per field:
///
/// ```
/// use fieldcheck_core::RuleSource;
///
/// static USERNAME: RuleSource = RuleSource::new("required,email");
/// assert_eq!(USERNAME.rules().unwrap().slots.len(), 2);
/// ```
#[derive(Debug)]
pub struct RuleSource {
    expression: &'static str,
    parsed: OnceLock<Result<FieldRules, ParseError>>,
}

impl RuleSource {
    pub const fn new(expression: &'static str) -> Self {
        Self {
            expression,
            parsed: OnceLock::new(),
        }
    }

    pub fn expression(&self) -> &'static str {
        self.expression
    }

    /// The parsed rules; a malformed expression fails every time it is used
    pub fn rules(&self) -> Result<&FieldRules, ParseError> {
        self.parsed
            .get_or_init(|| FieldRules::parse(self.expression))
            .as_ref()
            .map_err(Clone::clone)
    }
}
