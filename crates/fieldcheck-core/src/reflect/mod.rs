//! Value reflection
//!
//! The traversal engine never knows concrete types. Every validated value
//! implements [`Reflect`], which classifies it into a [`Shape`]: a scalar, a
//! struct exposing its fields, a sequence, a mapping, an optional, or an
//! opaque value carrying no rule metadata.
//!
//! Structs implement [`Structure`] once per type, normally through
//! `#[derive(Validate)]`. A hand-written implementation looks like this:
//!
//! ```
//! use fieldcheck_core::{Field, Reflect, RuleSource, Shape, Structure};
//! use std::any::Any;
//!
//! struct Login {
//!     username: String,
//!     password: String,
//! }
//!
//! static USERNAME: RuleSource = RuleSource::new("required,email");
//! static PASSWORD: RuleSource = RuleSource::new("required,min=5");
//!
//! impl Reflect for Login {
//!     fn shape(&self) -> Shape<'_> {
//!         Shape::Struct(self)
//!     }
//! }
//!
//! impl Structure for Login {
//!     fn type_name(&self) -> &'static str {
//!         "Login"
//!     }
//!
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("username", &USERNAME, &self.username),
//!             Field::new("password", &PASSWORD, &self.password),
//!         ]
//!     }
//!
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//! ```
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

pub mod compare;
mod impls;
mod json;

pub use compare::{deep_eq, is_empty};

use crate::expr::RuleSource;
use std::any::Any;
use std::fmt;

/// A leaf value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(&'a str),
}

impl<'a> Scalar<'a> {
    /// Kind name used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "integer",
            Scalar::Uint(_) => "unsigned integer",
            Scalar::Float(_) => "float",
            Scalar::Str(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Scalar::Int(_) | Scalar::Uint(_) | Scalar::Float(_))
    }

    /// True for the zero value of the scalar's type
    pub fn is_zero(&self) -> bool {
        match self {
            Scalar::Bool(b) => !b,
            Scalar::Int(i) => *i == 0,
            Scalar::Uint(u) => *u == 0,
            Scalar::Float(f) => *f == 0.0,
            Scalar::Str(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Uint(u) => write!(f, "{}", u),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Classification of a runtime value
pub enum Shape<'a> {
    Scalar(Scalar<'a>),
    Struct(&'a dyn Structure),
    Sequence(Vec<&'a dyn Reflect>),
    Mapping(Vec<(&'a dyn Reflect, &'a dyn Reflect)>),
    /// Optional value: `None` means absent
    Nullable(Option<&'a dyn Reflect>),
    /// No rule metadata and not composite; validated as always present
    Opaque,
}

impl Shape<'_> {
    /// Kind name used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Scalar(scalar) => scalar.kind(),
            Shape::Struct(_) => "struct",
            Shape::Sequence(_) => "sequence",
            Shape::Mapping(_) => "mapping",
            Shape::Nullable(_) => "optional",
            Shape::Opaque => "opaque value",
        }
    }
}

impl fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar(scalar) => write!(f, "Scalar({:?})", scalar),
            Shape::Struct(s) => write!(f, "Struct({})", s.type_name()),
            Shape::Sequence(items) => write!(f, "Sequence(len={})", items.len()),
            Shape::Mapping(entries) => write!(f, "Mapping(len={})", entries.len()),
            Shape::Nullable(inner) => write!(f, "Nullable(present={})", inner.is_some()),
            Shape::Opaque => write!(f, "Opaque"),
        }
    }
}

/// Runtime shape inspection
pub trait Reflect {
    fn shape(&self) -> Shape<'_>;
}

/// Field enumeration for one struct type
pub trait Structure: Reflect + Any {
    /// Type name used as the root path segment when configured
    fn type_name(&self) -> &'static str;

    /// Fields taking part in validation, in declaration order
    fn fields(&self) -> Vec<Field<'_>>;

    /// Look a field up by its declared name
    fn field(&self, name: &str) -> Option<Field<'_>> {
        self.fields().into_iter().find(|field| field.name == name)
    }

    fn as_any(&self) -> &dyn Any;
}

/// One struct field together with its rule expression
#[derive(Clone, Copy)]
pub struct Field<'a> {
    /// Declared field name
    pub name: &'static str,
    /// Name used in error paths when display names are configured
    pub display_name: &'static str,
    pub rules: &'static RuleSource,
    pub value: &'a dyn Reflect,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, rules: &'static RuleSource, value: &'a dyn Reflect) -> Self {
        Self {
            name,
            display_name: name,
            rules,
            value,
        }
    }

    pub fn with_display_name(mut self, display_name: &'static str) -> Self {
        self.display_name = display_name;
        self
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("rules", &self.rules.expression())
            .field("shape", &self.value.shape())
            .finish()
    }
}
