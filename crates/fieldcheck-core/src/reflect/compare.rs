//! Emptiness and equality over reflected values
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use super::{Reflect, Scalar, Shape};
use std::cmp::Ordering;

/// A numeric scalar widened for comparison across integer kinds
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Integer(i128),
    Float(f64),
}

impl Number {
    pub(crate) fn from_scalar(scalar: &Scalar<'_>) -> Option<Self> {
        match *scalar {
            Scalar::Int(i) => Some(Number::Integer(i128::from(i))),
            Scalar::Uint(u) => Some(Number::Integer(i128::from(u))),
            Scalar::Float(f) => Some(Number::Float(f)),
            Scalar::Bool(_) | Scalar::Str(_) => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Number::Integer(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// `None` when either side is NaN
    pub(crate) fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

/// True when the value is the zero representation of its type
///
/// Absent optionals, empty strings and collections, zero numbers and `false`
/// are empty. A struct counts as empty only when `structs_can_be_empty` is set
/// and every one of its fields is empty.
pub fn is_empty(value: &dyn Reflect, structs_can_be_empty: bool) -> bool {
    match value.shape() {
        Shape::Scalar(scalar) => scalar.is_zero(),
        Shape::Sequence(items) => items.is_empty(),
        Shape::Mapping(entries) => entries.is_empty(),
        Shape::Nullable(None) => true,
        Shape::Nullable(Some(inner)) => is_empty(inner, structs_can_be_empty),
        Shape::Struct(structure) => {
            structs_can_be_empty
                && structure
                    .fields()
                    .iter()
                    .all(|field| is_empty(field.value, true))
        }
        Shape::Opaque => false,
    }
}

/// Type-aware structural equality
pub fn deep_eq(left: &dyn Reflect, right: &dyn Reflect) -> bool {
    match (left.shape(), right.shape()) {
        (Shape::Nullable(None), Shape::Nullable(None)) => true,
        (Shape::Nullable(Some(a)), _) => deep_eq(a, right),
        (_, Shape::Nullable(Some(b))) => deep_eq(left, b),
        (Shape::Scalar(a), Shape::Scalar(b)) => scalar_eq(&a, &b),
        (Shape::Sequence(a), Shape::Sequence(b)) => {
            a.len() == b.len() && a.iter().zip(&b).all(|(x, y)| deep_eq(*x, *y))
        }
        (Shape::Mapping(a), Shape::Mapping(b)) => {
            a.len() == b.len()
                && a.iter().all(|(key, value)| {
                    b.iter().any(|(other_key, other_value)| {
                        deep_eq(*key, *other_key) && deep_eq(*value, *other_value)
                    })
                })
        }
        (Shape::Struct(a), Shape::Struct(b)) => {
            if a.as_any().type_id() != b.as_any().type_id() {
                return false;
            }
            let (a, b) = (a.fields(), b.fields());
            a.len() == b.len() && a.iter().zip(&b).all(|(x, y)| deep_eq(x.value, y.value))
        }
        _ => false,
    }
}

fn scalar_eq(a: &Scalar<'_>, b: &Scalar<'_>) -> bool {
    match (a, b) {
        (Scalar::Str(x), Scalar::Str(y)) => x == y,
        (Scalar::Bool(x), Scalar::Bool(y)) => x == y,
        _ => match (Number::from_scalar(a), Number::from_scalar(b)) {
            (Some(x), Some(y)) => x.compare(y) == Some(Ordering::Equal),
            _ => false,
        },
    }
}
