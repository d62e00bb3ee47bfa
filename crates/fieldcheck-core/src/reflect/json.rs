//! `Reflect` for dynamic JSON documents
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use super::{Reflect, Scalar, Shape};
use serde_json::{Number, Value};

impl Reflect for Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            Value::Null => Shape::Nullable(None),
            Value::Bool(b) => Shape::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => n.shape(),
            Value::String(s) => Shape::Scalar(Scalar::Str(s)),
            Value::Array(items) => {
                Shape::Sequence(items.iter().map(|v| v as &dyn Reflect).collect())
            }
            Value::Object(map) => Shape::Mapping(
                map.iter()
                    .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect))
                    .collect(),
            ),
        }
    }
}

impl Reflect for Number {
    fn shape(&self) -> Shape<'_> {
        let scalar = if let Some(u) = self.as_u64() {
            Scalar::Uint(u)
        } else if let Some(i) = self.as_i64() {
            Scalar::Int(i)
        } else {
            Scalar::Float(self.as_f64().unwrap_or(f64::NAN))
        };
        Shape::Scalar(scalar)
    }
}
