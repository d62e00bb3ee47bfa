//! Built-in rules
//!
//! Size rules (`min`, `max`, `len`, `gt`, `gte`, `lt`, `lte`) measure
//! strings in characters and collections by length, and compare numbers
//! numerically. The parameter is parsed to match the measured kind; a
//! parameter that does not parse is a configuration error.
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use super::{format, FieldLevel};
use crate::reflect::compare::Number;
use crate::reflect::{deep_eq, is_empty, Reflect, Scalar, Shape};
use crate::{Error, Result};
use std::cmp::Ordering;

/// Signature shared by every built-in rule
pub(crate) type BuiltinRule = fn(&FieldLevel<'_>) -> Result<bool>;

/// Names and implementations of all built-in rules
pub(crate) const BUILTIN_RULES: &[(&str, BuiltinRule)] = &[
    ("required", required),
    ("min", min),
    ("max", max),
    ("len", len),
    ("eq", eq),
    ("ne", ne),
    ("gt", gt),
    ("gte", gte),
    ("lt", lt),
    ("lte", lte),
    ("oneof", oneof),
    ("email", format::email),
    ("numeric", format::numeric),
    ("number", format::number),
    ("alpha", format::alpha),
    ("alphanum", format::alphanum),
    ("eqfield", eqfield),
    ("nefield", nefield),
];

fn required(fl: &FieldLevel<'_>) -> Result<bool> {
    Ok(!is_empty(fl.value, fl.config.required_struct))
}

/// What a size rule compares against its parameter
enum Measure {
    Length(usize),
    Value(Number),
}

fn measure(fl: &FieldLevel<'_>) -> Result<Measure> {
    match fl.shape() {
        Shape::Scalar(Scalar::Str(text)) => Ok(Measure::Length(text.chars().count())),
        Shape::Scalar(scalar) => match Number::from_scalar(&scalar) {
            Some(number) => Ok(Measure::Value(number)),
            None => Err(fl.mismatch("a string, number or collection")),
        },
        Shape::Sequence(items) => Ok(Measure::Length(items.len())),
        Shape::Mapping(entries) => Ok(Measure::Length(entries.len())),
        _ => Err(fl.mismatch("a string, number or collection")),
    }
}

/// Parse `token` as a bound comparable with `measure`
fn bound(fl: &FieldLevel<'_>, measure: &Measure, token: &str) -> Result<Number> {
    let invalid = |message: String| Error::invalid_parameter(fl.rule, token, message);

    match measure {
        Measure::Length(_) => token
            .parse::<usize>()
            .map(|n| Number::Integer(n as i128))
            .map_err(|err| invalid(format!("expected a non-negative length: {}", err))),
        Measure::Value(Number::Integer(_)) => token
            .parse::<i128>()
            .map(Number::Integer)
            .map_err(|err| invalid(format!("expected an integer: {}", err))),
        Measure::Value(Number::Float(_)) => token
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|err| invalid(format!("expected a number: {}", err))),
    }
}

fn ordering(fl: &FieldLevel<'_>) -> Result<Option<Ordering>> {
    let measured = measure(fl)?;
    let limit = bound(fl, &measured, fl.param)?;
    let value = match measured {
        Measure::Length(n) => Number::Integer(n as i128),
        Measure::Value(number) => number,
    };
    Ok(value.compare(limit))
}

fn min(fl: &FieldLevel<'_>) -> Result<bool> {
    Ok(matches!(ordering(fl)?, Some(Ordering::Greater | Ordering::Equal)))
}

fn max(fl: &FieldLevel<'_>) -> Result<bool> {
    Ok(matches!(ordering(fl)?, Some(Ordering::Less | Ordering::Equal)))
}

fn len(fl: &FieldLevel<'_>) -> Result<bool> {
    Ok(ordering(fl)? == Some(Ordering::Equal))
}

fn gt(fl: &FieldLevel<'_>) -> Result<bool> {
    Ok(ordering(fl)? == Some(Ordering::Greater))
}

fn gte(fl: &FieldLevel<'_>) -> Result<bool> {
    min(fl)
}

fn lt(fl: &FieldLevel<'_>) -> Result<bool> {
    Ok(ordering(fl)? == Some(Ordering::Less))
}

fn lte(fl: &FieldLevel<'_>) -> Result<bool> {
    max(fl)
}

/// Strings and booleans compare by value, everything else like `len`
fn eq(fl: &FieldLevel<'_>) -> Result<bool> {
    match fl.scalar() {
        Some(Scalar::Str(text)) => Ok(text == fl.param),
        Some(Scalar::Bool(b)) => Ok(b == fl.param_as::<bool>()?),
        _ => len(fl),
    }
}

fn ne(fl: &FieldLevel<'_>) -> Result<bool> {
    match fl.scalar() {
        Some(Scalar::Str(text)) => Ok(text != fl.param),
        Some(Scalar::Bool(b)) => Ok(b != fl.param_as::<bool>()?),
        _ => Ok(ordering(fl)? != Some(Ordering::Equal)),
    }
}

/// Space-separated list of allowed values
fn oneof(fl: &FieldLevel<'_>) -> Result<bool> {
    match fl.scalar() {
        Some(Scalar::Str(text)) => Ok(fl.param.split_whitespace().any(|choice| choice == text)),
        Some(scalar) => {
            let value = Number::from_scalar(&scalar)
                .ok_or_else(|| fl.mismatch("a string or number"))?;
            let measured = Measure::Value(value);
            for choice in fl.param.split_whitespace() {
                if value.compare(bound(fl, &measured, choice)?) == Some(Ordering::Equal) {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        None => Err(fl.mismatch("a string or number")),
    }
}

/// Comparison target: the named sibling, else the second value of a pair
fn cross_field_target<'a>(fl: &FieldLevel<'a>) -> Result<&'a dyn Reflect> {
    if !fl.param.is_empty() {
        return fl.sibling(fl.param);
    }
    fl.other.ok_or_else(|| {
        Error::invalid_parameter(
            fl.rule,
            fl.param,
            "expected a field name, or a second value to compare against",
        )
    })
}

fn eqfield(fl: &FieldLevel<'_>) -> Result<bool> {
    let target = cross_field_target(fl)?;
    Ok(deep_eq(fl.value, target))
}

fn nefield(fl: &FieldLevel<'_>) -> Result<bool> {
    let target = cross_field_target(fl)?;
    Ok(!deep_eq(fl.value, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::check;
    use std::collections::HashMap;

    #[test]
    fn test_required() {
        assert!(check(required, "required", "", &"taufik").unwrap());
        assert!(!check(required, "required", "", &"").unwrap());
        assert!(!check(required, "required", "", &0i64).unwrap());
        assert!(!check(required, "required", "", &Vec::<u8>::new()).unwrap());
        assert!(!check(required, "required", "", &None::<String>).unwrap());
    }

    #[test]
    fn test_min_max_on_strings_count_characters() {
        assert!(check(min, "min", "5", &"taufik").unwrap());
        assert!(!check(min, "min", "5", &"tauf").unwrap());
        assert!(check(max, "max", "3", &"äöü").unwrap());
        assert!(!check(max, "max", "2", &"äöü").unwrap());
    }

    #[test]
    fn test_size_rules_on_numbers() {
        assert!(check(gt, "gt", "1000", &1001i64).unwrap());
        assert!(!check(gt, "gt", "1000", &1000i64).unwrap());
        assert!(check(gte, "gte", "1000", &1000u32).unwrap());
        assert!(check(lt, "lt", "0.5", &0.25f64).unwrap());
        assert!(check(lte, "lte", "10", &-3i8).unwrap());
        assert!(check(len, "len", "7", &7u16).unwrap());
    }

    #[test]
    fn test_size_rules_on_collections() {
        let mut schools = HashMap::new();
        schools.insert("SD".to_string(), "SD Indonesia".to_string());
        assert!(check(min, "min", "1", &schools).unwrap());
        assert!(!check(min, "min", "1", &Vec::<String>::new()).unwrap());
        assert!(check(len, "len", "2", &vec![1, 2]).unwrap());
    }

    #[test]
    fn test_invalid_parameter() {
        assert!(matches!(
            check(min, "min", "abc", &"taufik"),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(matches!(
            check(gt, "gt", "1.5", &3i32),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(matches!(
            check(max, "max", "", &"x"),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_size_rules_reject_booleans() {
        assert!(matches!(
            check(min, "min", "1", &true),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_eq_and_ne() {
        assert!(check(eq, "eq", "admin", &"admin").unwrap());
        assert!(!check(eq, "eq", "admin", &"root").unwrap());
        assert!(check(eq, "eq", "true", &true).unwrap());
        assert!(check(eq, "eq", "3", &3u8).unwrap());
        assert!(check(ne, "ne", "admin", &"root").unwrap());
        assert!(check(ne, "ne", "2", &vec![1]).unwrap());
    }

    #[test]
    fn test_oneof() {
        assert!(check(oneof, "oneof", "red green blue", &"green").unwrap());
        assert!(!check(oneof, "oneof", "red green blue", &"gre").unwrap());
        assert!(check(oneof, "oneof", "1 2 3", &2i32).unwrap());
        assert!(!check(oneof, "oneof", "1 2 3", &4i32).unwrap());
        assert!(matches!(
            check(oneof, "oneof", "1 x", &4i32),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_eqfield_without_target_is_configuration_error() {
        assert!(matches!(
            check(eqfield, "eqfield", "", &"secret"),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(matches!(
            check(eqfield, "eqfield", "Password", &"secret"),
            Err(Error::UnknownField { .. })
        ));
    }

    #[test]
    fn test_builtin_names_are_unique() {
        let mut names: Vec<&str> = BUILTIN_RULES.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BUILTIN_RULES.len());
    }
}
