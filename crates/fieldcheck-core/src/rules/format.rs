//! Pattern-based string rules
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use super::FieldLevel;
use crate::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

type Pattern = OnceLock<std::result::Result<Regex, regex::Error>>;

static EMAIL_REGEX: Pattern = OnceLock::new();
static NUMERIC_REGEX: Pattern = OnceLock::new();
static NUMBER_REGEX: Pattern = OnceLock::new();
static ALPHA_REGEX: Pattern = OnceLock::new();
static ALPHANUM_REGEX: Pattern = OnceLock::new();

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";
const NUMERIC_PATTERN: &str = r"^[-+]?[0-9]+(?:\.[0-9]+)?$";
const NUMBER_PATTERN: &str = r"^[0-9]+$";
const ALPHA_PATTERN: &str = r"^[a-zA-Z]+$";
const ALPHANUM_PATTERN: &str = r"^[a-zA-Z0-9]+$";

fn matches(fl: &FieldLevel<'_>, cell: &'static Pattern, source: &str, text: &str) -> Result<bool> {
    match cell.get_or_init(|| Regex::new(source)) {
        Ok(regex) => Ok(regex.is_match(text)),
        Err(err) => Err(Error::rule_execution(fl.rule(), err.clone())),
    }
}

fn string_only<'a>(fl: &FieldLevel<'a>) -> Result<&'a str> {
    fl.as_str().ok_or_else(|| fl.mismatch("a string"))
}

pub(crate) fn email(fl: &FieldLevel<'_>) -> Result<bool> {
    let text = string_only(fl)?;
    matches(fl, &EMAIL_REGEX, EMAIL_PATTERN, text)
}

/// Signed decimal text; numeric values always pass
pub(crate) fn numeric(fl: &FieldLevel<'_>) -> Result<bool> {
    match fl.scalar() {
        Some(scalar) if scalar.is_numeric() => Ok(true),
        Some(scalar) => match scalar.as_str() {
            Some(text) => matches(fl, &NUMERIC_REGEX, NUMERIC_PATTERN, text),
            None => Err(fl.mismatch("a string or number")),
        },
        None => Err(fl.mismatch("a string or number")),
    }
}

/// Unsigned digits only; numeric values always pass
pub(crate) fn number(fl: &FieldLevel<'_>) -> Result<bool> {
    match fl.scalar() {
        Some(scalar) if scalar.is_numeric() => Ok(true),
        Some(scalar) => match scalar.as_str() {
            Some(text) => matches(fl, &NUMBER_REGEX, NUMBER_PATTERN, text),
            None => Err(fl.mismatch("a string or number")),
        },
        None => Err(fl.mismatch("a string or number")),
    }
}

pub(crate) fn alpha(fl: &FieldLevel<'_>) -> Result<bool> {
    let text = string_only(fl)?;
    matches(fl, &ALPHA_REGEX, ALPHA_PATTERN, text)
}

pub(crate) fn alphanum(fl: &FieldLevel<'_>) -> Result<bool> {
    let text = string_only(fl)?;
    matches(fl, &ALPHANUM_REGEX, ALPHANUM_PATTERN, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::check;

    #[test]
    fn test_email() {
        assert!(check(email, "email", "", &"taufik@gmail.com").unwrap());
        assert!(check(email, "email", "", &"akuutauf@email.com").unwrap());
        assert!(!check(email, "email", "", &"taufik").unwrap());
        assert!(!check(email, "email", "", &"taufik@").unwrap());
        assert!(!check(email, "email", "", &"").unwrap());
    }

    #[test]
    fn test_email_rejects_non_strings() {
        assert!(matches!(
            check(email, "email", "", &42u32),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_numeric() {
        assert!(check(numeric, "numeric", "", &"089999999999").unwrap());
        assert!(check(numeric, "numeric", "", &"-12.5").unwrap());
        assert!(check(numeric, "numeric", "", &3.25f64).unwrap());
        assert!(!check(numeric, "numeric", "", &"12a").unwrap());
        assert!(!check(numeric, "numeric", "", &"1.").unwrap());
        assert!(check(numeric, "numeric", "", &true).is_err());
    }

    #[test]
    fn test_number() {
        assert!(check(number, "number", "", &"123456").unwrap());
        assert!(!check(number, "number", "", &"-1").unwrap());
        assert!(!check(number, "number", "", &"1.5").unwrap());
        assert!(check(number, "number", "", &7u8).unwrap());
    }

    #[test]
    fn test_alpha_and_alphanum() {
        assert!(check(alpha, "alpha", "", &"Taufik").unwrap());
        assert!(!check(alpha, "alpha", "", &"Taufik1").unwrap());
        assert!(check(alphanum, "alphanum", "", &"Taufik1").unwrap());
        assert!(!check(alphanum, "alphanum", "", &"Tau fik").unwrap());
    }
}
