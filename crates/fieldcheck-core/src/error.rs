//! Error types for the fieldcheck core library
//!
//! Everything in this module is a *configuration* error: a mistake in how
//! rules were registered or written, surfaced to the programmer. Data that
//! simply fails its rules is never reported here; it ends up as entries of a
//! [`ValidationErrors`](crate::ValidationErrors) set instead.
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use crate::expr::ParseError;
use thiserror::Error;

/// Main error type for fieldcheck operations
#[derive(Error, Debug)]
pub enum Error {
    /// A rule name is already bound to a different implementation
    #[error("Rule '{name}' is already registered with a different implementation")]
    DuplicateRule { name: String },

    /// Alias expansion would never terminate
    #[error("Alias '{name}' expands cyclically: {}", cycle.join(" -> "))]
    CyclicAlias { name: String, cycle: Vec<String> },

    /// A rule expression references a name that is neither a rule nor an alias
    #[error("Unresolved rule name '{name}' at '{path}'")]
    UnresolvedRuleName { name: String, path: String },

    /// A rule was applied to a value of a kind it cannot handle
    #[error("Type mismatch: rule '{rule}' expects {expected}, found {found} at '{path}'")]
    TypeMismatch {
        rule: String,
        expected: String,
        found: String,
        path: String,
    },

    /// A rule parameter could not be interpreted
    #[error("Invalid parameter '{param}' for rule '{rule}': {message}")]
    InvalidParameter {
        rule: String,
        param: String,
        message: String,
    },

    /// Malformed rule expression
    #[error(transparent)]
    InvalidExpression(#[from] ParseError),

    /// A name that can never be used as a rule or alias name
    #[error("Invalid rule name '{name}': {reason}")]
    InvalidRuleName { name: String, reason: String },

    /// A cross-field rule referenced a field the enclosing struct does not declare
    #[error("Unknown field '{field}' referenced by rule '{rule}' on {type_name}")]
    UnknownField {
        rule: String,
        field: String,
        type_name: String,
    },

    /// A custom rule failed or panicked while executing
    #[error("Rule '{rule}' failed to execute: {message}")]
    RuleExecution {
        rule: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The value handed to a validation entry point cannot be validated that way
    #[error("Invalid validation target: {message}")]
    InvalidTarget { message: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a failure raised inside a custom rule implementation
    pub fn rule_execution<R, E>(rule: R, err: E) -> Self
    where
        R: Into<String>,
        E: Into<anyhow::Error>,
    {
        let source = err.into();
        Error::RuleExecution {
            rule: rule.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    pub(crate) fn invalid_parameter<R, P, M>(rule: R, param: P, message: M) -> Self
    where
        R: Into<String>,
        P: Into<String>,
        M: Into<String>,
    {
        Error::InvalidParameter {
            rule: rule.into(),
            param: param.into(),
            message: message.into(),
        }
    }

    pub(crate) fn type_mismatch<R, E, F, P>(rule: R, expected: E, found: F, path: P) -> Self
    where
        R: Into<String>,
        E: Into<String>,
        F: Into<String>,
        P: Into<String>,
    {
        Error::TypeMismatch {
            rule: rule.into(),
            expected: expected.into(),
            found: found.into(),
            path: path.into(),
        }
    }
}
