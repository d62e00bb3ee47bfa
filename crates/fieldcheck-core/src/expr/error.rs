//! Error type for rule expression parsing
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// A malformed rule expression, with the byte offset where parsing stopped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed rule expression '{expression}' at position {position}: {message}")]
pub struct ParseError {
    /// The full expression being parsed
    pub expression: String,
    /// Zero-based byte offset of the offending token
    pub position: usize,
    /// What went wrong
    pub message: String,
}

impl ParseError {
    /// Create a parse error for the given expression and offset
    pub fn new(expression: impl Into<String>, position: usize, message: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            position,
            message: message.into(),
        }
    }
}
