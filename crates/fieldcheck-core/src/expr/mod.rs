//! Rule expression language
//!
//! Expressions are the configuration surface of the engine:
//! comma-separated rules, `=` for a parameter, `|` for alternatives, and the
//! reserved directives `dive`, `keys`, `endkeys`, `omitempty` and `-`.
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::{Dive, FieldRules, RuleSource, RuleSpec, Slot, DIRECTIVES};
pub use error::ParseError;
pub use parser::Parser;
