//! Fieldcheck Core - Declarative rule-based validation
//!
//! Validation rules are attached to values as short text expressions such as
//! `required,min=5` or `required,dive,email`. A [`Validator`] walks a value
//! graph, evaluates every rule, and collects every failure into a
//! [`ValidationErrors`] set instead of stopping at the first one.
//!
//! # Main Components
//!
//! - **Rule expressions**: parsed once into [`FieldRules`]
//! - **Registry**: built-in rules, custom rules, aliases and struct-level rules
//! - **Reflection**: the [`Reflect`] and [`Structure`] traits, derived with `#[derive(Validate)]`
//! - **Traversal**: depth-first walk through structs, sequences and mappings
//! - **Error Handling**: configuration problems are [`Error`]s; data failures are
//!   [`ValidationErrors`]
//!
//! # Example
//!
//! ```
//! use fieldcheck_core::{Result, Validate, Validator};
//!
//! #[derive(Validate)]
//! struct LoginRequest {
//!     #[validate("required,email")]
//!     username: String,
//!     #[validate("required,min=5")]
//!     password: String,
//! }
//!
//! fn example() -> Result<()> {
//!     let validator = Validator::new();
//!     let request = LoginRequest {
//!         username: "taufik".to_string(),
//!         password: "".to_string(),
//!     };
//!
//!     let errors = validator.validate_struct(&request)?;
//!     assert_eq!(errors.len(), 2);
//!     assert_eq!(errors.errors()[0].rule, "email");
//!     assert_eq!(errors.errors()[1].rule, "required");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

// Lets derived code refer to `::fieldcheck_core` from inside this crate.
extern crate self as fieldcheck_core;

pub mod config;
pub mod error;
pub mod expr;
pub mod reflect;
mod registry;
pub mod report;
pub mod rules;
pub mod validator;

// Re-export main types for convenience
pub use config::{FieldNames, ValidatorConfig};
pub use error::{Error, Result};
pub use expr::{Dive, FieldRules, ParseError, RuleSource, RuleSpec, Slot};
pub use reflect::{deep_eq, is_empty, Field, Reflect, Scalar, Shape, Structure};
pub use report::{ValidationError, ValidationErrors};
pub use rules::{FieldLevel, RuleFn};
pub use validator::{StructLevel, Validator};

#[cfg(feature = "derive")]
pub use fieldcheck_derive::Validate;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
