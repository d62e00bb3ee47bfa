//! Fieldcheck Derive - `#[derive(Validate)]` for struct field bindings
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use proc_macro::TokenStream;

use syn::{parse_macro_input, DeriveInput};

mod attr;
mod expand;

/// Derive `Reflect` and `Structure` so a struct can be validated
///
/// Only fields carrying a `#[validate]` attribute take part in validation,
/// and only those can be named by cross-field rules such as `eqfield`. A
/// bare `#[validate]` makes a field a comparison target without giving it
/// rules of its own.
///
/// # Example
///
/// ```ignore
/// use fieldcheck_core::Validate;
///
/// #[derive(Validate)]
/// struct RegisterRequest {
///     #[validate("required,email")]
///     email: String,
///
///     #[validate(rules = "required,min=5", name = "Password")]
///     password: String,
///
///     #[validate("eqfield=password")]
///     confirm_password: String,
///
///     // Compared against, never checked itself
///     #[validate]
///     recovery_email: String,
///
///     #[validate("omitempty,nefield=recovery_email")]
///     backup_email: String,
///
///     // Descended into without rules of its own
///     #[validate]
///     address: Address,
///
///     // Not validated
///     nickname: String,
/// }
/// ```
///
/// # Attribute forms
///
/// - `#[validate]` - no rules; nested structs are still validated and the field is visible to
///   cross-field rules
/// - `#[validate("expr")]` - rule expression
/// - `#[validate(rules = "expr", name = "Display Name")]` - rules plus the name used in error paths
///
#[proc_macro_derive(Validate, attributes(validate))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::impl_validate(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
