//! Parsing of `#[validate(...)]` field attributes
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use syn::{Attribute, LitStr, Meta};

/// Rule binding of one field
#[derive(Debug, Default)]
pub struct FieldAttr {
    /// Rule expression, empty for a bare `#[validate]`
    pub rules: String,
    /// Name used in error paths, if overridden
    pub name: Option<String>,
}

/// Extract the `#[validate]` binding of a field; `None` when it has none
pub fn extract_field_attr(attrs: &[Attribute]) -> syn::Result<Option<FieldAttr>> {
    let mut found: Option<FieldAttr> = None;

    for attr in attrs {
        if !attr.path().is_ident("validate") {
            continue;
        }
        if found.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "duplicate #[validate] attribute; combine the rules into one expression",
            ));
        }
        found = Some(parse_attr(attr)?);
    }

    Ok(found)
}

fn parse_attr(attr: &Attribute) -> syn::Result<FieldAttr> {
    let list = match &attr.meta {
        Meta::Path(_) => return Ok(FieldAttr::default()),
        Meta::List(list) => list,
        Meta::NameValue(meta) => {
            return Err(syn::Error::new_spanned(
                meta,
                "expected #[validate(\"rules\")] or #[validate(rules = \"...\")]",
            ))
        }
    };

    // #[validate("required,min=5")]
    if let Ok(expr) = syn::parse2::<LitStr>(list.tokens.clone()) {
        return Ok(FieldAttr {
            rules: expr.value(),
            name: None,
        });
    }

    let mut field = FieldAttr::default();
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("rules") {
            let value: LitStr = meta.value()?.parse()?;
            field.rules = value.value();
            Ok(())
        } else if meta.path.is_ident("name") {
            let value: LitStr = meta.value()?.parse()?;
            if value.value().is_empty() {
                return Err(syn::Error::new_spanned(value, "display name cannot be empty"));
            }
            field.name = Some(value.value());
            Ok(())
        } else {
            Err(meta.error("unsupported validate option, expected `rules` or `name`"))
        }
    })?;

    Ok(field)
}
