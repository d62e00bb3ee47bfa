//! Code generation for `#[derive(Validate)]`
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{parse_quote, Data, DeriveInput, Fields, GenericParam};

use crate::attr::extract_field_attr;

pub fn impl_validate(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let type_name = name.unraw().to_string();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Validate only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Validate only supports structs",
            ))
        }
    };

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Validate cannot be derived for structs with lifetime parameters",
        ));
    }

    let mut statics = Vec::new();
    let mut entries = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let Some(binding) = extract_field_attr(&field.attrs)? else {
            continue;
        };
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };

        let declared = ident.unraw().to_string();
        let display = binding.name.unwrap_or_else(|| declared.clone());
        let rules = binding.rules;
        let source = format_ident!("__FIELDCHECK_RULES_{}", index);

        statics.push(quote! {
            static #source: ::fieldcheck_core::RuleSource =
                ::fieldcheck_core::RuleSource::new(#rules);
        });
        entries.push(quote! {
            ::fieldcheck_core::Field::new(#declared, &#source, &self.#ident)
                .with_display_name(#display)
        });
    }

    // Every type parameter has to be reflectable and 'static for `Structure: Any`.
    let mut generics = input.generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(param) = param {
            param.bounds.push(parse_quote!(::fieldcheck_core::Reflect));
            param.bounds.push(parse_quote!('static));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::fieldcheck_core::Reflect for #name #ty_generics #where_clause {
            fn shape(&self) -> ::fieldcheck_core::Shape<'_> {
                ::fieldcheck_core::Shape::Struct(self)
            }
        }

        impl #impl_generics ::fieldcheck_core::Structure for #name #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn fields(&self) -> ::std::vec::Vec<::fieldcheck_core::Field<'_>> {
                #(#statics)*
                ::std::vec![#(#entries),*]
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    })
}
