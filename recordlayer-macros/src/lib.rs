//! Procedural macros for the recordlayer project.
//!
//! This crate provides `#[derive(Record)]`, which turns a plain struct into a schema type
//! whose indexed attributes are declared at compile time:
//!
//! ```ignore
//! use recordlayer::prelude::*;
//!
//! #[derive(Debug, Record)]
//! #[record(name = "users")]
//! pub struct User {
//!     #[record(index)]
//!     username: String,
//!     firstname: String,
//!     #[record(index)]
//!     num: u32,
//!     #[record(index)]
//!     email: String,
//! }
//! ```
//!
//! Supported attributes:
//!
//! - `#[record(name = "...")]` on the struct sets `Record::record_name()` (defaults to the
//!   struct name in snake_case).
//! - `#[record(crate = "...")]` on the struct sets the path of the runtime crate (defaults to
//!   `::recordlayer`).
//! - `#[record(index)]` on a field marks it indexed; `#[record(index, name = "...")]` indexes
//!   it under a different attribute name.
//!
//! Indexed fields are cloned and converted with `IndexValue::try_from`, so their types must
//! convert into an `IndexValue`.

#[allow(unused_extern_crates)]
extern crate self as recordlayer_macros;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, Ident, LitStr, Path, ext::IdentExt, parse_macro_input, parse_quote,
};

#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand_record(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

struct RecordOptions {
    name: String,
    krate: Path,
}

struct IndexedField {
    ident: Ident,
    name: String,
}

fn expand_record(input: DeriveInput) -> syn::Result<TokenStream2> {
    let options = record_options(&input)?;
    let indexed = indexed_fields(&input)?;

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let RecordOptions { name: record_name, krate } = options;

    let names = indexed.iter().map(|field| &field.name);
    let arms = indexed.iter().map(|field| {
        let IndexedField { ident, name } = field;

        quote! {
            #name => #krate::value::IndexValue::try_from(::core::clone::Clone::clone(&self.#ident))
                .map_err(|err| #krate::error::RecordStoreError::AttributeAccess {
                    attribute: ::std::string::ToString::to_string(#name),
                    record: ::std::string::ToString::to_string(#record_name),
                    reason: ::std::string::ToString::to_string(&err),
                }),
        }
    });

    Ok(quote! {
        impl #impl_generics #krate::record::Record for #ident #ty_generics #where_clause {
            fn record_name() -> &'static str {
                #record_name
            }

            fn indexed_attributes() -> &'static [&'static str] {
                &[#(#names),*]
            }

            fn index_value(
                &self,
                attribute: &str,
            ) -> #krate::error::RecordStoreResult<#krate::value::IndexValue> {
                match attribute {
                    #(#arms)*
                    _ => ::core::result::Result::Err(
                        #krate::error::RecordStoreError::UnknownAttribute {
                            attribute: ::std::string::ToString::to_string(attribute),
                            record: ::std::string::ToString::to_string(#record_name),
                        },
                    ),
                }
            }
        }
    })
}

fn record_options(input: &DeriveInput) -> syn::Result<RecordOptions> {
    let mut name = None;
    let mut krate: Path = parse_quote!(::recordlayer);

    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                name = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("crate") {
                let value: LitStr = meta.value()?.parse()?;
                krate = value.parse()?;
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"` or `crate = \"...\"`"))
            }
        })?;
    }

    Ok(RecordOptions {
        name: name.unwrap_or_else(|| snake_case(&input.ident.unraw().to_string())),
        krate,
    })
}

fn indexed_fields(input: &DeriveInput) -> syn::Result<Vec<IndexedField>> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut indexed = Vec::new();

    for field in fields {
        let Some(ident) = field.ident.clone() else {
            continue;
        };

        let mut is_index = false;
        let mut name = None;

        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("record")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("index") {
                    is_index = true;
                    Ok(())
                } else if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    name = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("expected `index` or `name = \"...\"`"))
                }
            })?;
        }

        if !is_index {
            if name.is_some() {
                return Err(syn::Error::new_spanned(
                    &ident,
                    "`name` only applies to fields marked `#[record(index)]`",
                ));
            }
            continue;
        }

        let name = name.unwrap_or_else(|| ident.unraw().to_string());

        if indexed.iter().any(|existing: &IndexedField| existing.name == name) {
            return Err(syn::Error::new_spanned(
                &ident,
                format!("duplicate indexed attribute `{name}`"),
            ));
        }

        indexed.push(IndexedField { ident, name });
    }

    Ok(indexed)
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);

    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }

    out
}
