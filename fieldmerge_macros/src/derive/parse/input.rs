//! Input parsing shared by both derives.
//!
//! This module gathers the struct identifier, generics, fields and attribute
//! metadata in one pass so expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields};

use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// A struct with named fields and its parsed attributes.
pub(crate) struct ParsedInput<'a> {
    pub ident: &'a syn::Ident,
    pub generics: &'a syn::Generics,
    pub struct_attrs: StructAttrs,
    /// Fields in declaration order, paired with their attributes.
    pub fields: Vec<(&'a syn::Field, FieldAttrs)>,
}

/// Gathers information from the user-provided struct.
///
/// Only structs with named fields are accepted.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput<'_>> {
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "fieldmerge derives require named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "fieldmerge derives can only be used on structs",
            ));
        }
    };

    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let fields = named
        .iter()
        .map(|field| parse_field_attrs(field).map(|attrs| (field, attrs)))
        .collect::<syn::Result<Vec<_>>>()?;
    Ok(ParsedInput {
        ident: &input.ident,
        generics: &input.generics,
        struct_attrs,
        fields,
    })
}
