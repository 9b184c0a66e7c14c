//! Attribute parsing for the `Merge` and `Record` derives.
//!
//! Both derives share the `#[fieldmerge(...)]` namespace. Keys that a derive
//! does not understand are consumed and ignored, so a struct can derive both
//! macros with one set of attributes.

use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr, Token, parenthesized};

mod input;
mod literals;
mod type_utils;

pub(crate) use input::{ParsedInput, parse_input};
use literals::{lit_bool, lit_str};
pub(crate) use type_utils::option_inner;

const ATTRIBUTE: &str = "fieldmerge";

/// Struct-level attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Zero-argument methods exposed to the resolver by `#[derive(Record)]`.
    pub accessors: Vec<AccessorAttr>,
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[fieldmerge(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `fieldmerge::`.
    pub crate_path: Option<syn::Path>,
}

/// One `accessor(...)` entry.
#[derive(Clone)]
pub(crate) struct AccessorAttr {
    pub name: String,
    pub method: syn::Ident,
    pub fallible: bool,
    pub span: Span,
}

/// Field-level attributes.
///
/// - `from` holds the raw tag expression used by `#[derive(Merge)]`.
/// - `rename` and `skip` control how `#[derive(Record)]` exposes the field.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub from: Option<LitStr>,
    pub rename: Option<LitStr>,
    pub skip: bool,
}

/// Iterate all `#[fieldmerge(...)]` attributes once and apply a callback.
fn parse_fieldmerge<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident(ATTRIBUTE)) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Reads a bare flag or an explicit `key = bool`.
fn flag(meta: &ParseNestedMeta, key: &str) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        lit_bool(meta, key)
    } else {
        Ok(true)
    }
}

fn parse_accessor(meta: &ParseNestedMeta) -> syn::Result<AccessorAttr> {
    let mut explicit_name = None;
    let mut with: Option<syn::Ident> = None;
    let mut fallible = false;
    meta.parse_nested_meta(|nested| {
        match nested.path.get_ident().map(ToString::to_string).as_deref() {
            Some("name") => explicit_name = Some(lit_str(&nested, "name")?.value()),
            Some("with") => with = Some(nested.value()?.parse()?),
            Some("fallible") => fallible = flag(&nested, "fallible")?,
            _ => discard_unknown(&nested)?,
        }
        Ok(())
    })?;
    let span = meta.path.span();
    let method =
        with.ok_or_else(|| syn::Error::new(span, "accessor requires `with = method_name`"))?;
    let name = explicit_name.unwrap_or_else(|| method.to_string());
    if name.is_empty() {
        return Err(syn::Error::new(span, "accessor name must not be empty"));
    }
    Ok(AccessorAttr {
        name,
        method,
        fallible,
        span,
    })
}

/// Extracts `#[fieldmerge(...)]` metadata applied to a struct.
///
/// Recognises `accessor(...)` and `crate`. Unknown keys are ignored.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_fieldmerge(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("accessor") => {
                out.accessors.push(parse_accessor(meta)?);
                Ok(())
            }
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
                Ok(())
            }
            _ => discard_unknown(meta),
        }
    })?;
    Ok(out)
}

/// Parses field-level `#[fieldmerge(...)]` attributes.
///
/// Recognises `from`, `rename` and `skip`. Unknown keys are ignored.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_fieldmerge(&field.attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("from") => out.from = Some(lit_str(meta, "from")?),
            Some("rename") => {
                let renamed = lit_str(meta, "rename")?;
                if renamed.value().is_empty() {
                    return Err(syn::Error::new(renamed.span(), "rename must not be empty"));
                }
                out.rename = Some(renamed);
            }
            Some("skip") => out.skip = flag(meta, "skip")?,
            _ => discard_unknown(meta)?,
        }
        Ok(())
    })?;
    Ok(out)
}
