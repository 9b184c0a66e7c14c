//! Derive entry points shared by the `Merge` and `Record` macros.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod crate_path;
mod generate;
mod parse;

/// Expands `#[derive(Merge)]`.
pub(crate) fn merge(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    Ok(generate::merge_impl(&parsed))
}

/// Expands `#[derive(Record)]`.
pub(crate) fn record(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    generate::record_impl(&parsed)
}
