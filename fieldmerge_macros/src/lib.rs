//! Procedural macros for `fieldmerge`.
//!
//! [`macro@Merge`] generates the per-field merge table for destination
//! structs, and [`macro@Record`] exposes a source struct's members and
//! accessors to the path resolver. Both derives read `#[fieldmerge(...)]`
//! attributes.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derives `fieldmerge::Merge` for a struct with named fields.
///
/// Fields carrying `#[fieldmerge(from = "path|path,option")]` are merged in
/// declaration order; all other fields are left alone. `Option<T>` fields
/// receive `Some(value)` when a value is selected and `None` otherwise. Fields
/// whose tag carries `hydrate` are hydrated into a fresh `T::default()`, so
/// their type (the inner `T` for options) must implement `Default`.
///
/// Struct attributes:
/// - `crate = "alias"` overrides the path used to reach the runtime crate.
#[proc_macro_derive(Merge, attributes(fieldmerge))]
pub fn derive_merge(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::merge(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derives `fieldmerge::Reflect` and `fieldmerge::Record` for a source struct.
///
/// Public fields are exposed under their Rust name unless renamed. Private
/// fields are never exposed, but they still take part in `Reflect::is_zero`:
/// a record is zero only when every field not marked `skip` is zero. Every
/// such field must therefore implement `Reflect`.
///
/// Struct attributes:
/// - `accessor(name = "Name", with = method)` exposes a zero-argument method
///   returning a reflectable value. Add `fallible` when the method returns a
///   `Result`; its error aborts the merge. `name` defaults to the method name.
/// - `crate = "alias"` overrides the path used to reach the runtime crate.
///
/// Field attributes:
/// - `rename = "Name"` exposes the field under another name.
/// - `skip` hides a field from the resolver and from the zero check.
#[proc_macro_derive(Record, attributes(fieldmerge))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::record(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
