//! Code generation for the derives.

use syn::ext::IdentExt;
use syn::{Generics, TypeParamBound};

mod merge_impl;
mod record_impl;

pub(crate) use merge_impl::merge_impl;
pub(crate) use record_impl::record_impl;

/// Clones `generics`, adding `bounds` to every type parameter.
fn with_bounds(generics: &Generics, bounds: &[TypeParamBound]) -> Generics {
    let mut bounded = generics.clone();
    for param in bounded.type_params_mut() {
        param.bounds.extend(bounds.iter().cloned());
    }
    bounded
}

/// Name a member is known by at runtime, without any `r#` prefix.
fn member_name(ident: &syn::Ident) -> String {
    ident.unraw().to_string()
}
