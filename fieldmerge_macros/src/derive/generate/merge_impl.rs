//! `Merge` implementation generation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse_quote;

use super::{member_name, with_bounds};
use crate::derive::crate_path;
use crate::derive::parse::{ParsedInput, option_inner};

/// Whether the options after the first comma of `tag` include `hydrate`.
///
/// Mirrors the runtime tag grammar so hydrated fields get a `Default` bound.
pub(crate) fn requests_hydration(tag: &str) -> bool {
    tag.split_once(',')
        .is_some_and(|(_, options)| options.split(',').any(|option| option.trim() == "hydrate"))
}

/// Emits one context call per tagged field, in declaration order.
pub(crate) fn merge_impl(input: &ParsedInput<'_>) -> TokenStream {
    let krate = crate_path::resolve(input.struct_attrs.crate_path.as_ref());
    let ident = input.ident;
    let mut generics = with_bounds(
        input.generics,
        &[parse_quote!(::core::clone::Clone), parse_quote!('static)],
    );
    let generic = input.generics.type_params().next().is_some();

    let mut calls = Vec::new();
    for (field, attrs) in &input.fields {
        let (Some(tag), Some(member)) = (attrs.from.as_ref(), field.ident.as_ref()) else {
            continue;
        };
        let name = member_name(member);
        let hydrated = requests_hydration(&tag.value());
        let inner = option_inner(&field.ty);
        let method = match (inner.is_some(), hydrated) {
            (false, false) => quote!(field),
            (true, false) => quote!(optional_field),
            (false, true) => quote!(hydrated_field),
            (true, true) => quote!(hydrated_optional_field),
        };
        if hydrated && generic {
            let target = inner.unwrap_or(&field.ty);
            generics
                .make_where_clause()
                .predicates
                .push(parse_quote!(#target: ::core::default::Default));
        }
        calls.push(quote! {
            __fieldmerge_ctx.#method(&mut self.#member, #name, #tag)?;
        });
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Merge for #ident #ty_generics #where_clause {
            fn merge_fields(
                &mut self,
                __fieldmerge_ctx: &#krate::MergeContext<'_>,
            ) -> #krate::MergeResult<()> {
                #(#calls)*
                ::core::result::Result::Ok(())
            }
        }
    }
}
