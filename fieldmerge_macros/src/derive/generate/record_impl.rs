//! `Reflect` and `Record` implementation generation.

use std::collections::HashMap;

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::spanned::Spanned;
use syn::{Visibility, parse_quote};

use super::{member_name, with_bounds};
use crate::derive::crate_path;
use crate::derive::parse::{AccessorAttr, ParsedInput};

/// A field visible to the resolver.
struct Exposed<'a> {
    name: String,
    member: &'a syn::Ident,
}

/// Collects exposed names, rejecting collisions between fields and accessors.
#[derive(Default)]
struct NameTable {
    seen: HashMap<String, Span>,
}

impl NameTable {
    fn claim(&mut self, name: &str, span: Span) -> syn::Result<()> {
        if self.seen.contains_key(name) {
            return Err(syn::Error::new(
                span,
                format!("`{name}` is exposed more than once; use `rename` or `skip` to disambiguate"),
            ));
        }
        self.seen.insert(name.to_owned(), span);
        Ok(())
    }
}

fn exposed_fields<'a>(
    input: &ParsedInput<'a>,
    names: &mut NameTable,
) -> syn::Result<Vec<Exposed<'a>>> {
    let mut exposed = Vec::new();
    for (field, attrs) in &input.fields {
        let Some(member) = field.ident.as_ref() else {
            continue;
        };
        if matches!(field.vis, Visibility::Inherited) {
            if let Some(rename) = &attrs.rename {
                return Err(syn::Error::new(
                    rename.span(),
                    "rename has no effect on a private field; make the field public",
                ));
            }
            continue;
        }
        if attrs.skip {
            continue;
        }
        let name = attrs
            .rename
            .as_ref()
            .map_or_else(|| member_name(member), syn::LitStr::value);
        names.claim(&name, field.span())?;
        exposed.push(Exposed { name, member });
    }
    Ok(exposed)
}

fn accessor_arm(krate: &TokenStream, accessor: &AccessorAttr) -> TokenStream {
    let name = &accessor.name;
    let method = &accessor.method;
    let wrap = if accessor.fallible {
        quote!(fallible_accessor)
    } else {
        quote!(infallible_accessor)
    };
    quote! {
        #name => ::core::option::Option::Some(#krate::reflect::#wrap(self.#method())),
    }
}

/// Emits `Reflect` and `Record` for a source struct.
pub(crate) fn record_impl(input: &ParsedInput<'_>) -> syn::Result<TokenStream> {
    let krate = crate_path::resolve(input.struct_attrs.crate_path.as_ref());
    let ident = input.ident;
    let generics = with_bounds(input.generics, &[parse_quote!(#krate::Reflect)]);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut names = NameTable::default();
    let exposed = exposed_fields(input, &mut names)?;
    for accessor in &input.struct_attrs.accessors {
        names.claim(&accessor.name, accessor.span)?;
    }

    let field_arms = exposed.iter().map(|Exposed { name, member }| {
        quote! { #name => ::core::option::Option::Some(&self.#member), }
    });
    // Zero covers the whole value, so private fields count; `skip` opts out.
    let zero_checks = input
        .fields
        .iter()
        .filter(|(_, attrs)| !attrs.skip)
        .filter_map(|(field, _)| field.ident.as_ref())
        .map(|member| quote! { && #krate::Reflect::is_zero(&self.#member) });
    let call_fn = if input.struct_attrs.accessors.is_empty() {
        quote! {}
    } else {
        let arms = input
            .struct_attrs
            .accessors
            .iter()
            .map(|accessor| accessor_arm(&krate, accessor));
        quote! {
            fn call(
                &self,
                name: &str,
            ) -> ::core::option::Option<#krate::reflect::AccessorResult> {
                match name {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Reflect for #ident #ty_generics #where_clause {
            fn shape(&self) -> #krate::Shape<'_> {
                #krate::Shape::Record(self)
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn is_zero(&self) -> bool {
                true #(#zero_checks)*
            }
        }

        #[automatically_derived]
        impl #impl_generics #krate::Record for #ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::core::option::Option<&dyn #krate::Reflect> {
                match name {
                    #(#field_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #call_fn
        }
    })
}
