//! Token generation for the `Params` implementation.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::DeriveInput;

use super::parse::{FieldAttrs, ParamField, Selector};

/// Tokens building the optional `Annotation` of one slot.
fn tag_tokens(attrs: &FieldAttrs, krate: &TokenStream) -> TokenStream {
    let Some(selector) = &attrs.selector else {
        return quote! { ::core::option::Option::None };
    };
    let annotation = match selector {
        Selector::Name(name) => quote! { #krate::Annotation::by_name(#name) },
        Selector::Group(group) => quote! { #krate::Annotation::by_group(#group) },
    };
    if attrs.optional {
        quote! { ::core::option::Option::Some(#annotation.optional()) }
    } else {
        quote! { ::core::option::Option::Some(#annotation) }
    }
}

/// Generate `impl Params` for the derived struct.
pub(crate) fn params_impl(
    input: &DeriveInput,
    fields: &[ParamField],
    krate: &TokenStream,
) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let bag = if fields.is_empty() {
        format_ident!("_bag")
    } else {
        format_ident!("bag")
    };

    let slots = fields.iter().enumerate().map(|(index, field)| {
        let ty = &field.ty;
        let tag = tag_tokens(&field.attrs, krate);
        quote! {
            #krate::Slot::new(#index, #krate::SlotType::of::<#ty>(), #tag)
        }
    });
    let takes = fields.iter().enumerate().map(|(index, field)| {
        let name = &field.ident;
        let ty = &field.ty;
        quote! { #name: #bag.take::<#ty>(#index)? }
    });

    quote! {
        impl #impl_generics #krate::Params for #ident #ty_generics #where_clause {
            fn slots() -> ::std::vec::Vec<#krate::Slot> {
                ::std::vec![#(#slots),*]
            }

            fn from_bag(#bag: &mut #krate::ParamBag) -> #krate::FxxResult<Self> {
                ::core::result::Result::Ok(Self { #(#takes),* })
            }
        }
    }
}
