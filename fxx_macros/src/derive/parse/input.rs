//! Input parsing for the `Params` derive macro.
//!
//! This module gathers the struct identifier, fields, and attribute metadata
//! in one pass so macro expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields};

use super::{ParamField, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// Everything generation needs from the user's struct.
pub(crate) struct ParsedInput {
    pub struct_attrs: StructAttrs,
    pub fields: Vec<ParamField>,
}

/// Gathers information from the user-provided struct.
///
/// Only structs with named fields can become parameter bags.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unit => {
                return Ok(ParsedInput {
                    struct_attrs,
                    fields: Vec::new(),
                });
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Params requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Params can only be derived for structs",
            ));
        }
    };

    let fields = named
        .iter()
        .map(|field| {
            let ident = field
                .ident
                .clone()
                .ok_or_else(|| syn::Error::new_spanned(field, "Params requires named fields"))?;
            Ok(ParamField {
                ident,
                ty: field.ty.clone(),
                attrs: parse_field_attrs(field)?,
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;
    Ok(ParsedInput {
        struct_attrs,
        fields,
    })
}
