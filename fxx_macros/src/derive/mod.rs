//! Expansion of `#[derive(Params)]`.

mod crate_path;
mod generate;
mod parse;


use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Parse `input` and generate its `Params` implementation.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = crate_path::resolve(parsed.struct_attrs.crate_path.as_ref());
    Ok(generate::params_impl(input, &parsed.fields, &krate))
}
