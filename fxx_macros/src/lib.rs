//! Procedural macros for `fxx`.
//!
//! `#[derive(Params)]` turns a struct with named fields into a parameter bag:
//! each field becomes one slot, in declaration order, tagged from its
//! `#[fxx(...)]` attribute.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `fxx::Params`.
///
/// Field attributes:
///
/// - `#[fxx(name = "ro")]` selects the provider registered under a name.
/// - `#[fxx(group = "handlers")]` collects a group into a `Vec<Arc<T>>` field.
/// - `#[fxx(optional)]` lets an unsatisfied slot fall back to its empty value;
///   it must accompany `name` or `group`.
///
/// The struct attribute `#[fxx(crate = "path")]` changes the path generated
/// code uses to reach the runtime crate.
#[proc_macro_derive(Params, attributes(fxx))]
pub fn derive_params(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
