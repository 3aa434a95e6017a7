//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[fxx(crate = "...")]` attribute value into the
//! tokens generated code uses in place of `fxx::`.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `::fxx` when no override is present.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::fxx }, |path| quote! { #path })
}

#[cfg(test)]
mod tests {
    //! Unit tests for crate path resolution with default and custom paths.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default(None, ":: fxx")]
    #[case::custom(Some("my_alias"), "my_alias")]
    #[case::nested(Some("deps::fxx"), "deps :: fxx")]
    #[case::local(Some("crate"), "crate")]
    fn resolve_produces_expected_tokens(#[case] input: Option<&str>, #[case] expected: &str) {
        let parsed = input.map(|s| syn::parse_str::<syn::Path>(s).expect("valid path"));
        let tokens = resolve(parsed.as_ref());
        assert_eq!(tokens.to_string(), expected);
    }
}
