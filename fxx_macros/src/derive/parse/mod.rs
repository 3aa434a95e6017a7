//! Parsing of `#[fxx(...)]` attributes for the `Params` derive.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Token};

mod input;
mod literals;

pub(crate) use input::parse_input;
use literals::{lit_bool, lit_str};

/// Struct-level attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[fxx(crate = "my_alias")]`, generated code references
    /// types through `my_alias::` instead of `::fxx::`.
    pub crate_path: Option<syn::Path>,
}

/// How a field slot is selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Selector {
    Name(String),
    Group(String),
}

/// Field-level attributes recognised by `#[derive(Params)]`.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    pub selector: Option<Selector>,
    pub optional: bool,
}

/// One field of the bag together with its parsed attributes.
#[derive(Clone)]
pub(crate) struct ParamField {
    pub ident: syn::Ident,
    pub ty: syn::Type,
    pub attrs: FieldAttrs,
}

/// Iterate all `#[fxx(...)]` attributes once and apply a callback.
fn parse_fxx<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("fxx")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn unknown_key(meta: &ParseNestedMeta, allowed: &str) -> syn::Error {
    let key = meta
        .path
        .get_ident()
        .map_or_else(|| "attribute".to_owned(), ToString::to_string);
    meta.error(format!("unknown fxx key `{key}`; expected {allowed}"))
}

/// Parses struct-level `#[fxx(...)]` attributes.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_fxx(attrs, |meta| {
        if !meta.path.is_ident("crate") {
            return Err(unknown_key(meta, "`crate`"));
        }
        let s = lit_str(meta, "crate")?;
        let path: syn::Path =
            syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
        out.crate_path = Some(path);
        Ok(())
    })?;
    Ok(out)
}

fn set_selector(
    out: &mut FieldAttrs,
    meta: &ParseNestedMeta,
    selector: Selector,
) -> syn::Result<()> {
    if out.selector.is_some() {
        return Err(meta.error("a field takes exactly one of `name` or `group`"));
    }
    out.selector = Some(selector);
    Ok(())
}

fn apply_field_attr(meta: &ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<()> {
    match meta.path.get_ident().map(ToString::to_string).as_deref() {
        Some("name") => {
            let s = lit_str(meta, "name")?;
            set_selector(out, meta, Selector::Name(s.value()))
        }
        Some("group") => {
            let s = lit_str(meta, "group")?;
            set_selector(out, meta, Selector::Group(s.value()))
        }
        Some("optional") => {
            // Accept both `optional` and `optional = true`
            out.optional = if meta.input.peek(Token![=]) {
                lit_bool(meta, "optional")?
            } else {
                true
            };
            Ok(())
        }
        _ => Err(unknown_key(meta, "`name`, `group` or `optional`")),
    }
}

/// Parses field-level `#[fxx(...)]` attributes.
///
/// Unknown keys are rejected, as are `name` and `group` on the same field and
/// `optional` without either.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_fxx(&field.attrs, |meta| apply_field_attr(meta, &mut out))?;
    if out.optional && out.selector.is_none() {
        return Err(syn::Error::new_spanned(
            field,
            "`optional` needs a `name` or `group` to apply to",
        ));
    }
    Ok(out)
}
