//! Decoding capabilities registered with the config registry.

use std::fmt;
use std::iter;
use std::sync::Arc;

use figment::Figment;
use figment::error::Kind;
use figment::value::{Dict, Value};
use serde::de::value::{MapDeserializer, SeqDeserializer};
use serde::de::{DeserializeOwned, Deserializer, Visitor};
use serde::forward_to_deserialize_any;

use super::{DecodeFormat, FieldSelector};
use crate::{BoxError, FxxResult, FxxResultExt};

type Load = dyn Fn() -> Result<Figment, BoxError> + Send + Sync;

/// A cloneable handle that produces a configuration document on demand.
///
/// Every call decodes afresh from the captured input, so a handle holds no
/// mutable state and may be shared between any number of extractors.
///
/// # Examples
///
/// ```
/// use fxx::{FieldSelector, Json, Unmarshal};
///
/// let unmarshal = Unmarshal::from_bytes("inline", br#"{"port": 8080}"#.as_slice(), Json);
/// let port: u16 = unmarshal.unmarshal(&FieldSelector::parse(r#"json:"port""#)?)?;
/// assert_eq!(port, 8080);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct Unmarshal {
    origin: Arc<str>,
    format: Option<&'static str>,
    load: Arc<Load>,
}

impl Unmarshal {
    /// Wrap an arbitrary document loader.
    #[must_use]
    pub fn new<F>(origin: impl Into<Arc<str>>, load: F) -> Self
    where
        F: Fn() -> Result<Figment, BoxError> + Send + Sync + 'static,
    {
        Self {
            origin: origin.into(),
            format: None,
            load: Arc::new(load),
        }
    }

    /// Decode `bytes` with `format` whenever a document is requested.
    #[must_use]
    pub fn from_bytes<D: DecodeFormat>(
        origin: impl Into<Arc<str>>,
        input: impl Into<Arc<[u8]>>,
        format: D,
    ) -> Self {
        let bytes: Arc<[u8]> = input.into();
        Self {
            origin: origin.into(),
            format: Some(format.name()),
            load: Arc::new(move || format.decode(&bytes)),
        }
    }

    /// Serve a prepared document.
    #[must_use]
    pub fn from_figment(origin: impl Into<Arc<str>>, figment: Figment) -> Self {
        Self::new(origin, move || Ok(figment.clone()))
    }

    /// Where the document comes from, used in error messages.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Format label, when the handle was built from bytes.
    #[must_use]
    pub const fn format(&self) -> Option<&'static str> {
        self.format
    }

    /// Decode the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`FxxError::Unmarshal`](crate::FxxError::Unmarshal) when the
    /// input does not decode.
    pub fn document(&self) -> FxxResult<Figment> {
        (self.load)().into_unmarshal(&self.origin)
    }

    /// Decode the field picked by `selector` as `T`.
    ///
    /// Tag selectors name one top-level key; JSON documents fall back to a
    /// case-insensitive match. Bare selectors are dotted paths, and an empty
    /// bare path selects the whole document. An absent field decodes as
    /// `None` for options and as an empty map or sequence for collections
    /// and structs, so `#[serde(default)]` applies.
    ///
    /// # Errors
    ///
    /// Returns [`FxxError::Unmarshal`](crate::FxxError::Unmarshal) when the
    /// document does not decode, a required field is absent, or the field
    /// does not fit `T`.
    pub fn unmarshal<T: DeserializeOwned>(&self, selector: &FieldSelector) -> FxxResult<T> {
        let document = self.document()?;
        let path = selector.path_for(self.format);
        tracing::debug!(origin = %self.origin, path, "extracting config field");
        let found = if selector.is_literal() {
            let dict = document.extract::<Dict>().into_unmarshal(&self.origin)?;
            find_key(dict, path, self.format == Some("json"))
        } else if path.is_empty() {
            return document.extract().into_unmarshal(&self.origin);
        } else {
            match document.find_value(path) {
                Ok(value) => Some(value),
                Err(err) if err.missing() => None,
                Err(err) => return Err(err).into_unmarshal(&self.origin),
            }
        };
        match found {
            Some(value) => value.deserialize(),
            None => T::deserialize(Absent(path)),
        }
        .into_unmarshal(&self.origin)
    }
}

/// Take `key` out of `dict`, preferring an exact match.
fn find_key(mut dict: Dict, key: &str, fold_case: bool) -> Option<Value> {
    if let Some(value) = dict.remove(key) {
        return Some(value);
    }
    if !fold_case {
        return None;
    }
    let folded = dict
        .keys()
        .find(|candidate| eq_fold(candidate, key))?
        .clone();
    dict.remove(&folded)
}

fn eq_fold(left: &str, right: &str) -> bool {
    left.chars()
        .flat_map(char::to_lowercase)
        .eq(right.chars().flat_map(char::to_lowercase))
}

/// Deserializer standing in for a field the document does not contain.
struct Absent<'a>(&'a str);

impl Absent<'_> {
    fn missing(&self) -> figment::Error {
        Kind::MissingField(self.0.to_owned().into()).into()
    }
}

impl<'de> Deserializer<'de> for Absent<'_> {
    type Error = figment::Error;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Self::Error> {
        Err(self.missing())
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_none()
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_unit()
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_seq(SeqDeserializer::<_, Self::Error>::new(iter::empty::<()>()))
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_map(MapDeserializer::<_, Self::Error>::new(iter::empty::<((), ())>()))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_map(visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit_struct newtype_struct tuple tuple_struct enum
        identifier ignored_any
    }
}

impl fmt::Debug for Unmarshal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unmarshal")
            .field("origin", &self.origin)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}
