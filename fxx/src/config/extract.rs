//! Extraction of single configuration fields as container values.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::{CONFIG_GROUP, FieldSelector, Unmarshal, config_name};
use crate::{Adapter, Annotation, FxxError, FxxResult, Provide, Wiring, with_annotated};

/// Provides one configuration field as a value of type `T`.
///
/// Built by [`extract_config_field`]. Without a source the most recently
/// registered capability is decoded.
#[derive(Debug)]
pub struct ExtractConfigField<T> {
    tag: String,
    source: Option<String>,
    target: PhantomData<fn() -> T>,
}

/// Provide the field selected by `tag` as a `T`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fxx::{App, Json, Unmarshal, extract_config_field, provide_config};
///
/// #[derive(serde::Deserialize)]
/// struct Server {
///     value: String,
/// }
///
/// let doc = br#"{"s": {"value": "hello world"}}"#;
/// let app = App::new([
///     provide_config("app", Unmarshal::from_bytes("app", doc.as_slice(), Json)),
///     extract_config_field::<Server>(r#"json:"s""#).from_source("app").into(),
/// ])?;
/// let server: Arc<Server> = app.resolve()?;
/// assert_eq!(server.value, "hello world");
/// # Ok::<(), std::sync::Arc<fxx::FxxError>>(())
/// ```
#[must_use]
pub fn extract_config_field<T>(tag: impl Into<String>) -> ExtractConfigField<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    ExtractConfigField {
        tag: tag.into(),
        source: None,
        target: PhantomData,
    }
}

/// Deprecated name of [`extract_config_field`].
#[deprecated(since = "0.2.0", note = "use `extract_config_field` instead")]
#[must_use]
pub fn with_config_field<T>(tag: impl Into<String>) -> ExtractConfigField<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    extract_config_field(tag)
}

impl<T> ExtractConfigField<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Decode from the capability registered as `identifier`.
    #[must_use]
    pub fn from_source(mut self, identifier: impl Into<String>) -> Self {
        self.source = Some(identifier.into());
        self
    }

    /// Field tag as supplied.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Capability identifier, if one was chosen.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Build the adapter that resolves a capability and decodes the field.
    ///
    /// # Errors
    ///
    /// Returns [`FxxError::InvalidTag`] when the tag cannot be parsed.
    pub fn adapter(&self) -> FxxResult<Adapter<FxxResult<T>>> {
        let selector = Arc::new(FieldSelector::parse(&self.tag).map_err(|source| {
            Arc::new(FxxError::InvalidTag {
                tag: self.tag.clone(),
                source,
            })
        })?);
        let adapter = match &self.source {
            Some(identifier) => with_annotated([Annotation::by_name(config_name(identifier))])
                .build(move |unmarshal: Arc<Unmarshal>| -> FxxResult<T> {
                    unmarshal.unmarshal::<T>(&selector)
                }),
            None => with_annotated([Annotation::by_group(CONFIG_GROUP)]).build(
                move |providers: Vec<Arc<Unmarshal>>| -> FxxResult<T> {
                    let latest = providers
                        .last()
                        .ok_or_else(|| Arc::new(FxxError::NoConfigProviders))?;
                    tracing::debug!(
                        origin = latest.origin(),
                        candidates = providers.len(),
                        "selected most recent config provider"
                    );
                    latest.unmarshal::<T>(&selector)
                },
            ),
        };
        Ok(adapter)
    }
}

impl<T> From<ExtractConfigField<T>> for Wiring
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    fn from(extract: ExtractConfigField<T>) -> Self {
        match extract.adapter() {
            Ok(adapter) => Provide::from_adapter(adapter).into(),
            Err(err) => Self::Error(err),
        }
    }
}
