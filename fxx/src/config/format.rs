//! Byte formats a configuration capability can decode.

use figment::Figment;
use figment::providers::{Format, Json as JsonProvider};

use crate::BoxError;

/// Turns raw bytes into a structured configuration document.
///
/// Implemented by the [`Json`], [`Yaml`] and [`Toml`] presets and by any
/// `Fn(&[u8]) -> Result<Figment, BoxError>` closure.
pub trait DecodeFormat: Send + Sync + 'static {
    /// Format label, matched against the keys of a field tag such as `json:"s"`.
    fn name(&self) -> &'static str;

    /// Parse `bytes` into a document.
    ///
    /// # Errors
    ///
    /// Returns the parser's error when `bytes` are not valid in this format.
    fn decode(&self, bytes: &[u8]) -> Result<Figment, BoxError>;
}

impl<F> DecodeFormat for F
where
    F: Fn(&[u8]) -> Result<Figment, BoxError> + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "custom"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Figment, BoxError> {
        self(bytes)
    }
}

/// JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl DecodeFormat for Json {
    fn name(&self) -> &'static str {
        "json"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Figment, BoxError> {
        let text = std::str::from_utf8(bytes)?;
        // Validate eagerly so syntax errors surface before field lookup.
        serde_json::from_str::<serde_json::Value>(text)?;
        Ok(Figment::from(JsonProvider::string(text)))
    }
}

/// YAML documents, parsed with `serde-saphyr` using strict booleans.
#[cfg(feature = "yaml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Yaml;

#[cfg(feature = "yaml")]
impl DecodeFormat for Yaml {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Figment, BoxError> {
        let text = std::str::from_utf8(bytes)?;
        let provider = super::yaml::SaphyrYaml::parse(text)?;
        Ok(Figment::from(provider))
    }
}

/// TOML documents.
#[cfg(feature = "toml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Toml;

#[cfg(feature = "toml")]
impl DecodeFormat for Toml {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Figment, BoxError> {
        let text = std::str::from_utf8(bytes)?;
        toml::from_str::<toml::Value>(text)?;
        Ok(Figment::from(figment::providers::Toml::string(text)))
    }
}
