//! YAML provider support backed by `serde-saphyr`.

use figment::{
    Metadata, Profile, Provider,
    error::Kind,
    value::{Dict, Value as FigmentValue},
};
use serde_saphyr::Options;

use crate::BoxError;

#[derive(Debug, Clone)]
/// Figment provider over an already-parsed YAML mapping.
pub struct SaphyrYaml {
    dict: Dict,
}

impl SaphyrYaml {
    /// Parse in-memory YAML whose top level must be a mapping.
    ///
    /// # Errors
    ///
    /// Returns the parser's error, or an invalid-type error when the document
    /// is not a mapping.
    pub fn parse(contents: &str) -> Result<Self, BoxError> {
        let value = Self::parse_value(contents)?;
        let actual = value.to_actual();
        let dict = value
            .into_dict()
            .ok_or_else(|| figment::Error::from(Kind::InvalidType(actual, "map".into())))?;
        Ok(Self { dict })
    }

    /// Parse YAML contents into a Figment `Value` using strict boolean semantics.
    fn parse_value(contents: &str) -> Result<FigmentValue, serde_saphyr::Error> {
        serde_saphyr::from_str_with_options(
            contents,
            Options {
                strict_booleans: true,
                ..Options::default()
            },
        )
    }
}

impl Provider for SaphyrYaml {
    fn metadata(&self) -> Metadata {
        Metadata::named("Saphyr YAML")
    }

    fn data(&self) -> Result<std::collections::BTreeMap<Profile, Dict>, figment::Error> {
        Ok(Profile::Default.collect(self.dict.clone()))
    }
}
