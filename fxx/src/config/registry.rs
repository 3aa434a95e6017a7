//! Registration of decoding capabilities under identifiers.

use std::path::PathBuf;

use super::{DecodeFormat, Json, Unmarshal};
use crate::{FxxError, Provide, Wiring};

/// Prefix of the names capabilities are registered under.
pub const CONFIG_NAME_PREFIX: &str = "fxx::config/";

/// Group every capability is appended to, in registration order.
pub const CONFIG_GROUP: &str = "fxx::config";

/// Name a capability registered as `identifier` is reachable by.
///
/// ```
/// assert_eq!(fxx::config_name("app"), "fxx::config/app");
/// ```
#[must_use]
pub fn config_name(identifier: &str) -> String {
    format!("{CONFIG_NAME_PREFIX}{identifier}")
}

/// Register `unmarshal` under `identifier` and append it to the config group.
///
/// Registering the same identifier twice fails composition with a duplicate
/// provider error.
#[must_use]
pub fn provide_config(identifier: impl Into<String>, unmarshal: Unmarshal) -> Wiring {
    let id: String = identifier.into();
    tracing::debug!(identifier = %id, origin = unmarshal.origin(), "registering config provider");
    Wiring::Many(vec![
        Provide::value(unmarshal.clone())
            .named(config_name(&id))
            .into(),
        Provide::value(unmarshal).grouped(CONFIG_GROUP).into(),
    ])
}

/// Deprecated name of [`provide_config`].
#[deprecated(since = "0.2.0", note = "use `provide_config` instead")]
#[must_use]
pub fn provide_config_file(identifier: impl Into<String>, unmarshal: Unmarshal) -> Wiring {
    provide_config(identifier, unmarshal)
}

/// A configuration file read eagerly when converted into [`Wiring`].
///
/// The file is registered under its path unless [`ConfigFile::name`]
/// overrides the identifier.
///
/// # Examples
///
/// ```no_run
/// use fxx::{App, ConfigFile, Yaml};
///
/// let _app = App::new([ConfigFile::new("config/app.yaml", Yaml).name("app").into()])?;
/// # Ok::<(), std::sync::Arc<fxx::FxxError>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigFile<F> {
    path: PathBuf,
    format: F,
    name: Option<String>,
}

impl<F: DecodeFormat> ConfigFile<F> {
    /// Describe a file decoded with `format`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, format: F) -> Self {
        Self {
            path: path.into(),
            format,
            name: None,
        }
    }

    /// Register under `identifier` rather than the file path.
    #[must_use]
    pub fn name(mut self, identifier: impl Into<String>) -> Self {
        self.name = Some(identifier.into());
        self
    }

    /// Read the file and build the registration.
    ///
    /// A read failure is carried by the returned [`Wiring::Error`] and aborts
    /// composition.
    #[must_use]
    pub fn into_wiring(self) -> Wiring {
        let origin = self.path.to_string_lossy().into_owned();
        tracing::debug!(path = %origin, "reading config file");
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => return Wiring::Error(FxxError::read_config_file(&self.path, err)),
        };
        let identifier = self.name.unwrap_or_else(|| origin.clone());
        provide_config(identifier, Unmarshal::from_bytes(origin, bytes, self.format))
    }
}

impl<F: DecodeFormat> From<ConfigFile<F>> for Wiring {
    fn from(file: ConfigFile<F>) -> Self {
        file.into_wiring()
    }
}

/// Read a JSON file and register it under its path.
#[must_use]
pub fn provide_json_config_file(path: impl Into<PathBuf>) -> Wiring {
    ConfigFile::new(path, Json).into_wiring()
}

/// Read a YAML file and register it under its path.
#[cfg(feature = "yaml")]
#[must_use]
pub fn provide_yaml_config_file(path: impl Into<PathBuf>) -> Wiring {
    ConfigFile::new(path, super::Yaml).into_wiring()
}

/// Read a TOML file and register it under its path.
#[cfg(feature = "toml")]
#[must_use]
pub fn provide_toml_config_file(path: impl Into<PathBuf>) -> Wiring {
    ConfigFile::new(path, super::Toml).into_wiring()
}
