//! Configuration capabilities and field extraction.
//!
//! A capability ([`Unmarshal`]) turns bytes into a `figment` document. The
//! registry makes each capability reachable by name and appends it to one
//! ordered group; the extractor decodes a single field from either a named
//! capability or the most recently registered one and provides it to the
//! container as a typed value.

mod extract;
mod format;
mod registry;
mod selector;
mod unmarshal;
#[cfg(feature = "yaml")]
mod yaml;

pub use extract::{ExtractConfigField, extract_config_field};
#[expect(deprecated, reason = "legacy alias stays exported")]
pub use extract::with_config_field;
#[cfg(feature = "toml")]
pub use format::Toml;
#[cfg(feature = "yaml")]
pub use format::Yaml;
pub use format::{DecodeFormat, Json};
#[expect(deprecated, reason = "legacy alias stays exported")]
pub use registry::provide_config_file;
pub use registry::{
    CONFIG_GROUP, CONFIG_NAME_PREFIX, ConfigFile, config_name, provide_config,
    provide_json_config_file,
};
#[cfg(feature = "toml")]
pub use registry::provide_toml_config_file;
#[cfg(feature = "yaml")]
pub use registry::provide_yaml_config_file;
pub use selector::FieldSelector;
pub use unmarshal::Unmarshal;
#[cfg(feature = "yaml")]
pub use yaml::SaphyrYaml;

#[cfg(test)]
mod tests;
