//! Annotation adapters and configuration extraction for a typed container.
//!
//! The container in this crate only accepts functions whose parameters are
//! parameter bags: ordered fields, each optionally tagged with selection
//! metadata (by name, by group, optional). [`with_annotated`] builds such a
//! bag for any plain function from a list of [`Annotation`]s, and
//! `#[derive(Params)]` declares one at compile time.
//!
//! On top of the adapter sits a small configuration layer.
//! [`provide_config`] registers a decoding capability ([`Unmarshal`]) under an
//! identifier, and [`extract_config_field`] provides one tagged field of a
//! configuration document as a typed value.
//!
//! ```
//! use std::sync::Arc;
//! use fxx::{Annotation, App, Invoke, Json, Unmarshal, extract_config_field,
//!           provide_config, with_annotated};
//!
//! #[derive(serde::Deserialize)]
//! struct Database {
//!     url: String,
//! }
//!
//! let doc = br#"{"db": {"url": "postgres://localhost"}}"#;
//! let app = App::new([
//!     provide_config("app", Unmarshal::from_bytes("app.json", doc.as_slice(), Json)),
//!     extract_config_field::<Database>(r#"json:"db""#)
//!         .from_source("app")
//!         .into(),
//!     Invoke::from_adapter(
//!         with_annotated([Annotation::by_name("missing").optional()])
//!             .build(|extra: Option<Arc<String>>, db: Arc<Database>| {
//!                 assert_eq!(db.url, "postgres://localhost");
//!                 assert!(extra.is_none());
//!             }),
//!     )
//!     .into(),
//! ])?;
//! # drop(app);
//! # Ok::<(), std::sync::Arc<fxx::FxxError>>(())
//! ```

mod adapter;
mod annotation;
mod app;
mod config;
mod container;
mod error;
mod result_ext;
mod tag;
mod wiring;

use std::sync::Arc;

pub use fxx_macros::Params;

pub use adapter::{
    Adapter, Callable, Dependency, ParamBag, Params, Slot, SlotType, WithAnnotated,
    with_annotated,
};
pub use annotation::{Annotation, AnnotationKind};
pub use app::App;
#[cfg(feature = "toml")]
pub use config::{Toml, provide_toml_config_file};
#[cfg(feature = "yaml")]
pub use config::{SaphyrYaml, Yaml, provide_yaml_config_file};
pub use config::{
    CONFIG_GROUP, CONFIG_NAME_PREFIX, ConfigFile, DecodeFormat, ExtractConfigField,
    FieldSelector, Json, Unmarshal, config_name, extract_config_field, provide_config,
    provide_json_config_file,
};
#[expect(deprecated, reason = "legacy aliases stay exported")]
pub use config::{provide_config_file, with_config_field};
pub use container::{
    AnyArc, Container, Invoke, InvokeOutcome, Key, Provide, Resolver, TypeDescriptor,
};
pub use error::{BoxError, ErrorKind, FxxError};
pub use result_ext::{FxxResultExt, ResultIntoFigment};
pub use tag::TagParseError;
pub use wiring::{Wiring, options};

/// Result alias used throughout the crate.
///
/// Errors are shared so a cached construction failure can be returned to
/// every dependant.
pub type FxxResult<T> = Result<T, Arc<FxxError>>;
