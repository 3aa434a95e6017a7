//! In-memory configuration capabilities.

use fxx::{Json, Unmarshal, Wiring, provide_config};

/// A JSON capability whose origin is `origin`.
#[must_use]
pub fn json(origin: &str, text: &str) -> Unmarshal {
    Unmarshal::from_bytes(origin, text.as_bytes(), Json)
}

/// Register `text` as a JSON capability named `identifier`.
#[must_use]
pub fn provide_json(identifier: &str, text: &str) -> Wiring {
    provide_config(identifier, json(identifier, text))
}

/// Register `{"s": {"value": <value>}}` under `identifier`.
///
/// ```
/// let wiring = fxx_test_helpers::config::provide_value("a", "not ok");
/// assert!(matches!(wiring, fxx::Wiring::Many(_)));
/// ```
#[must_use]
pub fn provide_value(identifier: &str, value: &str) -> Wiring {
    let document = format!(r#"{{"s":{{"value":{value:?}}}}}"#);
    provide_json(identifier, &document)
}
