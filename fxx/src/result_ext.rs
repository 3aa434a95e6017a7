//! Extensions for mapping errors to `FxxResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| FxxError::…(e))` patterns
//! when converting decoder and user errors into the crate's `FxxResult<T>`
//! alias (`Result<T, Arc<FxxError>>`).
//!
//! - Use [`FxxResultExt::into_unmarshal`] for decoder failures that should
//!   name the configuration source they came from.
//! - Use [`ResultIntoFigment::to_figment`] inside `figment::Jail` closures.
//!
//! # Examples
//!
//! ```
//! use fxx::{FxxResult, FxxResultExt};
//!
//! fn parse(data: &str) -> FxxResult<serde_json::Value> {
//!     serde_json::from_str(data).into_unmarshal("inline")
//! }
//!
//! assert!(parse("{").is_err());
//! ```

use crate::{BoxError, FxxError, FxxResult};
use std::sync::Arc;

/// Generic extension for mapping any `Result<T, E>` into an `FxxResult<T>`.
pub trait FxxResultExt<T> {
    /// Convert the error into [`FxxError::Unmarshal`] labelled with `origin`.
    ///
    /// # Errors
    ///
    /// Propagates the original error wrapped in `Arc<FxxError>`.
    fn into_unmarshal(self, origin: &str) -> FxxResult<T>;

    /// Convert the error into [`FxxError::Invoke`].
    ///
    /// # Errors
    ///
    /// Propagates the original error wrapped in `Arc<FxxError>`.
    fn into_invoke(self) -> FxxResult<T>;
}

impl<T, E> FxxResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn into_unmarshal(self, origin: &str) -> FxxResult<T> {
        self.map_err(|e| FxxError::unmarshal(origin, e))
    }

    fn into_invoke(self) -> FxxResult<T> {
        self.map_err(FxxError::invoke)
    }
}

/// Extension to convert `Result<T, Arc<FxxError>>` into `Result<T, figment::Error>`.
#[expect(
    clippy::result_large_err,
    reason = "figment::Error is large; this helper is test-facing only"
)]
pub trait ResultIntoFigment<T> {
    /// Map the `Arc<FxxError>` into a `figment::Error` carrying its message.
    ///
    /// # Errors
    ///
    /// Returns a `figment::Error` containing the original message.
    fn to_figment(self) -> Result<T, figment::Error>;
}

impl<T> ResultIntoFigment<T> for Result<T, Arc<FxxError>> {
    fn to_figment(self) -> Result<T, figment::Error> {
        self.map_err(|err| figment::Error::from(err.to_string()))
    }
}
