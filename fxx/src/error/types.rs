//! Primary error enum for composition and resolution flows.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error accepted from user constructors, invocations and decoders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while wiring or resolving an application.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FxxError {
    /// A configuration file could not be read while it was being registered.
    #[error("unable to read file '{path}': {source}")]
    ReadConfigFile {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A type or name key was registered twice.
    #[error("cannot provide {key}: already provided")]
    DuplicateProvider {
        /// Rendered key of the conflicting registration.
        key: String,
    },

    /// A required slot had nothing registered under its key.
    #[error("missing dependency for slot {slot}: {key} is not provided")]
    MissingDependency {
        /// Rendered key that was looked up.
        key: String,
        /// Rendered slot type and tag.
        slot: String,
    },

    /// An optional slot was unsatisfied but its type has no empty value.
    #[error("optional slot {slot} has no empty value; declare it as `Option<Arc<_>>`")]
    NoEmptyValue {
        /// Rendered slot type and tag.
        slot: String,
    },

    /// A slot's annotation does not fit its shape (for example a group on `Arc<T>`).
    #[error("slot {slot} cannot be resolved with annotation `{annotation}`: {reason}")]
    SlotMismatch {
        /// Rendered slot type.
        slot: String,
        /// Rendered annotation.
        annotation: String,
        /// Why the pairing is invalid.
        reason: &'static str,
    },

    /// A config field tag could not be parsed.
    #[error("invalid config field tag `{tag}`: {source}")]
    InvalidTag {
        /// Tag as supplied.
        tag: String,
        /// Parse failure.
        #[source]
        source: crate::TagParseError,
    },

    /// Providers depend on each other in a loop.
    #[error("cyclic dependency detected: {cycle}")]
    CyclicDependency {
        /// Chain of keys participating in the cycle.
        cycle: String,
    },

    /// Config extraction ran against an empty provider group.
    #[error("no config providers were supplied")]
    NoConfigProviders,

    /// A provider's constructor returned an error.
    #[error("failed to build {key}: {source}")]
    Constructor {
        /// Rendered key of the failing provider.
        key: String,
        /// Error returned by the constructor.
        #[source]
        source: BoxError,
    },

    /// A cached value did not have the type its key promised.
    #[error("value registered for {key} is not a {expected}")]
    TypeMismatch {
        /// Rendered key of the provider.
        key: String,
        /// Type the slot expected.
        expected: &'static str,
    },

    /// A configuration document could not be decoded into the requested field.
    #[error("unable to unmarshal config from '{origin}': {source}")]
    Unmarshal {
        /// Identifier or path of the configuration source.
        origin: String,
        /// Decoder or deserializer failure.
        #[source]
        source: BoxError,
    },

    /// An adapter was built over a function whose shape does not fit its annotations.
    #[error(
        "adapter input must be a function accepting at least {expected} parameters, \
         got one accepting {actual}"
    )]
    InvalidTarget {
        /// Number of annotations supplied.
        expected: usize,
        /// Parameters accepted by the wrapped function.
        actual: usize,
    },

    /// An invoked function returned an error.
    #[error("invoke failed: {source}")]
    Invoke {
        /// Error returned by the invoked function.
        #[source]
        source: BoxError,
    },
}

/// Coarse classification of [`FxxError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Aborts the container build before any invocation runs.
    Composition,
    /// Raised while satisfying declared dependencies.
    Resolution,
    /// A resolution failure caused by a configuration decoder.
    Unmarshal,
    /// A deferred shape error reported when an adapter is invoked.
    Adapter,
    /// A user invocation returned an error.
    Invocation,
}
