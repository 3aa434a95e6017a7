//! Constructors and classification helpers for `FxxError`.

use std::path::Path;
use std::sync::Arc;

use super::{BoxError, ErrorKind, FxxError};

impl FxxError {
    /// Classify this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use fxx::{ErrorKind, FxxError};
    /// assert_eq!(FxxError::NoConfigProviders.kind(), ErrorKind::Resolution);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ReadConfigFile { .. }
            | Self::DuplicateProvider { .. }
            | Self::InvalidTag { .. } => ErrorKind::Composition,
            Self::Unmarshal { .. } => ErrorKind::Unmarshal,
            Self::InvalidTarget { .. } => ErrorKind::Adapter,
            Self::Invoke { .. } => ErrorKind::Invocation,
            Self::MissingDependency { .. }
            | Self::NoEmptyValue { .. }
            | Self::SlotMismatch { .. }
            | Self::CyclicDependency { .. }
            | Self::NoConfigProviders
            | Self::Constructor { .. }
            | Self::TypeMismatch { .. } => ErrorKind::Resolution,
        }
    }

    /// Returns `true` for errors that abort composition.
    #[must_use]
    pub const fn is_composition(&self) -> bool {
        matches!(self.kind(), ErrorKind::Composition)
    }

    /// Returns `true` for resolution failures, decoder failures included.
    #[must_use]
    pub const fn is_resolution(&self) -> bool {
        matches!(self.kind(), ErrorKind::Resolution | ErrorKind::Unmarshal)
    }

    /// Construct a [`FxxError::ReadConfigFile`] wrapped in an [`Arc`].
    pub(crate) fn read_config_file(path: &Path, source: std::io::Error) -> Arc<Self> {
        Arc::new(Self::ReadConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Construct a [`FxxError::Unmarshal`] wrapped in an [`Arc`].
    pub(crate) fn unmarshal(origin: &str, source: impl Into<BoxError>) -> Arc<Self> {
        Arc::new(Self::Unmarshal {
            origin: origin.to_owned(),
            source: source.into(),
        })
    }

    /// Construct a [`FxxError::Constructor`] wrapped in an [`Arc`].
    pub(crate) fn constructor(key: impl ToString, source: impl Into<BoxError>) -> Arc<Self> {
        Arc::new(Self::Constructor {
            key: key.to_string(),
            source: source.into(),
        })
    }

    /// Construct a [`FxxError::Invoke`] wrapped in an [`Arc`].
    pub(crate) fn invoke(source: impl Into<BoxError>) -> Arc<Self> {
        Arc::new(Self::Invoke {
            source: source.into(),
        })
    }

    /// Walk the source chain and return the first [`FxxError`] that is not a
    /// [`FxxError::Constructor`] or [`FxxError::Invoke`] wrapper.
    ///
    /// Constructors and invocations box the errors they return, so a failure
    /// raised deep inside an extractor surfaces wrapped in one or more layers.
    #[must_use]
    pub fn root(&self) -> &Self {
        let mut current = self;
        loop {
            let source = match current {
                Self::Constructor { source, .. } | Self::Invoke { source } => source,
                _ => return current,
            };
            match downcast_fxx(source.as_ref()) {
                Some(inner) => current = inner,
                None => return current,
            }
        }
    }
}

fn downcast_fxx<'a>(
    err: &'a (dyn std::error::Error + Send + Sync + 'static),
) -> Option<&'a FxxError> {
    err.downcast_ref::<FxxError>()
        .or_else(|| err.downcast_ref::<Arc<FxxError>>().map(AsRef::as_ref))
}
