//! Provider registration records.

use std::fmt;
use std::sync::Arc;

use super::{AnyArc, Constructor, Key, Resolver};
use crate::{Adapter, BoxError, Callable, FxxError, Params, WithAnnotated};

/// A producer of one typed value, keyed by type, name or group.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fxx::{App, Provide};
///
/// struct Pool(&'static str);
///
/// let app = App::new([
///     Provide::value(Pool("primary")).into(),
///     Provide::value(Pool("replica")).named("ro").into(),
/// ])?;
/// let pool: Arc<Pool> = app.resolve()?;
/// assert_eq!(pool.0, "primary");
/// # Ok::<(), std::sync::Arc<fxx::FxxError>>(())
/// ```
pub struct Provide {
    key: Key,
    constructor: Constructor,
}

impl Provide {
    /// Provide the `Ok` value returned by `constructor`, whose parameters are
    /// resolved by type identity.
    #[must_use]
    pub fn new<F, Args, T, E>(constructor: F) -> Self
    where
        F: Callable<Args, Output = Result<T, E>>,
        Args: 'static,
        T: Send + Sync + 'static,
        E: Into<BoxError> + 'static,
    {
        Self::from_adapter(WithAnnotated::default().build(constructor))
    }

    /// Provide the `Ok` value returned by an adapter.
    #[must_use]
    pub fn from_adapter<T, E>(adapter: Adapter<Result<T, E>>) -> Self
    where
        T: Send + Sync + 'static,
        E: Into<BoxError> + 'static,
    {
        Self {
            key: Key::of::<T>(),
            constructor: Box::new(move |resolver: &Resolver<'_>, key: &Key| {
                match adapter.invoke(resolver)? {
                    Ok(value) => Ok(Arc::new(value) as AnyArc),
                    Err(err) => Err(FxxError::constructor(key, err)),
                }
            }),
        }
    }

    /// Provide the `Ok` value returned by a function taking a [`Params`] struct.
    #[must_use]
    pub fn params<S, F, T, E>(constructor: F) -> Self
    where
        S: Params,
        F: Fn(S) -> Result<T, E> + Send + Sync + 'static,
        T: Send + Sync + 'static,
        E: Into<BoxError> + 'static,
    {
        Self::from_adapter(Adapter::from_params(constructor))
    }

    /// Provide an already-built value.
    #[must_use]
    pub fn value<T: Send + Sync + 'static>(value: T) -> Self {
        let shared: AnyArc = Arc::new(value);
        Self {
            key: Key::of::<T>(),
            constructor: Box::new(move |_: &Resolver<'_>, _: &Key| Ok(Arc::clone(&shared))),
        }
    }

    /// Register under `name`; the value is then only reachable by that name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.key = Key::Named(self.key.ty(), name.into());
        self
    }

    /// Append to `group` instead of registering by type.
    #[must_use]
    pub fn grouped(mut self, group: impl Into<String>) -> Self {
        self.key = Key::Group(self.key.ty(), group.into());
        self
    }

    /// Key this provider registers under.
    #[must_use]
    pub const fn key(&self) -> &Key {
        &self.key
    }

    pub(super) fn into_parts(self) -> (Key, Constructor) {
        (self.key, self.constructor)
    }
}

impl fmt::Debug for Provide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provide")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
