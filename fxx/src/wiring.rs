//! Composition instructions accepted by [`App::new`](crate::App::new).

use std::sync::Arc;

use crate::{FxxError, Invoke, Provide};

/// One composition instruction.
#[derive(Debug)]
#[non_exhaustive]
pub enum Wiring {
    /// Register a provider.
    Provide(Provide),
    /// Run a function after every provider is registered.
    Invoke(Invoke),
    /// Abort composition with an error captured while building the wiring.
    Error(Arc<FxxError>),
    /// Several instructions applied in order.
    Many(Vec<Wiring>),
}

/// Bundle several instructions into one.
///
/// # Examples
///
/// ```
/// use fxx::{App, Provide, options};
///
/// struct Port(u16);
/// struct Host(&'static str);
///
/// let module = options([
///     Provide::value(Port(8080)).into(),
///     Provide::value(Host("localhost")).into(),
/// ]);
/// let app = App::new([module])?;
/// assert_eq!(app.container().len(), 2);
/// # Ok::<(), std::sync::Arc<fxx::FxxError>>(())
/// ```
#[must_use]
pub fn options<I>(wirings: I) -> Wiring
where
    I: IntoIterator<Item = Wiring>,
{
    Wiring::Many(wirings.into_iter().collect())
}

impl From<Provide> for Wiring {
    fn from(provide: Provide) -> Self {
        Self::Provide(provide)
    }
}

impl From<Invoke> for Wiring {
    fn from(invoke: Invoke) -> Self {
        Self::Invoke(invoke)
    }
}

impl From<Arc<FxxError>> for Wiring {
    fn from(err: Arc<FxxError>) -> Self {
        Self::Error(err)
    }
}

impl From<Vec<Self>> for Wiring {
    fn from(wirings: Vec<Self>) -> Self {
        Self::Many(wirings)
    }
}
