//! Functions run once every provider is registered.

use std::fmt;

use super::Resolver;
use crate::{Adapter, BoxError, Callable, FxxError, FxxResult, Params, WithAnnotated};

type Run = Box<dyn Fn(&Resolver<'_>) -> FxxResult<()> + Send + Sync>;

/// Values an invoked function may return.
pub trait InvokeOutcome {
    /// Convert into a plain success or failure.
    ///
    /// # Errors
    ///
    /// Returns the function's own error.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl InvokeOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E: Into<BoxError>> InvokeOutcome for Result<(), E> {
    fn into_outcome(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}

/// A function whose parameters are resolved and which runs during startup.
pub struct Invoke {
    run: Run,
}

impl Invoke {
    /// Invoke `target` with parameters resolved by type identity.
    #[must_use]
    pub fn new<F, Args>(target: F) -> Self
    where
        F: Callable<Args>,
        F::Output: InvokeOutcome + 'static,
        Args: 'static,
    {
        Self::from_adapter(WithAnnotated::default().build(target))
    }

    /// Invoke an adapter.
    #[must_use]
    pub fn from_adapter<Out>(adapter: Adapter<Out>) -> Self
    where
        Out: InvokeOutcome + 'static,
    {
        Self {
            run: Box::new(move |resolver: &Resolver<'_>| {
                adapter
                    .invoke(resolver)?
                    .into_outcome()
                    .map_err(FxxError::invoke)
            }),
        }
    }

    /// Invoke a function taking a [`Params`] struct.
    #[must_use]
    pub fn params<S, F, Out>(target: F) -> Self
    where
        S: Params,
        F: Fn(S) -> Out + Send + Sync + 'static,
        Out: InvokeOutcome + 'static,
    {
        Self::from_adapter(Adapter::from_params(target))
    }

    pub(super) fn run(&self, resolver: &Resolver<'_>) -> FxxResult<()> {
        (self.run)(resolver)
    }
}

impl fmt::Debug for Invoke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invoke").finish_non_exhaustive()
    }
}
