//! Adapters that let plain functions consume annotated parameter bags.
//!
//! [`with_annotated`] pairs an ordered list of [`Annotation`]s with a function
//! of any supported arity. The resulting [`Adapter`] exposes one slot per
//! function parameter, tagging the first slots with the annotations and
//! leaving the rest to type-identity resolution. Invoking the adapter
//! resolves a [`ParamBag`] for those slots and forwards its fields
//! positionally, returning the function's output unchanged.
//!
//! Building never fails. When more annotations than parameters are supplied
//! the adapter still builds and reports [`FxxError::InvalidTarget`] each time
//! it is invoked, so wiring order does not depend on such mistakes.

mod callable;
mod dependency;
mod params;
mod slot;

use std::fmt;
use std::sync::Arc;

pub use callable::Callable;
pub use dependency::Dependency;
pub use params::Params;
pub use slot::{ParamBag, Slot, SlotType};

use crate::container::Resolver;
use crate::{Annotation, FxxError, FxxResult};

type Forward<Out> = dyn Fn(&mut ParamBag) -> FxxResult<Out> + Send + Sync;

/// Ordered annotations waiting for a function to wrap.
#[derive(Debug, Clone, Default)]
pub struct WithAnnotated {
    annotations: Vec<Annotation>,
}

/// Start building an adapter whose leading slots carry `annotations`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fxx::{Annotation, with_annotated};
///
/// struct Connection;
/// struct Server;
///
/// let adapter = with_annotated([Annotation::by_name("ro")])
///     .build(|_conn: Arc<Connection>, _server: Arc<Server>| ());
/// let tags: Vec<_> = adapter.slots().iter().map(|slot| slot.tag().cloned()).collect();
/// assert_eq!(tags, vec![Some(Annotation::by_name("ro")), None]);
/// ```
#[must_use]
pub fn with_annotated<I>(annotations: I) -> WithAnnotated
where
    I: IntoIterator<Item = Annotation>,
{
    WithAnnotated {
        annotations: annotations.into_iter().collect(),
    }
}

impl WithAnnotated {
    /// Annotations applied to the leading slots.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Wrap `target`, producing one slot per parameter.
    #[must_use]
    pub fn build<F, Args>(&self, target: F) -> Adapter<F::Output>
    where
        F: Callable<Args>,
        F::Output: 'static,
        Args: 'static,
    {
        let types = F::slot_types();
        let expected = self.annotations.len();
        let actual = types.len();
        let mut tags = self.annotations.iter().cloned();
        let slots: Arc<[Slot]> = types
            .into_iter()
            .enumerate()
            .map(|(index, ty)| Slot::new(index, ty, tags.next()))
            .collect();
        let shape = if expected > actual {
            tracing::debug!(
                expected,
                actual,
                "adapter wraps a function with fewer parameters than annotations"
            );
            Some(FxxError::InvalidTarget { expected, actual })
        } else {
            None
        };
        Adapter {
            slots,
            shape: shape.map(Arc::new),
            forward: Arc::new(move |bag: &mut ParamBag| {
                <F as Callable<Args>>::call(&target, bag)
            }),
        }
    }
}

/// A function wrapped to take a single parameter bag.
pub struct Adapter<Out> {
    slots: Arc<[Slot]>,
    shape: Option<Arc<FxxError>>,
    forward: Arc<Forward<Out>>,
}

impl<Out: 'static> Adapter<Out> {
    /// Build an adapter over a function taking a [`Params`] struct.
    #[must_use]
    pub fn from_params<S, F>(target: F) -> Self
    where
        S: Params,
        F: Fn(S) -> Out + Send + Sync + 'static,
    {
        Self {
            slots: S::slots().into(),
            shape: None,
            forward: Arc::new(move |bag: &mut ParamBag| S::from_bag(bag).map(&target)),
        }
    }

    /// Slot descriptors, one per parameter of the wrapped function.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of parameters of the wrapped function.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    fn check_shape(&self) -> FxxResult<()> {
        self.shape.as_ref().map_or(Ok(()), |err| Err(Arc::clone(err)))
    }

    /// Resolve a parameter bag for this adapter's slots.
    ///
    /// # Errors
    ///
    /// Returns [`FxxError::InvalidTarget`] for a mis-shaped adapter, or the
    /// first slot resolution failure.
    pub fn bag(&self, resolver: &Resolver<'_>) -> FxxResult<ParamBag> {
        self.check_shape()?;
        ParamBag::resolve(Arc::clone(&self.slots), resolver)
    }

    /// Unpack `bag` and call the wrapped function.
    ///
    /// # Errors
    ///
    /// Returns [`FxxError::InvalidTarget`] for a mis-shaped adapter, or
    /// [`FxxError::TypeMismatch`] when the bag does not fit the slots.
    pub fn call(&self, mut bag: ParamBag) -> FxxResult<Out> {
        self.check_shape()?;
        (self.forward)(&mut bag)
    }

    /// Resolve a bag and call the wrapped function with it.
    ///
    /// # Errors
    ///
    /// See [`Adapter::bag`] and [`Adapter::call`].
    pub fn invoke(&self, resolver: &Resolver<'_>) -> FxxResult<Out> {
        let bag = self.bag(resolver)?;
        self.call(bag)
    }
}

impl<Out> Clone for Adapter<Out> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
            shape: self.shape.clone(),
            forward: Arc::clone(&self.forward),
        }
    }
}

impl<Out> fmt::Debug for Adapter<Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("slots", &self.slots)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}
