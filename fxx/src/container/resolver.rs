//! Per-resolution view of a container.

use std::any::Any;
use std::cell::RefCell;
use std::sync::Arc;

use super::{Container, Key, Registered};
use crate::{FxxError, FxxResult};

/// Type-erased shared value produced by a provider.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// Resolves keys against a [`Container`], tracking the providers under
/// construction so dependency cycles are reported instead of deadlocking.
///
/// Each top-level resolution gets its own resolver; the container itself is
/// shared immutably.
pub struct Resolver<'c> {
    container: &'c Container,
    stack: RefCell<Vec<(usize, Key)>>,
}

impl<'c> Resolver<'c> {
    pub(super) const fn new(container: &'c Container) -> Self {
        Self {
            container,
            stack: RefCell::new(Vec::new()),
        }
    }

    /// Container this resolver reads from.
    #[must_use]
    pub const fn container(&self) -> &'c Container {
        self.container
    }

    /// Build (or fetch the cached value of) the provider registered under a
    /// type or name key.
    ///
    /// Returns `Ok(None)` when nothing is registered under `key`.
    ///
    /// # Errors
    ///
    /// Propagates the provider's construction failure.
    pub fn single(&self, key: &Key) -> FxxResult<Option<AnyArc>> {
        self.container
            .single_entry(key)
            .map(|entry| self.build(entry))
            .transpose()
    }

    /// Build every member of a group, in registration order.
    ///
    /// An unknown group yields an empty list.
    ///
    /// # Errors
    ///
    /// Propagates the first member's construction failure.
    pub fn group(&self, key: &Key) -> FxxResult<Vec<AnyArc>> {
        self.container
            .group_entries(key)
            .iter()
            .map(|entry| self.build(entry))
            .collect()
    }

    fn build(&self, entry: &Registered) -> FxxResult<AnyArc> {
        if let Some(value) = entry.value.get() {
            return value.clone();
        }
        let _constructing = self.container.construction.lock();
        self.enter(entry)?;
        let value = entry
            .value
            .get_or_init(|| {
                tracing::trace!(key = %entry.key, "constructing provider");
                (entry.constructor)(self, &entry.key)
            })
            .clone();
        self.stack.borrow_mut().pop();
        value
    }

    fn enter(&self, entry: &Registered) -> FxxResult<()> {
        let mut stack = self.stack.borrow_mut();
        if let Some(start) = stack.iter().position(|(id, _)| *id == entry.id) {
            let mut cycle: Vec<String> = stack
                .iter()
                .skip(start)
                .map(|(_, key)| key.to_string())
                .collect();
            cycle.push(entry.key.to_string());
            return Err(Arc::new(FxxError::CyclicDependency {
                cycle: cycle.join(" -> "),
            }));
        }
        stack.push((entry.id, entry.key.clone()));
        Ok(())
    }
}

/// Recover the concrete type of a value produced under `key`.
pub(crate) fn downcast<T: Send + Sync + 'static>(value: AnyArc, key: &Key) -> FxxResult<Arc<T>> {
    value.downcast::<T>().map_err(|_| {
        Arc::new(FxxError::TypeMismatch {
            key: key.to_string(),
            expected: std::any::type_name::<T>(),
        })
    })
}
