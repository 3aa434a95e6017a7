//! A small container that consumes the shapes adapters produce.
//!
//! Providers register under a [`Key`]; type and name keys are unique while
//! group keys accumulate members in registration order. Values are built
//! lazily on first resolution and cached, failures included.

mod invoke;
mod key;
mod provide;
mod resolver;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::ReentrantMutex;

pub use invoke::{Invoke, InvokeOutcome};
pub use key::{Key, TypeDescriptor};
pub use provide::Provide;
pub use resolver::{AnyArc, Resolver};

pub(crate) use resolver::downcast;

use crate::{Annotation, Dependency, FxxError, FxxResult, Slot, SlotType};

type Constructor = Box<dyn Fn(&Resolver<'_>, &Key) -> FxxResult<AnyArc> + Send + Sync>;

struct Registered {
    id: usize,
    key: Key,
    constructor: Constructor,
    value: OnceLock<FxxResult<AnyArc>>,
}

/// Registry of providers and the cache of the values they built.
///
/// Registration needs `&mut self`; once composition is over the container is
/// shared immutably and may be resolved from several threads. Construction is
/// serialized behind one re-entrant lock, so a cycle reached from two threads
/// is still seen by a single resolver.
#[derive(Default)]
pub struct Container {
    singles: HashMap<Key, Arc<Registered>>,
    groups: HashMap<Key, Vec<Arc<Registered>>>,
    registered: usize,
    construction: ReentrantMutex<()>,
}

impl Container {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider.
    ///
    /// # Errors
    ///
    /// Returns [`FxxError::DuplicateProvider`] when a type or name key is
    /// already taken. Group keys never conflict.
    pub fn provide(&mut self, provide: Provide) -> FxxResult<()> {
        let (key, constructor) = provide.into_parts();
        if !key.is_group() && self.singles.contains_key(&key) {
            return Err(Arc::new(FxxError::DuplicateProvider {
                key: key.to_string(),
            }));
        }
        tracing::debug!(key = %key, "registering provider");
        let entry = Arc::new(Registered {
            id: self.registered,
            key: key.clone(),
            constructor,
            value: OnceLock::new(),
        });
        self.registered += 1;
        if key.is_group() {
            self.groups.entry(key).or_default().push(entry);
        } else {
            self.singles.insert(key, entry);
        }
        Ok(())
    }

    /// Whether anything is registered under `key`.
    #[must_use]
    pub fn contains(&self, key: &Key) -> bool {
        if key.is_group() {
            !self.group_entries(key).is_empty()
        } else {
            self.singles.contains_key(key)
        }
    }

    /// Number of providers registered, groups included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.registered
    }

    /// Whether no provider has been registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.registered == 0
    }

    /// Start a resolution.
    #[must_use]
    pub const fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self)
    }

    /// Resolve a single slot of shape `D`, optionally annotated.
    ///
    /// # Errors
    ///
    /// Returns the slot's resolution failure.
    pub fn resolve<D: Dependency>(&self, tag: Option<Annotation>) -> FxxResult<D> {
        let slot = Slot::new(0, SlotType::of::<D>(), tag);
        D::resolve(&self.resolver(), &slot)
    }

    /// Run an invocation against this container.
    ///
    /// # Errors
    ///
    /// Returns the first resolution failure or the invocation's own error.
    pub fn invoke(&self, invoke: &Invoke) -> FxxResult<()> {
        invoke.run(&self.resolver())
    }

    fn single_entry(&self, key: &Key) -> Option<&Registered> {
        self.singles.get(key).map(AsRef::as_ref)
    }

    fn group_entries(&self, key: &Key) -> &[Arc<Registered>] {
        self.groups.get(key).map_or(&[], Vec::as_slice)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("singles", &self.singles.keys().collect::<Vec<_>>())
            .field(
                "groups",
                &self
                    .groups
                    .iter()
                    .map(|(key, members)| (key, members.len()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
