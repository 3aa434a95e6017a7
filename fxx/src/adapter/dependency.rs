//! Slot shapes the container knows how to fill.

use std::sync::Arc;

use crate::container::{Key, Resolver, TypeDescriptor, downcast};
use crate::{AnnotationKind, FxxError, FxxResult, Slot};

/// A type that can appear as one field of a parameter bag.
///
/// Implemented for three shapes:
///
/// | shape            | lookup                          | empty value |
/// |------------------|---------------------------------|-------------|
/// | `Arc<T>`         | type, or `name` annotation      | none        |
/// | `Option<Arc<T>>` | type, or `name` annotation      | `None`      |
/// | `Vec<Arc<T>>`    | `group` annotation              | `vec![]`    |
///
/// The empty value is used when an optional slot is unsatisfied.
pub trait Dependency: Sized + Send + 'static {
    /// Identity of the slot's Rust type.
    #[must_use]
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Self>()
    }

    /// Value an unsatisfied optional slot resolves to, if the shape has one.
    #[must_use]
    fn empty() -> Option<Self>;

    /// Resolve the slot against `resolver`.
    ///
    /// # Errors
    ///
    /// Returns a resolution error when the slot cannot be satisfied.
    fn resolve(resolver: &Resolver<'_>, slot: &Slot) -> FxxResult<Self>;
}

fn slot_mismatch(slot: &Slot, reason: &'static str) -> Arc<FxxError> {
    Arc::new(FxxError::SlotMismatch {
        slot: slot.to_string(),
        annotation: slot.tag().map(ToString::to_string).unwrap_or_default(),
        reason,
    })
}

fn single_key<T: 'static>(slot: &Slot) -> FxxResult<Key> {
    match slot.tag() {
        None => Ok(Key::of::<T>()),
        Some(tag) => match tag.kind() {
            AnnotationKind::Name => Ok(Key::named::<T>(tag.value())),
            AnnotationKind::Group => Err(slot_mismatch(
                slot,
                "group annotations need a `Vec<Arc<_>>` slot",
            )),
        },
    }
}

fn lookup<T: Send + Sync + 'static>(
    resolver: &Resolver<'_>,
    slot: &Slot,
) -> FxxResult<(Key, Option<Arc<T>>)> {
    let key = single_key::<T>(slot)?;
    let value = resolver
        .single(&key)?
        .map(|value| downcast::<T>(value, &key))
        .transpose()?;
    Ok((key, value))
}

fn unsatisfied<D: Dependency>(slot: &Slot, key: &Key) -> FxxResult<D> {
    if slot.is_optional() {
        tracing::trace!(slot = %slot, "optional slot unsatisfied; using empty value");
        return D::empty().ok_or_else(|| {
            Arc::new(FxxError::NoEmptyValue {
                slot: slot.to_string(),
            })
        });
    }
    Err(Arc::new(FxxError::MissingDependency {
        key: key.to_string(),
        slot: slot.to_string(),
    }))
}

impl<T: Send + Sync + 'static> Dependency for Arc<T> {
    fn empty() -> Option<Self> {
        None
    }

    fn resolve(resolver: &Resolver<'_>, slot: &Slot) -> FxxResult<Self> {
        match lookup::<T>(resolver, slot)? {
            (_, Some(value)) => Ok(value),
            (key, None) => unsatisfied(slot, &key),
        }
    }
}

impl<T: Send + Sync + 'static> Dependency for Option<Arc<T>> {
    fn empty() -> Option<Self> {
        Some(None)
    }

    fn resolve(resolver: &Resolver<'_>, slot: &Slot) -> FxxResult<Self> {
        match lookup::<T>(resolver, slot)? {
            (_, Some(value)) => Ok(Some(value)),
            (key, None) => unsatisfied(slot, &key),
        }
    }
}

impl<T: Send + Sync + 'static> Dependency for Vec<Arc<T>> {
    fn empty() -> Option<Self> {
        Some(Vec::new())
    }

    fn resolve(resolver: &Resolver<'_>, slot: &Slot) -> FxxResult<Self> {
        let Some(tag) = slot.tag().filter(|tag| tag.kind() == AnnotationKind::Group) else {
            return Err(slot_mismatch(
                slot,
                "`Vec<Arc<_>>` slots need a group annotation",
            ));
        };
        let key = Key::group::<T>(tag.value());
        resolver
            .group(&key)?
            .into_iter()
            .map(|value| downcast::<T>(value, &key))
            .collect()
    }
}
