//! Slot descriptors and the parameter bags resolved from them.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::container::{Resolver, TypeDescriptor};
use crate::{Annotation, Dependency, FxxError, FxxResult};

type ErasedValue = Box<dyn Any + Send>;
type ResolveFn = fn(&Resolver<'_>, &Slot) -> FxxResult<ErasedValue>;

/// Type of one parameter bag field together with the resolver for its shape.
#[derive(Clone, Copy)]
pub struct SlotType {
    descriptor: TypeDescriptor,
    resolve: ResolveFn,
}

impl SlotType {
    /// Slot type for the dependency shape `D`.
    #[must_use]
    pub fn of<D: Dependency>() -> Self {
        Self {
            descriptor: D::descriptor(),
            resolve: resolve_erased::<D>,
        }
    }

    /// Identity of the field's Rust type.
    #[must_use]
    pub const fn descriptor(&self) -> TypeDescriptor {
        self.descriptor
    }
}

impl fmt::Debug for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SlotType").field(&self.descriptor.name()).finish()
    }
}

fn resolve_erased<D: Dependency>(resolver: &Resolver<'_>, slot: &Slot) -> FxxResult<ErasedValue> {
    D::resolve(resolver, slot).map(|value| Box::new(value) as ErasedValue)
}

/// One ordered field of a parameter bag.
///
/// Slots without a tag are resolved by type identity alone.
#[derive(Debug, Clone)]
pub struct Slot {
    index: usize,
    ty: SlotType,
    tag: Option<Annotation>,
}

impl Slot {
    /// Describe field `index` of type `ty`, optionally tagged.
    #[must_use]
    pub const fn new(index: usize, ty: SlotType, tag: Option<Annotation>) -> Self {
        Self { index, ty, tag }
    }

    /// Position of the field in the bag and in the wrapped function's parameters.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Field type.
    #[must_use]
    pub const fn ty(&self) -> SlotType {
        self.ty
    }

    /// Selection criterion, if any.
    #[must_use]
    pub const fn tag(&self) -> Option<&Annotation> {
        self.tag.as_ref()
    }

    /// Whether an unsatisfied slot may fall back to its empty value.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.tag.as_ref().is_some_and(Annotation::is_optional)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field{} {}", self.index, self.ty.descriptor)?;
        if let Some(tag) = &self.tag {
            write!(f, " `{tag}`")?;
        }
        Ok(())
    }
}

/// Resolved field values for an ordered slot list.
///
/// A bag is built for one invocation and consumed by the adapter that
/// requested it; each field can be taken once.
pub struct ParamBag {
    slots: Arc<[Slot]>,
    fields: Vec<Option<ErasedValue>>,
}

impl ParamBag {
    /// Resolve every slot in order, failing on the first unsatisfied one.
    pub(crate) fn resolve(slots: Arc<[Slot]>, resolver: &Resolver<'_>) -> FxxResult<Self> {
        let fields = slots
            .iter()
            .map(|slot| {
                tracing::trace!(slot = %slot, "resolving slot");
                (slot.ty.resolve)(resolver, slot).map(Some)
            })
            .collect::<FxxResult<Vec<_>>>()?;
        Ok(Self { slots, fields })
    }

    /// Slot descriptors, in field order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the bag has no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Move field `index` out of the bag as `D`.
    ///
    /// # Errors
    ///
    /// Returns [`FxxError::TypeMismatch`] when the field is absent, was already
    /// taken, or holds a different type.
    pub fn take<D: Dependency>(&mut self, index: usize) -> FxxResult<D> {
        let field = self.fields.get_mut(index).and_then(Option::take);
        match field.map(|erased| erased.downcast::<D>()) {
            Some(Ok(boxed)) => Ok(*boxed),
            _ => Err(Arc::new(FxxError::TypeMismatch {
                key: self
                    .slots
                    .get(index)
                    .map_or_else(|| format!("Field{index}"), ToString::to_string),
                expected: std::any::type_name::<D>(),
            })),
        }
    }
}

impl fmt::Debug for ParamBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamBag")
            .field("slots", &self.slots)
            .field(
                "taken",
                &self.fields.iter().map(Option::is_none).collect::<Vec<_>>(),
            )
            .finish()
    }
}
