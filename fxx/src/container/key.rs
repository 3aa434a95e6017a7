//! Type identity and registration keys.

use std::any::TypeId;
use std::fmt;

/// Identity of a Rust type together with its readable name.
#[derive(Debug, Clone, Copy)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
}

impl TypeDescriptor {
    /// Describe `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Unique identifier of the type.
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Name reported by [`std::any::type_name`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDescriptor {}

impl std::hash::Hash for TypeDescriptor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Key under which a provider is registered.
///
/// Named and grouped providers are only reachable through their annotation,
/// never by bare type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Resolved by type identity alone.
    Type(TypeDescriptor),
    /// Resolved by type and name.
    Named(TypeDescriptor, String),
    /// One member of a value group.
    Group(TypeDescriptor, String),
}

impl Key {
    /// Type-identity key for `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self::Type(TypeDescriptor::of::<T>())
    }

    /// Named key for `T`.
    #[must_use]
    pub fn named<T: 'static>(name: impl Into<String>) -> Self {
        Self::Named(TypeDescriptor::of::<T>(), name.into())
    }

    /// Group key for `T`.
    #[must_use]
    pub fn group<T: 'static>(group: impl Into<String>) -> Self {
        Self::Group(TypeDescriptor::of::<T>(), group.into())
    }

    /// Type produced by providers under this key.
    #[must_use]
    pub const fn ty(&self) -> TypeDescriptor {
        match self {
            Self::Type(ty) | Self::Named(ty, _) | Self::Group(ty, _) => *ty,
        }
    }

    /// Whether this key accumulates several providers.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self, Self::Group(..))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(ty) => write!(f, "{ty}"),
            Self::Named(ty, name) => write!(f, "{ty}[name = {name:?}]"),
            Self::Group(ty, group) => write!(f, "{ty}[group = {group:?}]"),
        }
    }
}
