//! Type descriptors.

use serde::Serialize;

use crate::registry::TypeRegistry;
use crate::types::TypeId;

/// Result of resolving a type name.
///
/// `Unresolved` keeps the name the author wrote, so every consumer has a
/// value to work with and must decide explicitly what a failed lookup means.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TypeDescriptor {
    Resolved(TypeId),
    Unresolved { name: String },
}

impl TypeDescriptor {
    #[must_use]
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::Unresolved { name: name.into() }
    }

    #[must_use]
    pub const fn type_id(&self) -> Option<TypeId> {
        match self {
            Self::Resolved(id) => Some(*id),
            Self::Unresolved { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// C#-style short name, or the written name when unresolved.
    #[must_use]
    pub fn display(&self, types: &TypeRegistry) -> String {
        match self {
            Self::Resolved(id) => types.display_name(*id),
            Self::Unresolved { name } => name.clone(),
        }
    }

    /// Namespace-qualified name, or the written name when unresolved.
    #[must_use]
    pub fn full_name(&self, types: &TypeRegistry) -> String {
        match self {
            Self::Resolved(id) => types.full_name(*id),
            Self::Unresolved { name } => name.clone(),
        }
    }
}

impl From<TypeId> for TypeDescriptor {
    fn from(id: TypeId) -> Self {
        Self::Resolved(id)
    }
}
