//! Type identifiers and definitions.

use bitflags::bitflags;
use serde::Serialize;
use smallvec::SmallVec;

// =============================================================================
// TypeId
// =============================================================================

/// Handle of a type stored in a `TypeRegistry`.
///
/// Ids below `TypeId::FIRST_USER` are builtins registered by
/// `TypeRegistry::new` and are identical in every registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const INVALID: Self = Self(0);

    pub const OBJECT: Self = Self(1);
    pub const STRING: Self = Self(2);
    pub const BOOLEAN: Self = Self(3);
    pub const CHAR: Self = Self(4);
    pub const INT32: Self = Self(5);
    pub const INT64: Self = Self(6);
    pub const DOUBLE: Self = Self(7);
    pub const GUID: Self = Self(8);
    pub const ARRAY: Self = Self(9);
    /// `System.Nullable`1`
    pub const NULLABLE: Self = Self(10);
    pub const IENUMERABLE: Self = Self(11);
    /// `System.Collections.Generic.IEnumerable`1`
    pub const IENUMERABLE_T: Self = Self(12);
    /// `System.Collections.Generic.List`1`
    pub const LIST: Self = Self(13);
    /// `System.Collections.Generic.Dictionary`2`
    pub const DICTIONARY: Self = Self(14);

    pub const DOTVVM_BINDABLE_OBJECT: Self = Self(15);
    pub const DOTVVM_CONTROL: Self = Self(16);
    pub const HTML_GENERIC_CONTROL: Self = Self(17);
    /// Base of every markup control (`.dotcontrol` files).
    pub const DOTVVM_MARKUP_CONTROL: Self = Self(18);
    /// Base of pages and master pages.
    pub const DOTVVM_VIEW: Self = Self(19);
    pub const MARKUP_OPTIONS_ATTRIBUTE: Self = Self(20);

    pub const FIRST_USER: u32 = 21;

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

// =============================================================================
// Flags and shapes
// =============================================================================

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u16 {
        const VALUE_TYPE = 1 << 0;
        const INTERFACE = 1 << 1;
        const ABSTRACT = 1 << 2;
        /// Open generic definition such as ``List`1``.
        const GENERIC_DEFINITION = 1 << 3;
        const ATTRIBUTE = 1 << 4;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeShape {
    /// A type defined by name.
    Named,
    /// `element[]`
    Array { element: TypeId },
    /// A generic definition applied to arguments; `Nullable<T>` included.
    Constructed {
        definition: TypeId,
        arguments: SmallVec<[TypeId; 2]>,
    },
}

/// Registration metadata of a control (`[ControlMarkupOptions]`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ControlMarkupOptions {
    pub primary_name: Option<String>,
    pub alternative_names: Vec<String>,
}

impl ControlMarkupOptions {
    /// True when the control renames its tag or adds alternative tags. An
    /// empty primary name keeps the default tag.
    #[must_use]
    pub fn declares_tag_names(&self) -> bool {
        self.primary_name.as_deref().is_some_and(|name| !name.is_empty())
            || !self.alternative_names.is_empty()
    }
}

// =============================================================================
// TypeDefinition
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct TypeDefinition {
    /// Empty for arrays and constructed types.
    pub namespace: String,
    /// Metadata name, with a `` `N `` arity suffix on generic definitions.
    pub name: String,
    pub flags: TypeFlags,
    pub shape: TypeShape,
    pub base: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    pub generic_arity: u32,
    /// Settable properties with their types (used for attribute arguments).
    pub properties: Vec<(String, TypeId)>,
    pub markup_options: Option<ControlMarkupOptions>,
}

impl TypeDefinition {
    /// A reference type `namespace.name` deriving from `object`.
    #[must_use]
    pub fn class(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            flags: TypeFlags::empty(),
            shape: TypeShape::Named,
            base: Some(TypeId::OBJECT),
            interfaces: Vec::new(),
            generic_arity: 0,
            properties: Vec::new(),
            markup_options: None,
        }
    }

    #[must_use]
    pub fn value_type(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::class(namespace, name).with_flags(TypeFlags::VALUE_TYPE)
    }

    #[must_use]
    pub fn interface(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let mut definition = Self::class(namespace, name).with_flags(TypeFlags::INTERFACE);
        definition.base = None;
        definition
    }

    /// Open generic definition; `name` is given without the arity suffix.
    #[must_use]
    pub fn generic(namespace: impl Into<String>, name: &str, arity: u32) -> Self {
        let mut definition = Self::class(namespace, format!("{name}`{arity}"))
            .with_flags(TypeFlags::GENERIC_DEFINITION);
        definition.generic_arity = arity;
        definition
    }

    #[must_use]
    pub fn with_flags(mut self, flags: TypeFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn with_base(mut self, base: TypeId) -> Self {
        self.base = Some(base);
        self
    }

    #[must_use]
    pub fn with_interface(mut self, interface: TypeId) -> Self {
        self.interfaces.push(interface);
        self
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, property_type: TypeId) -> Self {
        self.properties.push((name.into(), property_type));
        self
    }

    #[must_use]
    pub fn with_markup_options(mut self, options: ControlMarkupOptions) -> Self {
        self.markup_options = Some(options);
        self
    }

    /// `namespace.name`, or just `name` for namespace-less types.
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Name without the generic arity suffix.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.name
            .split_once('`')
            .map_or(self.name.as_str(), |(name, _)| name)
    }

    #[must_use]
    pub const fn is_value_type(&self) -> bool {
        self.flags.contains(TypeFlags::VALUE_TYPE)
    }

    #[must_use]
    pub const fn is_generic_definition(&self) -> bool {
        self.flags.contains(TypeFlags::GENERIC_DEFINITION)
    }
}
