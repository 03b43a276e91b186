//! Thread-safe type store.
//!
//! A `TypeRegistry` plays the role of the runtime's reflection metadata:
//! named types, constructed generics, arrays and public constant fields.
//! Constructed types are interned, so asking for `List<int>` twice yields the
//! same `TypeId`. All methods take `&self`; one registry can back many
//! parallel file compilations.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::constant::ConstantValue;
use crate::types::{ControlMarkupOptions, TypeDefinition, TypeFlags, TypeId, TypeShape};

static KEYWORD_TYPES: Lazy<FxHashMap<&'static str, TypeId>> = Lazy::new(|| {
    [
        ("object", TypeId::OBJECT),
        ("string", TypeId::STRING),
        ("bool", TypeId::BOOLEAN),
        ("char", TypeId::CHAR),
        ("int", TypeId::INT32),
        ("long", TypeId::INT64),
        ("double", TypeId::DOUBLE),
    ]
    .into_iter()
    .collect()
});

/// Builtin type for a C#-style keyword (`int`, `string`, ...).
#[must_use]
pub fn keyword_type(name: &str) -> Option<TypeId> {
    KEYWORD_TYPES.get(name).copied()
}

fn keyword_name(id: TypeId) -> Option<&'static str> {
    KEYWORD_TYPES
        .iter()
        .find_map(|(keyword, &type_id)| (type_id == id).then_some(*keyword))
}

type GenericKey = (TypeId, SmallVec<[TypeId; 2]>);

pub struct TypeRegistry {
    definitions: DashMap<TypeId, TypeDefinition>,
    by_name: DashMap<String, TypeId>,
    arrays: DashMap<TypeId, TypeId>,
    constructed: DashMap<GenericKey, TypeId>,
    constants: DashMap<(TypeId, String), ConstantValue>,
    next_id: AtomicU32,
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.len())
            .field("constants", &self.constants.len())
            .finish_non_exhaustive()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Registry pre-populated with the builtin types (see `TypeId`).
    #[must_use]
    pub fn new() -> Self {
        let registry = Self {
            definitions: DashMap::new(),
            by_name: DashMap::new(),
            arrays: DashMap::new(),
            constructed: DashMap::new(),
            constants: DashMap::new(),
            next_id: AtomicU32::new(TypeId::FIRST_USER),
        };
        registry.register_builtins();
        registry
    }

    fn register_builtins(&self) {
        let mut object = TypeDefinition::class("System", "Object");
        object.base = None;
        let builtins = [
            (TypeId::OBJECT, object),
            (
                TypeId::STRING,
                TypeDefinition::class("System", "String").with_interface(TypeId::IENUMERABLE),
            ),
            (TypeId::BOOLEAN, TypeDefinition::value_type("System", "Boolean")),
            (TypeId::CHAR, TypeDefinition::value_type("System", "Char")),
            (TypeId::INT32, TypeDefinition::value_type("System", "Int32")),
            (TypeId::INT64, TypeDefinition::value_type("System", "Int64")),
            (TypeId::DOUBLE, TypeDefinition::value_type("System", "Double")),
            (TypeId::GUID, TypeDefinition::value_type("System", "Guid")),
            (
                TypeId::ARRAY,
                TypeDefinition::class("System", "Array")
                    .with_flags(TypeFlags::ABSTRACT)
                    .with_interface(TypeId::IENUMERABLE),
            ),
            (
                TypeId::NULLABLE,
                TypeDefinition::generic("System", "Nullable", 1).with_flags(TypeFlags::VALUE_TYPE),
            ),
            (
                TypeId::IENUMERABLE,
                TypeDefinition::interface("System.Collections", "IEnumerable"),
            ),
            (TypeId::IENUMERABLE_T, {
                let mut definition = TypeDefinition::generic("System.Collections.Generic", "IEnumerable", 1)
                    .with_flags(TypeFlags::INTERFACE)
                    .with_interface(TypeId::IENUMERABLE);
                definition.base = None;
                definition
            }),
            (
                TypeId::LIST,
                TypeDefinition::generic("System.Collections.Generic", "List", 1)
                    .with_interface(TypeId::IENUMERABLE),
            ),
            (
                TypeId::DICTIONARY,
                TypeDefinition::generic("System.Collections.Generic", "Dictionary", 2)
                    .with_interface(TypeId::IENUMERABLE),
            ),
            (
                TypeId::DOTVVM_BINDABLE_OBJECT,
                TypeDefinition::class("DotVVM.Framework.Controls", "DotvvmBindableObject")
                    .with_flags(TypeFlags::ABSTRACT),
            ),
            (
                TypeId::DOTVVM_CONTROL,
                TypeDefinition::class("DotVVM.Framework.Controls", "DotvvmControl")
                    .with_flags(TypeFlags::ABSTRACT)
                    .with_base(TypeId::DOTVVM_BINDABLE_OBJECT),
            ),
            (
                TypeId::HTML_GENERIC_CONTROL,
                TypeDefinition::class("DotVVM.Framework.Controls", "HtmlGenericControl")
                    .with_base(TypeId::DOTVVM_CONTROL),
            ),
            (
                TypeId::DOTVVM_MARKUP_CONTROL,
                TypeDefinition::class("DotVVM.Framework.Controls", "DotvvmMarkupControl")
                    .with_base(TypeId::HTML_GENERIC_CONTROL),
            ),
            (
                TypeId::DOTVVM_VIEW,
                TypeDefinition::class("DotVVM.Framework.Controls.Infrastructure", "DotvvmView")
                    .with_base(TypeId::DOTVVM_CONTROL),
            ),
            (
                TypeId::MARKUP_OPTIONS_ATTRIBUTE,
                TypeDefinition::class("DotVVM.Framework.Binding", "MarkupOptionsAttribute")
                    .with_flags(TypeFlags::ATTRIBUTE)
                    .with_property("Required", TypeId::BOOLEAN)
                    .with_property("AllowBinding", TypeId::BOOLEAN)
                    .with_property("AllowHardCodedValue", TypeId::BOOLEAN)
                    .with_property("Name", TypeId::STRING),
            ),
        ];
        for (id, definition) in builtins {
            self.by_name.insert(definition.full_name(), id);
            self.definitions.insert(id, definition);
        }
    }

    fn allocate(&self) -> TypeId {
        TypeId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn insert(&self, definition: TypeDefinition) -> TypeId {
        let id = self.allocate();
        trace!(type_id = id.0, name = %definition.name, "TypeRegistry::insert");
        self.definitions.insert(id, definition);
        id
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a named type. Registering a full name twice keeps the first
    /// definition and returns its id.
    pub fn register(&self, definition: TypeDefinition) -> TypeId {
        let full_name = definition.full_name();
        *self
            .by_name
            .entry(full_name)
            .or_insert_with(|| self.insert(definition))
    }

    /// Register a public constant field `owner.name`.
    pub fn add_constant(&self, owner: TypeId, name: impl Into<String>, value: ConstantValue) {
        self.constants.insert((owner, name.into()), value);
    }

    pub fn set_markup_options(&self, id: TypeId, options: ControlMarkupOptions) {
        if let Some(mut definition) = self.definitions.get_mut(&id) {
            definition.markup_options = Some(options);
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Type by full metadata name (`System.Collections.Generic.List`1`).
    #[must_use]
    pub fn lookup(&self, full_name: &str) -> Option<TypeId> {
        self.by_name.get(full_name).map(|id| *id)
    }

    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<TypeDefinition> {
        self.definitions.get(&id).map(|d| d.clone())
    }

    #[must_use]
    pub fn contains(&self, id: TypeId) -> bool {
        self.definitions.contains_key(&id)
    }

    #[must_use]
    pub fn constant(&self, owner: TypeId, name: &str) -> Option<ConstantValue> {
        self.constants
            .get(&(owner, name.to_string()))
            .map(|value| value.clone())
    }

    #[must_use]
    pub fn flags(&self, id: TypeId) -> TypeFlags {
        self.definitions
            .get(&id)
            .map_or(TypeFlags::empty(), |d| d.flags)
    }

    #[must_use]
    pub fn shape(&self, id: TypeId) -> Option<TypeShape> {
        self.definitions.get(&id).map(|d| d.shape.clone())
    }

    #[must_use]
    pub fn base(&self, id: TypeId) -> Option<TypeId> {
        self.definitions.get(&id).and_then(|d| d.base)
    }

    #[must_use]
    pub fn markup_options(&self, id: TypeId) -> Option<ControlMarkupOptions> {
        self.definitions
            .get(&id)
            .and_then(|d| d.markup_options.clone())
    }

    /// Type of the settable property `name` declared on `owner` or a base.
    #[must_use]
    pub fn property_type(&self, owner: TypeId, name: &str) -> Option<TypeId> {
        let mut current = Some(owner);
        while let Some(id) = current {
            let definition = self.definitions.get(&id)?;
            if let Some((_, property_type)) = definition.properties.iter().find(|(n, _)| n == name) {
                return Some(*property_type);
            }
            current = definition.base;
        }
        None
    }

    #[must_use]
    pub fn is_value_type(&self, id: TypeId) -> bool {
        self.flags(id).contains(TypeFlags::VALUE_TYPE)
    }

    #[must_use]
    pub fn is_generic_definition(&self, id: TypeId) -> bool {
        self.flags(id).contains(TypeFlags::GENERIC_DEFINITION)
    }

    #[must_use]
    pub fn is_attribute(&self, id: TypeId) -> bool {
        self.flags(id).contains(TypeFlags::ATTRIBUTE)
    }

    /// Element type of an array type.
    #[must_use]
    pub fn element_type(&self, id: TypeId) -> Option<TypeId> {
        match self.shape(id)? {
            TypeShape::Array { element } => Some(element),
            _ => None,
        }
    }

    /// `T` for `Nullable<T>`.
    #[must_use]
    pub fn nullable_underlying(&self, id: TypeId) -> Option<TypeId> {
        match self.shape(id)? {
            TypeShape::Constructed {
                definition,
                arguments,
            } if definition == TypeId::NULLABLE => arguments.first().copied(),
            _ => None,
        }
    }

    /// Definition and arguments of a constructed generic type.
    #[must_use]
    pub fn generic_parts(&self, id: TypeId) -> Option<(TypeId, SmallVec<[TypeId; 2]>)> {
        match self.shape(id)? {
            TypeShape::Constructed {
                definition,
                arguments,
            } => Some((definition, arguments)),
            _ => None,
        }
    }

    // =========================================================================
    // Constructed types
    // =========================================================================

    /// `element[]`, interned.
    pub fn array_of(&self, element: TypeId) -> TypeId {
        *self.arrays.entry(element).or_insert_with(|| {
            let mut definition = TypeDefinition::class("", "");
            definition.shape = TypeShape::Array { element };
            definition.base = Some(TypeId::ARRAY);
            self.insert(definition)
        })
    }

    /// Apply a generic definition to `arguments`. Returns `None` when
    /// `definition` is not a generic definition, the arity differs, or an
    /// argument is itself an open definition.
    pub fn construct_generic(&self, definition: TypeId, arguments: &[TypeId]) -> Option<TypeId> {
        let template = self.get(definition)?;
        if !template.is_generic_definition()
            || template.generic_arity as usize != arguments.len()
            || arguments.iter().any(|&a| !self.contains(a) || self.is_generic_definition(a))
        {
            return None;
        }
        if definition == TypeId::NULLABLE {
            let inner = arguments[0];
            if !self.is_value_type(inner) || self.nullable_underlying(inner).is_some() {
                return None;
            }
        }

        let arguments: SmallVec<[TypeId; 2]> = arguments.iter().copied().collect();
        let key = (definition, arguments.clone());
        let id = *self.constructed.entry(key).or_insert_with(|| {
            let mut constructed = template.clone();
            constructed.flags.remove(TypeFlags::GENERIC_DEFINITION);
            constructed.generic_arity = 0;
            constructed.shape = TypeShape::Constructed {
                definition,
                arguments,
            };
            self.insert(constructed)
        });
        Some(id)
    }

    /// `Nullable<inner>`; `None` for reference types and nullables.
    pub fn nullable(&self, inner: TypeId) -> Option<TypeId> {
        self.construct_generic(TypeId::NULLABLE, &[inner])
    }

    // =========================================================================
    // Relations
    // =========================================================================

    /// Whether a value of type `from` can be stored in a location of type `to`
    /// without conversion (identity, base class, interface, array covariance).
    #[must_use]
    pub fn is_assignable(&self, from: TypeId, to: TypeId) -> bool {
        if from == to || to == TypeId::OBJECT {
            return from != TypeId::INVALID;
        }
        if let Some(from_element) = self.element_type(from) {
            if let Some(to_element) = self.element_type(to) {
                return !self.is_value_type(from_element)
                    && self.is_assignable(from_element, to_element);
            }
            if let Some((TypeId::IENUMERABLE_T, arguments)) = self.generic_parts(to) {
                return self.is_assignable(from_element, arguments[0])
                    && (arguments[0] == from_element || !self.is_value_type(from_element));
            }
        }
        self.inherits(from, to)
    }

    fn inherits(&self, from: TypeId, to: TypeId) -> bool {
        let mut pending: SmallVec<[TypeId; 8]> = SmallVec::new();
        pending.push(from);
        while let Some(id) = pending.pop() {
            if id == to {
                return true;
            }
            if let Some(definition) = self.definitions.get(&id) {
                pending.extend(definition.base);
                pending.extend(definition.interfaces.iter().copied());
            }
        }
        false
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// C#-style short name: `int`, `List<int>`, `int[]`, `Guid?`.
    #[must_use]
    pub fn display_name(&self, id: TypeId) -> String {
        if let Some(keyword) = keyword_name(id) {
            return keyword.to_string();
        }
        self.format_name(id, false)
    }

    /// Namespace-qualified name: `System.Collections.Generic.List<System.Int32>`.
    #[must_use]
    pub fn full_name(&self, id: TypeId) -> String {
        self.format_name(id, true)
    }

    fn format_name(&self, id: TypeId, qualified: bool) -> String {
        let name = |id| {
            if qualified {
                self.full_name(id)
            } else {
                self.display_name(id)
            }
        };
        let Some(definition) = self.get(id) else {
            return format!("<invalid type {}>", id.0);
        };
        match &definition.shape {
            TypeShape::Array { element } => format!("{}[]", name(*element)),
            TypeShape::Constructed {
                definition: TypeId::NULLABLE,
                arguments,
            } => format!("{}?", name(arguments[0])),
            TypeShape::Constructed { arguments, .. } => {
                let arguments: Vec<String> = arguments.iter().map(|&a| name(a)).collect();
                let simple = definition.simple_name();
                let prefix = if qualified && !definition.namespace.is_empty() {
                    format!("{}.{simple}", definition.namespace)
                } else {
                    simple.to_string()
                };
                format!("{prefix}<{}>", arguments.join(", "))
            }
            TypeShape::Named if qualified => definition.full_name(),
            TypeShape::Named => definition.name.clone(),
        }
    }

    /// Number of registered types, builtins and constructed types included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
