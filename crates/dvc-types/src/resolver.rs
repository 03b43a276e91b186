//! Name resolution capability.
//!
//! Directive compilers only see `TypeResolver`; where the metadata comes
//! from is up to the implementation. `TypeRegistry` implements it directly.

use tracing::debug;

use crate::constant::ConstantValue;
use crate::descriptor::TypeDescriptor;
use crate::imports::ImportList;
use crate::registry::{TypeRegistry, keyword_type};
use crate::types::TypeId;

pub trait TypeResolver: Send + Sync {
    /// Registry that owns every `TypeId` this resolver returns.
    fn types(&self) -> &TypeRegistry;

    /// Exact lookup by full metadata name.
    fn find_type(&self, full_name: &str) -> Option<TypeId> {
        self.types().lookup(full_name)
    }

    /// Public constant field `name` of `owner`.
    fn find_constant(&self, owner: TypeId, name: &str) -> Option<ConstantValue> {
        self.types().constant(owner, name)
    }

    /// Resolve a written (possibly dotted, possibly aliased) name to a type
    /// definition with `arity` generic parameters.
    fn resolve_type_definition(&self, name: &str, arity: usize, imports: &ImportList) -> Option<TypeId> {
        if arity == 0 {
            if let Some(id) = keyword_type(name) {
                return Some(id);
            }
        }
        let suffix = if arity > 0 { format!("`{arity}") } else { String::new() };
        let found = imports
            .candidates(name)
            .into_iter()
            .find_map(|candidate| self.find_type(&format!("{candidate}{suffix}")));
        if found.is_none() {
            debug!(name, arity, "type not found");
        }
        found
    }

    /// `resolveType(name, generics)`: resolve the definition and apply the
    /// already resolved type arguments.
    fn resolve_type(&self, name: &str, type_arguments: &[TypeId], imports: &ImportList) -> TypeDescriptor {
        let written = || {
            if type_arguments.is_empty() {
                name.to_string()
            } else {
                let arguments: Vec<String> = type_arguments
                    .iter()
                    .map(|&a| self.types().display_name(a))
                    .collect();
                format!("{name}<{}>", arguments.join(", "))
            }
        };
        let Some(definition) = self.resolve_type_definition(name, type_arguments.len(), imports) else {
            return TypeDescriptor::unresolved(written());
        };
        if type_arguments.is_empty() {
            return TypeDescriptor::Resolved(definition);
        }
        self.types()
            .construct_generic(definition, type_arguments)
            .map_or_else(|| TypeDescriptor::unresolved(written()), TypeDescriptor::Resolved)
    }

    /// `resolveConstant(qualifiedName)`: `Type.Const` resolves `Type` through
    /// the imports; a bare `Const` is looked up on every imported namespace
    /// that names a type.
    fn resolve_constant(&self, qualified_name: &str, imports: &ImportList) -> Option<ConstantValue> {
        let found = match qualified_name.rsplit_once('.') {
            Some((owner, name)) => self
                .resolve_type_definition(owner, 0, imports)
                .and_then(|owner| self.find_constant(owner, name)),
            None => imports
                .iter()
                .filter_map(|import| self.find_type(&import.namespace))
                .find_map(|owner| self.find_constant(owner, qualified_name)),
        };
        if found.is_none() {
            debug!(name = qualified_name, "constant not found");
        }
        found
    }
}

impl TypeResolver for TypeRegistry {
    fn types(&self) -> &TypeRegistry {
        self
    }
}
