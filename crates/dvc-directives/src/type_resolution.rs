//! Resolution of `TypeReference` syntax against the import list.

use dvc_parser::{BindingNode, NodeKind, TypeReference, TypeReferenceKind};
use dvc_types::{ImportList, TypeDescriptor, TypeId, TypeResolver};

/// How generic references with unresolved arguments are treated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolutionMode {
    /// Every part must resolve.
    Strict,
    /// `List<Unknown>` falls back to the open `List<>` definition.
    Lenient,
}

/// Resolve `reference`; failures keep the written name in
/// `TypeDescriptor::Unresolved`.
#[must_use]
pub fn resolve_type_reference(
    resolver: &dyn TypeResolver,
    reference: &TypeReference,
    imports: &ImportList,
    mode: ResolutionMode,
) -> TypeDescriptor {
    TypeReferenceResolver {
        resolver,
        imports,
        mode,
    }
    .resolve(reference)
    .map_or_else(
        || TypeDescriptor::unresolved(reference.to_string()),
        TypeDescriptor::Resolved,
    )
}

/// Resolve the type of an attribute reference: `Name` is looked up as
/// `NameAttribute` first, then as written.
#[must_use]
pub fn resolve_attribute_type(
    resolver: &dyn TypeResolver,
    reference: &TypeReference,
    imports: &ImportList,
) -> TypeDescriptor {
    if let TypeReferenceKind::Actual(node) = &reference.kind {
        if let Some(name) = node.qualified_name() {
            let attribute = format!("{name}Attribute");
            if let Some(id) = resolver.resolve_type_definition(&attribute, 0, imports) {
                return TypeDescriptor::Resolved(id);
            }
        }
    }
    resolve_type_reference(resolver, reference, imports, ResolutionMode::Strict)
}

struct TypeReferenceResolver<'a> {
    resolver: &'a dyn TypeResolver,
    imports: &'a ImportList,
    mode: ResolutionMode,
}

impl TypeReferenceResolver<'_> {
    fn resolve(&self, reference: &TypeReference) -> Option<TypeId> {
        let types = self.resolver.types();
        match &reference.kind {
            TypeReferenceKind::Actual(node) => self.resolve_name(node),
            TypeReferenceKind::Array(element) => {
                self.resolve(element).map(|element| types.array_of(element))
            }
            TypeReferenceKind::Nullable(inner) => {
                let inner = self.resolve(inner)?;
                // `T?` on a reference type is the type itself.
                if types.is_value_type(inner) && types.nullable_underlying(inner).is_none() {
                    types.nullable(inner)
                } else {
                    Some(inner)
                }
            }
        }
    }

    fn resolve_name(&self, node: &BindingNode) -> Option<TypeId> {
        match &node.kind {
            NodeKind::Name(identifier) if !identifier.is_missing() => {
                self.resolve_generic(&identifier.name, &[])
            }
            NodeKind::GenericName {
                name,
                type_arguments,
            } => self.resolve_generic(&name.name, type_arguments),
            NodeKind::MemberAccess { target, member } => {
                let prefix = target.qualified_name()?;
                match &member.kind {
                    NodeKind::Name(identifier) if !identifier.is_missing() => {
                        self.resolve_generic(&format!("{prefix}.{}", identifier.name), &[])
                    }
                    NodeKind::GenericName {
                        name,
                        type_arguments,
                    } => self.resolve_generic(&format!("{prefix}.{}", name.name), type_arguments),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn resolve_generic(&self, name: &str, type_arguments: &[TypeReference]) -> Option<TypeId> {
        let resolved: Option<Vec<TypeId>> =
            type_arguments.iter().map(|a| self.resolve(a)).collect();
        match resolved {
            Some(arguments) => self
                .resolver
                .resolve_type(name, &arguments, self.imports)
                .type_id(),
            None if self.mode == ResolutionMode::Lenient => {
                self.resolver
                    .resolve_type_definition(name, type_arguments.len(), self.imports)
            }
            None => None,
        }
    }
}
