//! Tree builders.
//!
//! Directive compilers check the shape of a directive; a `TreeBuilder`
//! turns the checked pieces into typed directives and properties. There are
//! exactly two builders, chosen when the pipeline is constructed:
//!
//! - `ResolvedTreeBuilder` resolves every type strictly, evaluates property
//!   initializers and registers properties only for usable runtime types.
//! - `DesignTimeTreeBuilder` tolerates partially resolved generics, skips
//!   evaluation and registers design-time properties for anything that
//!   resolved at all.

mod design_time;
mod resolved;

pub use design_time::DesignTimeTreeBuilder;
pub use resolved::ResolvedTreeBuilder;

use std::sync::Arc;

use dvc_common::diagnostic_codes;
use dvc_parser::{BindingNode, Identifier, NodeKind, TypeReference};
use dvc_scanner::{DirectiveIndex, RawDirectiveNode};
use dvc_types::{
    ConstantValue, ImportList, NamespaceImport, TypeDescriptor, TypeRegistry, TypeResolver,
    convert_constant,
};
use tracing::debug;

use crate::constant_eval::literal_constant;
use crate::directive::{
    BaseTypeDeclaration, Directive, ImportDeclaration, PropertyAttributeReference,
    PropertyDeclaration, ViewModelDeclaration,
};
use crate::property_registry::{DotvvmProperty, PropertyRegistry};
use crate::type_resolution::{ResolutionMode, resolve_attribute_type, resolve_type_reference};

/// Checked pieces of a `@property` value.
#[derive(Clone, Debug)]
pub struct PropertyDeclarationSlots {
    pub value_syntax: BindingNode,
    pub type_syntax: TypeReference,
    pub name: Identifier,
    pub initializer: Option<BindingNode>,
    pub attributes: Vec<PropertyAttributeReference>,
}

/// Checked pieces of one `Attribute.Property = literal` element.
#[derive(Clone, Debug)]
pub struct AttributeSlots {
    pub type_syntax: TypeReference,
    pub property_name: Identifier,
    pub value_syntax: BindingNode,
    /// The element is not in `Attribute.Property = value` form; the slots
    /// are placeholders and nothing is resolved.
    pub malformed: bool,
    /// The value is missing or not a literal; `value_syntax` is an empty
    /// placeholder literal.
    pub value_missing: bool,
}

pub trait TreeBuilder {
    fn resolver(&self) -> &dyn TypeResolver;

    fn is_design_time(&self) -> bool;

    fn resolution_mode(&self) -> ResolutionMode;

    /// Initial value of a declared property, with diagnostics attached to
    /// `node`.
    fn evaluate_initial_value(
        &self,
        node: &mut RawDirectiveNode,
        name: &Identifier,
        property_type: &TypeDescriptor,
        initializer: Option<&BindingNode>,
        imports: &ImportList,
    ) -> Option<ConstantValue>;

    /// Whether a declaration is turned into a registered property.
    fn has_property_type(&self, directive: &Directive<PropertyDeclaration>) -> bool;

    /// Register the property described by `directive`.
    fn create_property(
        &self,
        registry: &mut PropertyRegistry,
        node: &mut RawDirectiveNode,
        directive: &Directive<PropertyDeclaration>,
    ) -> Option<Arc<DotvvmProperty>>;

    // =========================================================================
    // Shared building steps
    // =========================================================================

    /// Resolve a type reference; a non-empty unresolved name is reported on
    /// the node at the reference span.
    fn resolve_declared_type(
        &self,
        node: &mut RawDirectiveNode,
        reference: &TypeReference,
        imports: &ImportList,
    ) -> TypeDescriptor {
        let resolved = resolve_type_reference(self.resolver(), reference, imports, self.resolution_mode());
        if let TypeDescriptor::Unresolved { name } = &resolved {
            if !name.is_empty() {
                debug!(name = %name, "type reference unresolved");
                node.add_error_at(diagnostic_codes::COULD_NOT_RESOLVE_TYPE, &[name.as_str()], reference.span);
            }
        }
        resolved
    }

    /// A value that did not parse cleanly resolves to `Unresolved` with the
    /// written value; the base-type compiler reports it when combining.
    fn build_base_type_directive(
        &self,
        node: &RawDirectiveNode,
        index: DirectiveIndex,
        type_syntax: BindingNode,
        imports: &ImportList,
    ) -> Directive<BaseTypeDeclaration> {
        let resolved_type = match type_syntax.as_type_reference() {
            Some(reference) if !node.has_errors() => {
                resolve_type_reference(self.resolver(), reference, imports, self.resolution_mode())
            }
            _ => TypeDescriptor::unresolved(node.value()),
        };
        Directive::new(
            node,
            index,
            BaseTypeDeclaration {
                type_syntax,
                resolved_type,
            },
        )
    }

    fn build_view_model_directive(
        &self,
        node: &mut RawDirectiveNode,
        index: DirectiveIndex,
        type_syntax: BindingNode,
        imports: &ImportList,
    ) -> Directive<ViewModelDeclaration> {
        let resolved_type = match type_syntax.as_type_reference() {
            Some(reference) if !node.has_errors() => self.resolve_declared_type(node, reference, imports),
            _ => TypeDescriptor::unresolved(node.value()),
        };
        Directive::new(
            node,
            index,
            ViewModelDeclaration {
                type_syntax,
                resolved_type,
            },
        )
    }

    fn build_import_directive(
        &self,
        node: &RawDirectiveNode,
        index: DirectiveIndex,
        import: Option<NamespaceImport>,
    ) -> Directive<ImportDeclaration> {
        Directive::new(node, index, ImportDeclaration { import })
    }

    fn build_property_declaration_directive(
        &self,
        node: &mut RawDirectiveNode,
        index: DirectiveIndex,
        slots: PropertyDeclarationSlots,
        imports: &ImportList,
    ) -> Directive<PropertyDeclaration> {
        let property_type = self.resolve_declared_type(node, &slots.type_syntax, imports);
        let initial_value = self.evaluate_initial_value(
            node,
            &slots.name,
            &property_type,
            slots.initializer.as_ref(),
            imports,
        );
        Directive::new(
            node,
            index,
            PropertyDeclaration {
                value_syntax: slots.value_syntax,
                type_syntax: slots.type_syntax,
                name: slots.name,
                initializer: slots.initializer,
                attributes: slots.attributes,
                property_type,
                declaring_type: None,
                initial_value,
            },
        )
    }

    /// Resolve the attribute type and check that it has the property and
    /// that the literal fits the property's type. Malformed slots are kept
    /// as they are; their problem is already reported.
    fn build_property_attribute_reference(
        &self,
        node: &mut RawDirectiveNode,
        slots: AttributeSlots,
        imports: &ImportList,
    ) -> PropertyAttributeReference {
        let AttributeSlots {
            type_syntax,
            property_name,
            value_syntax,
            malformed,
            value_missing,
        } = slots;
        if malformed {
            return PropertyAttributeReference {
                attribute_type: TypeDescriptor::unresolved(type_syntax.to_string()),
                type_syntax,
                property_name,
                value_syntax,
                value: None,
            };
        }

        let types = self.resolver().types();
        let attribute_type = resolve_attribute_type(self.resolver(), &type_syntax, imports);
        let literal = match &value_syntax.kind {
            NodeKind::Literal(literal) if !value_missing => Some(literal_constant(literal)),
            _ => None,
        };
        let value = match &attribute_type {
            TypeDescriptor::Unresolved { name } => {
                node.add_error_at(diagnostic_codes::COULD_NOT_RESOLVE_TYPE, &[name.as_str()], type_syntax.span);
                literal
            }
            TypeDescriptor::Resolved(attribute) => {
                let attribute_name = types.display_name(*attribute);
                match types.property_type(*attribute, &property_name.name) {
                    None => {
                        node.add_error_at(
                            diagnostic_codes::ATTRIBUTE_PROPERTY_NOT_FOUND,
                            &[&attribute_name, &property_name.name],
                            property_name.span,
                        );
                        literal
                    }
                    Some(expected) => {
                        let converted = literal
                            .as_ref()
                            .and_then(|value| convert_constant(types, value, expected));
                        if converted.is_none() && !value_missing {
                            let expected = types.display_name(expected);
                            node.add_error_at(
                                diagnostic_codes::ATTRIBUTE_PROPERTY_VALUE_TYPE,
                                &[&attribute_name, &property_name.name, &expected],
                                value_syntax.span,
                            );
                        }
                        converted
                    }
                }
            }
        };
        PropertyAttributeReference {
            type_syntax,
            attribute_type,
            property_name,
            value_syntax,
            value,
        }
    }
}

/// Register a property built from `directive`, reporting a second
/// declaration of the same name on the directive's name.
pub(crate) fn register_declared_property(
    registry: &mut PropertyRegistry,
    node: &mut RawDirectiveNode,
    directive: &Directive<PropertyDeclaration>,
    types: &TypeRegistry,
    is_design_time: bool,
) -> Option<Arc<DotvvmProperty>> {
    let property = DotvvmProperty::from_declaration(directive, is_design_time)?;
    match registry.register(property) {
        Ok(property) => Some(property),
        Err(existing) => {
            let owner = existing.declaring_type.display(types);
            node.add_error_at(
                diagnostic_codes::PROPERTY_ALREADY_DECLARED,
                &[&existing.name, &owner],
                directive.name.span,
            );
            None
        }
    }
}
