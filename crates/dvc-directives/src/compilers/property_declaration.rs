//! `@property Type Name = initializer, Attribute.Property = value`

use std::sync::Arc;

use dvc_common::diagnostic_codes;
use dvc_parser::{
    BinaryOperator, BindingNode, GrammarEntryPoint, Identifier, NodeKind, PropertyDeclarationSyntax,
    TypeReference,
};
use dvc_scanner::{DirectiveArena, DirectiveIndex, RawDirectiveNode};
use dvc_types::{ImportList, TypeDescriptor};
use tracing::debug;

use crate::directive::{Directive, PropertyDeclaration};
use crate::engine::{DirectiveCompiler, DirectiveError, parse_directive};
use crate::property_registry::{DotvvmProperty, PropertyRegistry};
use crate::tree_builder::{AttributeSlots, PropertyDeclarationSlots, TreeBuilder};

pub const PROPERTY_DIRECTIVE: &str = "property";

pub struct PropertyDeclarationDirectiveCompiler<'a, B> {
    builder: &'a B,
    control_wrapper_type: TypeDescriptor,
    imports: &'a ImportList,
    registry: PropertyRegistry,
}

impl<'a, B: TreeBuilder> PropertyDeclarationDirectiveCompiler<'a, B> {
    #[must_use]
    pub fn new(builder: &'a B, control_wrapper_type: TypeDescriptor, imports: &'a ImportList) -> Self {
        Self {
            builder,
            control_wrapper_type,
            imports,
            registry: PropertyRegistry::new(),
        }
    }

    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> PropertyRegistry {
        self.registry
    }
}

impl<B: TreeBuilder> DirectiveCompiler for PropertyDeclarationDirectiveCompiler<'_, B> {
    type Payload = PropertyDeclaration;
    type Artefact = Vec<Arc<DotvvmProperty>>;

    fn directive_name(&self) -> &'static str {
        PROPERTY_DIRECTIVE
    }

    /// Every shape problem is reported and replaced by a placeholder; the
    /// checks do not stop at the first one.
    fn resolve(&mut self, node: &mut RawDirectiveNode, index: DirectiveIndex) -> Directive<PropertyDeclaration> {
        let value_syntax = parse_directive(node, GrammarEntryPoint::PropertyDeclaration);
        let declaration: Option<&PropertyDeclarationSyntax> = match &value_syntax.kind {
            NodeKind::PropertyDeclaration(declaration) => Some(&**declaration),
            _ => None,
        };
        if declaration.is_none() {
            node.add_error(diagnostic_codes::CANNOT_RESOLVE_PROPERTY_DECLARATION, &[]);
        }

        let type_syntax = match declaration.and_then(|d| d.property_type.as_type_reference()) {
            Some(reference) => reference.clone(),
            None => {
                node.add_error(diagnostic_codes::PROPERTY_TYPE_EXPECTED, &[]);
                TypeReference::named("string", 0)
            }
        };

        let name = match declaration
            .and_then(|d| d.name.as_simple_name())
            .filter(|name| !name.is_missing())
        {
            Some(name) => name.clone(),
            None => {
                node.add_error(diagnostic_codes::PROPERTY_NAME_EXPECTED, &[]);
                Identifier::missing(type_syntax.span.end)
            }
        };

        let initializer = declaration.and_then(|d| d.initializer.clone());
        let attribute_syntaxes = declaration.map_or(&[][..], |d| d.attributes.as_slice());
        let attributes = attribute_syntaxes
            .iter()
            .map(|syntax| {
                let slots = attribute_slots(node, syntax);
                self.builder
                    .build_property_attribute_reference(node, slots, self.imports)
            })
            .collect();

        let slots = PropertyDeclarationSlots {
            type_syntax,
            name,
            initializer,
            attributes,
            value_syntax,
        };
        self.builder
            .build_property_declaration_directive(node, index, slots, self.imports)
    }

    /// Every directive gets the wrapper as its declaring type, even the ones
    /// that are not registered.
    fn create_artefact(
        &mut self,
        arena: &mut DirectiveArena,
        directives: &mut [Directive<PropertyDeclaration>],
    ) -> Result<Vec<Arc<DotvvmProperty>>, DirectiveError> {
        for directive in directives.iter_mut() {
            directive.declaring_type = Some(self.control_wrapper_type.clone());
        }

        let mut properties = Vec::new();
        for directive in directives.iter() {
            if !self.builder.has_property_type(directive) {
                debug!(name = %directive.name.name, "property skipped, type not usable");
                continue;
            }
            let Some(node) = arena.get_mut(directive.node) else {
                continue;
            };
            if let Some(property) = self.builder.create_property(&mut self.registry, node, directive) {
                properties.push(property);
            }
        }
        Ok(properties)
    }
}

/// Split one attribute element into type, property name and literal value.
///
/// Placeholders keep spans monotonic: a missing name sits at the end of the
/// type, a missing value at the end of the name.
fn attribute_slots(node: &mut RawDirectiveNode, syntax: &BindingNode) -> AttributeSlots {
    let NodeKind::Binary {
        operator: BinaryOperator::Assign,
        left,
        right,
    } = &syntax.kind
    else {
        node.add_error(diagnostic_codes::PROPERTY_ATTRIBUTE_FORM, &[]);
        let end = syntax.span.end;
        return AttributeSlots {
            type_syntax: TypeReference::actual(syntax.clone()),
            property_name: Identifier::missing(end),
            value_syntax: BindingNode::empty_literal(end),
            malformed: true,
            value_missing: false,
        };
    };

    let (type_node, property_name) = match &left.kind {
        NodeKind::MemberAccess { target, member } => (
            Some(target.as_ref().clone()),
            member
                .as_simple_name()
                .filter(|name| !name.is_missing())
                .cloned(),
        ),
        _ => (None, None),
    };
    let malformed = type_node.is_none() || property_name.is_none();
    if malformed {
        node.add_error(diagnostic_codes::PROPERTY_ATTRIBUTE_FORM, &[]);
    }
    let type_node = type_node.unwrap_or_else(|| BindingNode::name(Identifier::missing(left.span.start)));
    let property_name = property_name.unwrap_or_else(|| Identifier::missing(type_node.span.end));

    let value_missing = !right.is_literal();
    let value_syntax = if value_missing {
        let attribute = type_node.to_string();
        node.add_error(
            diagnostic_codes::PROPERTY_ATTRIBUTE_VALUE_NOT_CONSTANT,
            &[&property_name.name, &attribute],
        );
        BindingNode::empty_literal(property_name.span.end)
    } else {
        right.as_ref().clone()
    };

    AttributeSlots {
        type_syntax: TypeReference::actual(type_node),
        property_name,
        value_syntax,
        malformed,
        value_missing,
    }
}
