//! Builder for editor tooling: lenient types, no evaluation.

use std::sync::Arc;

use dvc_parser::{BindingNode, Identifier};
use dvc_scanner::RawDirectiveNode;
use dvc_types::{ConstantValue, ImportList, TypeDescriptor, TypeResolver};

use super::{TreeBuilder, register_declared_property};
use crate::directive::{Directive, PropertyDeclaration};
use crate::property_registry::{DotvvmProperty, PropertyRegistry};
use crate::type_resolution::ResolutionMode;

pub struct DesignTimeTreeBuilder<'r> {
    resolver: &'r dyn TypeResolver,
}

impl<'r> DesignTimeTreeBuilder<'r> {
    #[must_use]
    pub fn new(resolver: &'r dyn TypeResolver) -> Self {
        Self { resolver }
    }
}

impl TreeBuilder for DesignTimeTreeBuilder<'_> {
    fn resolver(&self) -> &dyn TypeResolver {
        self.resolver
    }

    fn is_design_time(&self) -> bool {
        true
    }

    fn resolution_mode(&self) -> ResolutionMode {
        ResolutionMode::Lenient
    }

    fn evaluate_initial_value(
        &self,
        _node: &mut RawDirectiveNode,
        _name: &Identifier,
        _property_type: &TypeDescriptor,
        _initializer: Option<&BindingNode>,
        _imports: &ImportList,
    ) -> Option<ConstantValue> {
        None
    }

    fn has_property_type(&self, directive: &Directive<PropertyDeclaration>) -> bool {
        directive.property_type.is_resolved()
    }

    fn create_property(
        &self,
        registry: &mut PropertyRegistry,
        node: &mut RawDirectiveNode,
        directive: &Directive<PropertyDeclaration>,
    ) -> Option<Arc<DotvvmProperty>> {
        register_declared_property(registry, node, directive, self.resolver.types(), true)
    }
}
