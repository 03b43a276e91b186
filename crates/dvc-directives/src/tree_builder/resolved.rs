//! Builder for the compiled tree: strict types, evaluated initializers.

use std::sync::Arc;

use dvc_common::diagnostic_codes;
use dvc_parser::{BindingNode, Identifier};
use dvc_scanner::RawDirectiveNode;
use dvc_types::{
    ConstantValue, ImportList, TypeDescriptor, TypeResolver, convert_constant, default_value,
};
use tracing::debug;

use super::{TreeBuilder, register_declared_property};
use crate::constant_eval::ConstantEvaluator;
use crate::directive::{Directive, PropertyDeclaration};
use crate::property_registry::{DotvvmProperty, PropertyRegistry};
use crate::type_resolution::ResolutionMode;

pub struct ResolvedTreeBuilder<'r> {
    resolver: &'r dyn TypeResolver,
}

impl<'r> ResolvedTreeBuilder<'r> {
    #[must_use]
    pub fn new(resolver: &'r dyn TypeResolver) -> Self {
        Self { resolver }
    }
}

impl TreeBuilder for ResolvedTreeBuilder<'_> {
    fn resolver(&self) -> &dyn TypeResolver {
        self.resolver
    }

    fn is_design_time(&self) -> bool {
        false
    }

    fn resolution_mode(&self) -> ResolutionMode {
        ResolutionMode::Strict
    }

    /// `default(T)` without an initializer. An initializer that does not
    /// evaluate or convert to `T` is reported and also yields `default(T)`.
    fn evaluate_initial_value(
        &self,
        node: &mut RawDirectiveNode,
        name: &Identifier,
        property_type: &TypeDescriptor,
        initializer: Option<&BindingNode>,
        imports: &ImportList,
    ) -> Option<ConstantValue> {
        let target = property_type.type_id()?;
        let types = self.resolver.types();
        let default = default_value(types, target);
        let Some(initializer) = initializer.filter(|i| !i.is_missing()) else {
            return Some(default);
        };

        let mut evaluator = ConstantEvaluator::new(self.resolver, imports);
        let value = evaluator.evaluate(initializer, Some(target));
        for diagnostic in evaluator.into_diagnostics() {
            node.add_value_diagnostic(diagnostic);
        }
        let Some(value) = value else {
            debug!(property = %name.name, "initializer is not a constant");
            node.add_error_at(
                diagnostic_codes::INITIALIZER_IS_NOT_CONSTANT,
                &[&name.name],
                initializer.span,
            );
            return Some(default);
        };

        if let Some(converted) = convert_constant(types, &value, target) {
            return Some(converted);
        }
        let from = value.type_name(types);
        let to = types.display_name(target);
        node.add_error_at(
            diagnostic_codes::CANNOT_CONVERT_CONSTANT,
            &[&from, &to],
            initializer.span,
        );
        node.add_error_at(
            diagnostic_codes::CANNOT_INITIALIZE_PROPERTY,
            &[&name.name, &to, &from],
            initializer.span,
        );
        Some(default)
    }

    /// Only closed, resolved types can back a runtime property.
    fn has_property_type(&self, directive: &Directive<PropertyDeclaration>) -> bool {
        directive
            .property_type
            .type_id()
            .is_some_and(|id| !self.resolver.types().is_generic_definition(id))
    }

    fn create_property(
        &self,
        registry: &mut PropertyRegistry,
        node: &mut RawDirectiveNode,
        directive: &Directive<PropertyDeclaration>,
    ) -> Option<Arc<DotvvmProperty>> {
        register_declared_property(registry, node, directive, self.resolver.types(), false)
    }
}
