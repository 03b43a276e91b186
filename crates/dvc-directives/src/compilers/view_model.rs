//! `@viewModel Type`: the data context of the file.

use dvc_parser::GrammarEntryPoint;
use dvc_scanner::{DirectiveArena, DirectiveIndex, RawDirectiveNode};
use dvc_types::{ImportList, TypeDescriptor};

use crate::directive::{Directive, ViewModelDeclaration};
use crate::engine::{DirectiveCompiler, DirectiveError, parse_directive, single_directive};
use crate::tree_builder::TreeBuilder;

pub const VIEW_MODEL_DIRECTIVE: &str = "viewModel";

pub struct ViewModelDirectiveCompiler<'a, B> {
    builder: &'a B,
    imports: &'a ImportList,
}

impl<'a, B: TreeBuilder> ViewModelDirectiveCompiler<'a, B> {
    #[must_use]
    pub fn new(builder: &'a B, imports: &'a ImportList) -> Self {
        Self { builder, imports }
    }
}

impl<B: TreeBuilder> DirectiveCompiler for ViewModelDirectiveCompiler<'_, B> {
    type Payload = ViewModelDeclaration;
    /// `None` when the file has no `@viewModel`.
    type Artefact = Option<TypeDescriptor>;

    fn directive_name(&self) -> &'static str {
        VIEW_MODEL_DIRECTIVE
    }

    fn resolve(&mut self, node: &mut RawDirectiveNode, index: DirectiveIndex) -> Directive<ViewModelDeclaration> {
        let type_syntax = parse_directive(node, GrammarEntryPoint::TypeName);
        self.builder
            .build_view_model_directive(node, index, type_syntax, self.imports)
    }

    fn create_artefact(
        &mut self,
        _arena: &mut DirectiveArena,
        directives: &mut [Directive<ViewModelDeclaration>],
    ) -> Result<Option<TypeDescriptor>, DirectiveError> {
        Ok(single_directive(VIEW_MODEL_DIRECTIVE, directives)?
            .map(|directive| directive.resolved_type.clone()))
    }
}
