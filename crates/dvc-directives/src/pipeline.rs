//! Per-file directive pipeline.
//!
//! Compiles the directive header of one markup file in dependency order:
//! imports first, because every other directive resolves names through
//! them, then the view model, the base type, and finally the properties
//! declared on that base type.

use std::sync::Arc;

use dvc_common::{Diagnostic, Span, diagnostic_codes};
use dvc_scanner::{DirectiveArena, DirectiveIndex, scan_directives};
use dvc_types::{ImportList, TypeDescriptor, TypeResolver};
use tracing::{debug, debug_span};

use crate::compilers::{
    BASE_TYPE_DIRECTIVE, BaseTypeDirectiveCompiler, ImportDirectiveCompiler,
    PropertyDeclarationDirectiveCompiler, VIEW_MODEL_DIRECTIVE, ViewModelDirectiveCompiler,
};
use crate::config::MarkupConfiguration;
use crate::directive::{
    BaseTypeDeclaration, Directive, ImportDeclaration, PropertyDeclaration, ViewModelDeclaration,
};
use crate::engine::{DirectiveCompiler, DirectiveError};
use crate::property_registry::DotvvmProperty;
use crate::tree_builder::{DesignTimeTreeBuilder, ResolvedTreeBuilder, TreeBuilder};

/// Everything the directive header of one file compiles to.
#[derive(Clone, Debug)]
pub struct CompiledDirectives {
    pub file_name: String,
    /// Raw nodes, carrying the per-directive diagnostics.
    pub arena: DirectiveArena,
    /// File imports followed by the configured global imports.
    pub imports: ImportList,
    /// `None` when the file has no `@viewModel`.
    pub view_model_type: Option<TypeDescriptor>,
    pub wrapper_type: TypeDescriptor,
    pub import_directives: Vec<Directive<ImportDeclaration>>,
    pub view_model_directives: Vec<Directive<ViewModelDeclaration>>,
    pub base_type_directives: Vec<Directive<BaseTypeDeclaration>>,
    pub property_directives: Vec<Directive<PropertyDeclaration>>,
    pub properties: Vec<Arc<DotvvmProperty>>,
    /// Diagnostics that belong to no directive.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompiledDirectives {
    /// Node diagnostics in source order, then file-level ones.
    #[must_use]
    pub fn all_diagnostics(&self) -> Vec<Diagnostic> {
        self.arena
            .diagnostics()
            .chain(self.diagnostics.iter())
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.arena.has_errors() || self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn property(&self, name: &str) -> Option<&Arc<DotvvmProperty>> {
        self.properties.iter().find(|property| property.name == name)
    }
}

pub struct MarkupFileCompiler<'a> {
    resolver: &'a dyn TypeResolver,
    config: &'a MarkupConfiguration,
    global_imports: ImportList,
}

impl<'a> MarkupFileCompiler<'a> {
    #[must_use]
    pub fn new(resolver: &'a dyn TypeResolver, config: &'a MarkupConfiguration) -> Self {
        Self {
            resolver,
            config,
            global_imports: config.global_imports(),
        }
    }

    /// Scan the directive header of `source` and compile it.
    pub fn compile_source(&self, file_name: &str, source: &str) -> Result<CompiledDirectives, DirectiveError> {
        self.compile(file_name, scan_directives(source))
    }

    pub fn compile(&self, file_name: &str, arena: DirectiveArena) -> Result<CompiledDirectives, DirectiveError> {
        let _span = debug_span!("compile_file", file = file_name, design_time = self.config.design_time).entered();
        if self.config.design_time {
            self.compile_with(&DesignTimeTreeBuilder::new(self.resolver), file_name, arena)
        } else {
            self.compile_with(&ResolvedTreeBuilder::new(self.resolver), file_name, arena)
        }
    }

    fn compile_with<B: TreeBuilder>(
        &self,
        builder: &B,
        file_name: &str,
        mut arena: DirectiveArena,
    ) -> Result<CompiledDirectives, DirectiveError> {
        let imports = ImportDirectiveCompiler::new(builder, &self.global_imports).compile(&mut arena)?;

        let view_model_nodes = first_occurrence(&mut arena, VIEW_MODEL_DIRECTIVE);
        let view_model = ViewModelDirectiveCompiler::new(builder, &imports.artefact)
            .compile_nodes(&mut arena, &view_model_nodes)?;

        let base_type_nodes = first_occurrence(&mut arena, BASE_TYPE_DIRECTIVE);
        let base_type = BaseTypeDirectiveCompiler::new(builder, file_name, &imports.artefact)
            .with_control_file_extension(&self.config.control_file_extension)
            .compile_nodes(&mut arena, &base_type_nodes)?;

        let properties =
            PropertyDeclarationDirectiveCompiler::new(builder, base_type.artefact.clone(), &imports.artefact)
                .compile(&mut arena)?;

        let mut diagnostics = Vec::new();
        if self.config.require_view_model && view_model.artefact.is_none() {
            diagnostics.push(Diagnostic::from_code(
                diagnostic_codes::VIEW_MODEL_DIRECTIVE_MISSING,
                Span::at(0),
                &[],
            ));
        }

        debug!(
            properties = properties.artefact.len(),
            errors = arena.has_errors(),
            "file directives compiled"
        );
        Ok(CompiledDirectives {
            file_name: file_name.to_string(),
            arena,
            imports: imports.artefact,
            view_model_type: view_model.artefact,
            wrapper_type: base_type.artefact,
            import_directives: imports.directives,
            view_model_directives: view_model.directives,
            base_type_directives: base_type.directives,
            property_directives: properties.directives,
            properties: properties.artefact,
            diagnostics,
        })
    }
}

/// Indices of the first `keyword` node; later ones are reported and left
/// out so at-most-once compilers never see them.
fn first_occurrence(arena: &mut DirectiveArena, keyword: &'static str) -> Vec<DirectiveIndex> {
    let indices = arena.indices(keyword).to_vec();
    for &extra in indices.iter().skip(1) {
        if let Some(node) = arena.get_mut(extra) {
            node.add_error(diagnostic_codes::DIRECTIVE_SPECIFIED_MORE_THAN_ONCE, &[keyword]);
        }
    }
    indices.into_iter().take(1).collect()
}
