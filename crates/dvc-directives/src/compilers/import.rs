//! `@import Namespace` and `@import Alias = Namespace.Type`

use dvc_common::diagnostic_codes;
use dvc_scanner::{DirectiveArena, DirectiveIndex, RawDirectiveNode};
use dvc_types::{ImportList, NamespaceImport};

use crate::directive::{Directive, ImportDeclaration};
use crate::engine::{DirectiveCompiler, DirectiveError};
use crate::tree_builder::TreeBuilder;

pub const IMPORT_DIRECTIVE: &str = "import";

pub struct ImportDirectiveCompiler<'a, B> {
    builder: &'a B,
    global_imports: &'a ImportList,
}

impl<'a, B: TreeBuilder> ImportDirectiveCompiler<'a, B> {
    /// `global_imports` are appended after the file's own imports.
    #[must_use]
    pub fn new(builder: &'a B, global_imports: &'a ImportList) -> Self {
        Self {
            builder,
            global_imports,
        }
    }
}

impl<B: TreeBuilder> DirectiveCompiler for ImportDirectiveCompiler<'_, B> {
    type Payload = ImportDeclaration;
    type Artefact = ImportList;

    fn directive_name(&self) -> &'static str {
        IMPORT_DIRECTIVE
    }

    fn resolve(&mut self, node: &mut RawDirectiveNode, index: DirectiveIndex) -> Directive<ImportDeclaration> {
        let import = NamespaceImport::parse(node.value());
        if import.is_none() {
            node.add_error(diagnostic_codes::INVALID_IMPORT_DIRECTIVE, &[]);
        }
        self.builder.build_import_directive(node, index, import)
    }

    fn create_artefact(
        &mut self,
        _arena: &mut DirectiveArena,
        directives: &mut [Directive<ImportDeclaration>],
    ) -> Result<ImportList, DirectiveError> {
        Ok(directives
            .iter()
            .filter_map(|directive| directive.import.clone())
            .chain(self.global_imports.iter().cloned())
            .collect())
    }
}
