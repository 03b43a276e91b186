//! `@baseType`: the wrapper type of a view or markup control.

use dvc_common::diagnostic_codes;
use dvc_parser::GrammarEntryPoint;
use dvc_scanner::{DirectiveArena, DirectiveIndex, RawDirectiveNode};
use dvc_types::{ImportList, TypeDescriptor, TypeId};
use tracing::debug;

use crate::config::DEFAULT_CONTROL_FILE_EXTENSION;
use crate::directive::{BaseTypeDeclaration, Directive};
use crate::engine::{DirectiveCompiler, DirectiveError, parse_directive, single_directive};
use crate::tree_builder::TreeBuilder;

pub const BASE_TYPE_DIRECTIVE: &str = "baseType";

pub struct BaseTypeDirectiveCompiler<'a, B> {
    builder: &'a B,
    file_name: &'a str,
    control_file_extension: &'a str,
    imports: &'a ImportList,
}

impl<'a, B: TreeBuilder> BaseTypeDirectiveCompiler<'a, B> {
    #[must_use]
    pub fn new(builder: &'a B, file_name: &'a str, imports: &'a ImportList) -> Self {
        Self {
            builder,
            file_name,
            control_file_extension: DEFAULT_CONTROL_FILE_EXTENSION,
            imports,
        }
    }

    #[must_use]
    pub fn with_control_file_extension(mut self, extension: &'a str) -> Self {
        self.control_file_extension = extension;
        self
    }

    /// `DotvvmMarkupControl` for markup control files, `DotvvmView` for
    /// everything else.
    #[must_use]
    pub fn default_wrapper_type(&self) -> TypeDescriptor {
        if self.file_name.ends_with(self.control_file_extension) {
            TypeDescriptor::Resolved(TypeId::DOTVVM_MARKUP_CONTROL)
        } else {
            TypeDescriptor::Resolved(TypeId::DOTVVM_VIEW)
        }
    }
}

impl<B: TreeBuilder> DirectiveCompiler for BaseTypeDirectiveCompiler<'_, B> {
    type Payload = BaseTypeDeclaration;
    type Artefact = TypeDescriptor;

    fn directive_name(&self) -> &'static str {
        BASE_TYPE_DIRECTIVE
    }

    fn resolve(&mut self, node: &mut RawDirectiveNode, index: DirectiveIndex) -> Directive<BaseTypeDeclaration> {
        let type_syntax = parse_directive(node, GrammarEntryPoint::TypeName);
        self.builder
            .build_base_type_directive(node, index, type_syntax, self.imports)
    }

    /// Checks run in a fixed order and exactly one outcome applies. A type
    /// that resolved but is not a valid markup control base is still the
    /// artefact.
    fn create_artefact(
        &mut self,
        arena: &mut DirectiveArena,
        directives: &mut [Directive<BaseTypeDeclaration>],
    ) -> Result<TypeDescriptor, DirectiveError> {
        let default = self.default_wrapper_type();
        let Some(directive) = single_directive(BASE_TYPE_DIRECTIVE, directives)? else {
            return Ok(default);
        };
        let Some(node) = arena.get_mut(directive.node) else {
            return Ok(default);
        };
        let types = self.builder.resolver().types();

        let base_type = match &directive.resolved_type {
            TypeDescriptor::Resolved(id) => *id,
            TypeDescriptor::Unresolved { .. } => {
                node.add_error(diagnostic_codes::BASE_TYPE_NOT_FOUND, &[&directive.value]);
                return Ok(default);
            }
        };

        if !types.is_assignable(base_type, TypeId::DOTVVM_MARKUP_CONTROL) {
            node.add_error(diagnostic_codes::BASE_TYPE_MUST_DERIVE_FROM_MARKUP_CONTROL, &[]);
        } else if types
            .markup_options(base_type)
            .is_some_and(|options| options.declares_tag_names())
        {
            node.add_error(diagnostic_codes::MARKUP_CONTROL_CANNOT_DECLARE_TAG_NAMES, &[]);
        }
        debug!(base_type = %types.display_name(base_type), "wrapper type selected");
        Ok(TypeDescriptor::Resolved(base_type))
    }
}
