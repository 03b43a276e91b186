//! Directive Resolution Engine
//!
//! Every directive keyword is compiled in two steps: each raw node is
//! resolved into a typed `Directive<T>` on its own, then all directives of
//! the keyword are combined into one artefact. Malformed markup never stops
//! either step; problems become diagnostics on the originating node and the
//! directive carries placeholder values instead.

use std::fmt;

use dvc_parser::{BindingNode, GrammarEntryPoint, ParseResult, parse};
use dvc_scanner::{DirectiveArena, DirectiveIndex, RawDirectiveNode};
use tracing::{debug, debug_span};

use crate::directive::Directive;

// =============================================================================
// Errors
// =============================================================================

/// Integration misuse. Bad user markup is always reported as a diagnostic;
/// this error means the caller handed a compiler more nodes than it accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveError {
    TooManyDirectives { keyword: &'static str, count: usize },
}

impl fmt::Display for DirectiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyDirectives { keyword, count } => write!(
                f,
                "the @{keyword} directive accepts at most one occurrence, got {count}"
            ),
        }
    }
}

impl std::error::Error for DirectiveError {}

// =============================================================================
// Engine
// =============================================================================

/// Typed directives of one keyword together with their combined artefact.
#[derive(Clone, Debug)]
pub struct DirectiveCompilationResult<P, A> {
    pub directives: Vec<Directive<P>>,
    pub artefact: A,
}

/// One directive keyword.
///
/// Implementations must not panic or return `Err` for malformed markup:
/// `resolve` attaches diagnostics to the node and fills the payload with
/// recovery placeholders.
pub trait DirectiveCompiler {
    type Payload;
    type Artefact;

    /// Keyword handled by this compiler, without the `@`.
    fn directive_name(&self) -> &'static str;

    /// Resolve one raw node.
    fn resolve(
        &mut self,
        node: &mut RawDirectiveNode,
        index: DirectiveIndex,
    ) -> Directive<Self::Payload>;

    /// Combine all resolved directives of this keyword.
    fn create_artefact(
        &mut self,
        arena: &mut DirectiveArena,
        directives: &mut [Directive<Self::Payload>],
    ) -> Result<Self::Artefact, DirectiveError>;

    /// Compile every node of `arena` written with this compiler's keyword.
    fn compile(
        &mut self,
        arena: &mut DirectiveArena,
    ) -> Result<DirectiveCompilationResult<Self::Payload, Self::Artefact>, DirectiveError> {
        let indices = arena.indices(self.directive_name()).to_vec();
        self.compile_nodes(arena, &indices)
    }

    /// Compile the given nodes only.
    fn compile_nodes(
        &mut self,
        arena: &mut DirectiveArena,
        indices: &[DirectiveIndex],
    ) -> Result<DirectiveCompilationResult<Self::Payload, Self::Artefact>, DirectiveError> {
        let _span = debug_span!(
            "compile_directives",
            keyword = self.directive_name(),
            count = indices.len()
        )
        .entered();

        let mut directives = Vec::with_capacity(indices.len());
        for &index in indices {
            if let Some(node) = arena.get_mut(index) {
                directives.push(self.resolve(node, index));
            }
        }
        let artefact = self.create_artefact(arena, &mut directives)?;
        debug!(directives = directives.len(), "directives compiled");
        Ok(DirectiveCompilationResult {
            directives,
            artefact,
        })
    }
}

/// Parse the node's value at `entry`, attaching parser diagnostics to the
/// node. Always returns a tree, partial if the value is malformed.
pub fn parse_directive(node: &mut RawDirectiveNode, entry: GrammarEntryPoint) -> BindingNode {
    let ParseResult { root, diagnostics } = parse(node.value(), entry);
    for diagnostic in diagnostics {
        node.add_value_diagnostic(diagnostic);
    }
    root
}

/// The sole directive of an at-most-once keyword.
pub fn single_directive<'d, T>(
    keyword: &'static str,
    directives: &'d [Directive<T>],
) -> Result<Option<&'d Directive<T>>, DirectiveError> {
    match directives {
        [] => Ok(None),
        [directive] => Ok(Some(directive)),
        _ => Err(DirectiveError::TooManyDirectives {
            keyword,
            count: directives.len(),
        }),
    }
}
