//! Raw directive nodes and the per-file directive arena.
//!
//! A `RawDirectiveNode` is produced once per `@keyword value` line and is
//! never changed afterwards except for the diagnostics attached to it by
//! later stages. Directives refer back to their node by `DirectiveIndex`.

use dvc_common::{Diagnostic, Span};
use indexmap::IndexMap;
use serde::Serialize;

/// Index of a node in a `DirectiveArena`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DirectiveIndex(pub u32);

impl DirectiveIndex {
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// One directive line of a markup file.
#[derive(Clone, Debug)]
pub struct RawDirectiveNode {
    keyword: String,
    value: String,
    span: Span,
    keyword_span: Span,
    value_span: Span,
    diagnostics: Vec<Diagnostic>,
}

impl RawDirectiveNode {
    #[must_use]
    pub fn new(
        keyword: impl Into<String>,
        value: impl Into<String>,
        span: Span,
        keyword_span: Span,
        value_span: Span,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            value: value.into(),
            span,
            keyword_span,
            value_span,
            diagnostics: Vec::new(),
        }
    }

    /// A node that is not backed by file text; its value starts at offset 0.
    #[must_use]
    pub fn detached(keyword: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let len = value.len() as u32;
        Self::new(
            keyword,
            value,
            Span::new(0, len),
            Span::at(0),
            Span::new(0, len),
        )
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub const fn span(&self) -> Span {
        self.span
    }

    pub const fn keyword_span(&self) -> Span {
        self.keyword_span
    }

    pub const fn value_span(&self) -> Span {
        self.value_span
    }

    /// Report `code` over the whole directive value.
    pub fn add_error(&mut self, code: u32, args: &[&str]) {
        let span = self.value_span;
        self.diagnostics
            .push(Diagnostic::from_code(code, span, args));
    }

    /// Report `code` at a span relative to the start of the value.
    pub fn add_error_at(&mut self, code: u32, args: &[&str], relative: Span) {
        self.add_value_diagnostic(Diagnostic::from_code(code, relative, args));
    }

    /// Attach a diagnostic whose span is relative to the start of the value.
    pub fn add_value_diagnostic(&mut self, diagnostic: Diagnostic) {
        let offset = self.value_span.start;
        self.diagnostics.push(diagnostic.shifted(offset));
    }

    /// Attach a diagnostic whose span is already a file offset.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_messages(&self) -> impl Iterator<Item = &str> {
        self.diagnostics
            .iter()
            .filter(|d| d.is_error())
            .map(|d| d.message_text.as_str())
    }
}

/// All directive nodes of one file, in source order, indexed by keyword.
///
/// Keyword lookup is case-insensitive: `@viewModel` and `@viewmodel` land in
/// the same bucket.
#[derive(Clone, Debug, Default)]
pub struct DirectiveArena {
    nodes: Vec<RawDirectiveNode>,
    by_keyword: IndexMap<String, Vec<DirectiveIndex>>,
}

impl DirectiveArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: RawDirectiveNode) -> DirectiveIndex {
        let index = DirectiveIndex(self.nodes.len() as u32);
        self.by_keyword
            .entry(normalize_keyword(node.keyword()))
            .or_default()
            .push(index);
        self.nodes.push(node);
        index
    }

    pub fn get(&self, index: DirectiveIndex) -> Option<&RawDirectiveNode> {
        self.nodes.get(index.as_usize())
    }

    pub fn get_mut(&mut self, index: DirectiveIndex) -> Option<&mut RawDirectiveNode> {
        self.nodes.get_mut(index.as_usize())
    }

    /// Nodes written with `keyword`, in source order.
    pub fn indices(&self, keyword: &str) -> &[DirectiveIndex] {
        self.by_keyword
            .get(&normalize_keyword(keyword))
            .map_or(&[], Vec::as_slice)
    }

    /// Normalized keywords in order of first appearance.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.by_keyword.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DirectiveIndex, &RawDirectiveNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (DirectiveIndex(i as u32), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Diagnostics of every node, in source order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.nodes.iter().flat_map(|node| node.diagnostics().iter())
    }

    pub fn has_errors(&self) -> bool {
        self.nodes.iter().any(RawDirectiveNode::has_errors)
    }
}

fn normalize_keyword(keyword: &str) -> String {
    keyword.to_ascii_lowercase()
}
