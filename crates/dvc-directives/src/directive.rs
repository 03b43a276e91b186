//! Typed directives.
//!
//! A `Directive<T>` is the resolved form of one `RawDirectiveNode`. It keeps
//! the node's index so later stages can attach diagnostics to the source
//! line, and dereferences to its payload.

use std::ops::{Deref, DerefMut};

use dvc_common::Span;
use dvc_parser::{BindingNode, Identifier, TypeReference};
use dvc_scanner::{DirectiveIndex, RawDirectiveNode};
use dvc_types::{ConstantValue, NamespaceImport, TypeDescriptor};

#[derive(Clone, Debug, PartialEq)]
pub struct Directive<T> {
    pub node: DirectiveIndex,
    pub value: String,
    pub value_span: Span,
    pub payload: T,
}

impl<T> Directive<T> {
    #[must_use]
    pub fn new(node: &RawDirectiveNode, index: DirectiveIndex, payload: T) -> Self {
        Self {
            node: index,
            value: node.value().to_string(),
            value_span: node.value_span(),
            payload,
        }
    }
}

impl<T> Deref for Directive<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.payload
    }
}

impl<T> DerefMut for Directive<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.payload
    }
}

// =============================================================================
// Payloads
// =============================================================================

/// `@baseType Type`
#[derive(Clone, Debug, PartialEq)]
pub struct BaseTypeDeclaration {
    pub type_syntax: BindingNode,
    pub resolved_type: TypeDescriptor,
}

/// `@viewModel Type`
#[derive(Clone, Debug, PartialEq)]
pub struct ViewModelDeclaration {
    pub type_syntax: BindingNode,
    pub resolved_type: TypeDescriptor,
}

/// `@import Namespace` / `@import Alias = Namespace`; `None` when malformed.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportDeclaration {
    pub import: Option<NamespaceImport>,
}

/// `@property Type Name = initializer, Attribute.Property = value`
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDeclaration {
    /// Root of the parsed value, whatever its shape.
    pub value_syntax: BindingNode,
    pub type_syntax: TypeReference,
    pub name: Identifier,
    pub initializer: Option<BindingNode>,
    pub attributes: Vec<PropertyAttributeReference>,
    pub property_type: TypeDescriptor,
    /// Wrapper type of the file; assigned when the artefact is created.
    pub declaring_type: Option<TypeDescriptor>,
    /// `default(T)` or the evaluated initializer. `None` when the property
    /// type is unresolved or the tree is built for design time.
    pub initial_value: Option<ConstantValue>,
}

/// `Attribute.Property = literal`
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyAttributeReference {
    pub type_syntax: TypeReference,
    pub attribute_type: TypeDescriptor,
    pub property_name: Identifier,
    pub value_syntax: BindingNode,
    /// `None` when the reference was recovered from malformed syntax.
    pub value: Option<ConstantValue>,
}
