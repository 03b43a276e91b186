//! Binding grammar parser for the dvc compiler.
//!
//! This crate provides:
//! - `BindingNode` / `NodeKind` - the syntax tree of a directive value
//! - `TypeReference` - type syntax (`A.B<C>[]`, `int?`)
//! - `parse` - runs the grammar from a chosen `GrammarEntryPoint`
//!
//! Parsing never fails: missing pieces become `Missing` nodes and every
//! problem is returned as a diagnostic with a span relative to the value.

pub mod syntax;
pub use syntax::{
    BinaryOperator, BindingNode, Identifier, InterpolationPart, LiteralValue, NodeKind,
    PropertyDeclarationSyntax, TypeReference, TypeReferenceKind, UnaryOperator,
};

mod display;

pub mod parser;
pub use parser::{BindingParser, GrammarEntryPoint, ParseResult, parse};

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod parser_tests;
#[cfg(test)]
#[path = "../tests/display_tests.rs"]
mod display_tests;
