//! Lexical stage of the dvc compiler.
//!
//! This crate provides:
//! - `RawDirectiveNode` / `DirectiveArena` - the directive header of a markup
//!   file, grouped by (case-insensitive) keyword
//! - `scan_directives` - turns file text into a `DirectiveArena`
//! - `BindingTokenizer` / `Token` / `TokenKind` - tokens of directive values

pub mod directive;
pub use directive::{DirectiveArena, DirectiveIndex, RawDirectiveNode};

pub mod directive_scanner;
pub use directive_scanner::scan_directives;

pub mod token;
pub use token::{Token, TokenKind};

pub mod tokenizer;
pub use tokenizer::{BindingTokenizer, TokenizeResult, unescape};

#[cfg(test)]
#[path = "../tests/directive_scanner_tests.rs"]
mod directive_scanner_tests;
#[cfg(test)]
#[path = "../tests/tokenizer_tests.rs"]
mod tokenizer_tests;
