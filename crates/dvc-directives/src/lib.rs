//! Directive compilation for the dvc compiler.
//!
//! This crate provides:
//! - `DirectiveCompiler` - the resolve-then-combine engine every keyword
//!   compiler implements
//! - `BaseTypeDirectiveCompiler`, `PropertyDeclarationDirectiveCompiler`,
//!   `ImportDirectiveCompiler`, `ViewModelDirectiveCompiler`
//! - `TreeBuilder` with its two variants, `ResolvedTreeBuilder` and
//!   `DesignTimeTreeBuilder`
//! - `ConstantEvaluator` for property initializers
//! - `PropertyRegistry` / `DotvvmProperty`
//! - `MarkupFileCompiler` - the per-file pipeline driven by
//!   `MarkupConfiguration`

pub mod directive;
pub use directive::{
    BaseTypeDeclaration, Directive, ImportDeclaration, PropertyAttributeReference,
    PropertyDeclaration, ViewModelDeclaration,
};

pub mod engine;
pub use engine::{
    DirectiveCompilationResult, DirectiveCompiler, DirectiveError, parse_directive,
    single_directive,
};

pub mod type_resolution;
pub use type_resolution::{ResolutionMode, resolve_attribute_type, resolve_type_reference};

pub mod constant_eval;
pub use constant_eval::ConstantEvaluator;

pub mod property_registry;
pub use property_registry::{DotvvmProperty, MarkupOptions, PropertyRegistry};

pub mod tree_builder;
pub use tree_builder::{
    AttributeSlots, DesignTimeTreeBuilder, PropertyDeclarationSlots, ResolvedTreeBuilder,
    TreeBuilder,
};

pub mod compilers;
pub use compilers::{
    BASE_TYPE_DIRECTIVE, BaseTypeDirectiveCompiler, IMPORT_DIRECTIVE, ImportDirectiveCompiler,
    PROPERTY_DIRECTIVE, PropertyDeclarationDirectiveCompiler, VIEW_MODEL_DIRECTIVE,
    ViewModelDirectiveCompiler,
};

pub mod config;
pub use config::MarkupConfiguration;

pub mod pipeline;
pub use pipeline::{CompiledDirectives, MarkupFileCompiler};

#[cfg(test)]
#[path = "../tests/test_support.rs"]
mod test_support;
#[cfg(test)]
#[path = "../tests/constant_eval_tests.rs"]
mod constant_eval_tests;
#[cfg(test)]
#[path = "../tests/base_type_tests.rs"]
mod base_type_tests;
#[cfg(test)]
#[path = "../tests/property_declaration_tests.rs"]
mod property_declaration_tests;
#[cfg(test)]
#[path = "../tests/import_view_model_tests.rs"]
mod import_view_model_tests;
#[cfg(test)]
#[path = "../tests/pipeline_tests.rs"]
mod pipeline_tests;
