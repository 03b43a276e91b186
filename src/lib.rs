//! dvc: directive compiler for DotVVM-style markup files.
//!
//! Resolves the `@import`, `@viewModel`, `@baseType` and `@property`
//! directives at the top of a markup file against a type catalog, reporting
//! problems as diagnostics attached to the directives.
//!
//! ```
//! use dvc::{MarkupConfiguration, MarkupFileCompiler, TypeRegistry};
//!
//! let types = TypeRegistry::new();
//! let config = MarkupConfiguration::default();
//! let compiled = MarkupFileCompiler::new(&types, &config)
//!     .compile_source("Menu.dotcontrol", "@viewModel object\n@property int Count = 2 * 3\n")
//!     .unwrap();
//! assert!(!compiled.has_errors());
//! assert_eq!(compiled.properties.len(), 1);
//! ```

pub use dvc_common as common;
pub use dvc_directives as directives;
pub use dvc_parser as parser;
pub use dvc_scanner as scanner;
pub use dvc_types as types;

pub use dvc_common::{Diagnostic, DiagnosticCategory, Span, diagnostic_codes};
pub use dvc_directives::{
    CompiledDirectives, DirectiveError, DotvvmProperty, MarkupConfiguration, MarkupFileCompiler,
    MarkupOptions,
};
pub use dvc_scanner::scan_directives;
pub use dvc_types::{
    ConstantValue, ImportList, NamespaceImport, TypeDescriptor, TypeId, TypeRegistry, TypeResolver,
};

pub mod tracing_config;

#[cfg(feature = "cli")]
pub mod cli;
