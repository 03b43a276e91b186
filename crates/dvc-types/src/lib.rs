//! Type system of the dvc compiler.
//!
//! This crate provides:
//! - `TypeRegistry` - a thread-safe store of type definitions, interning
//!   constructed generic, array and nullable types
//! - `TypeDescriptor` - a resolved type or the explicit `Unresolved` variant
//! - `ImportList` / `NamespaceImport` - ordered imports with aliases
//! - `TypeResolver` - the pluggable name → type / name → constant capability
//! - `ConstantValue` - compile-time values, implicit conversions and defaults

pub mod types;
pub use types::{ControlMarkupOptions, TypeDefinition, TypeFlags, TypeId, TypeShape};

pub mod registry;
pub use registry::TypeRegistry;

pub mod descriptor;
pub use descriptor::TypeDescriptor;

pub mod imports;
pub use imports::{ImportList, NamespaceImport};

pub mod resolver;
pub use resolver::TypeResolver;

pub mod constant;
pub use constant::ConstantValue;

pub mod conversion;
pub use conversion::{convert_constant, default_value};

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod registry_tests;
#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod resolver_tests;
#[cfg(test)]
#[path = "../tests/conversion_tests.rs"]
mod conversion_tests;
