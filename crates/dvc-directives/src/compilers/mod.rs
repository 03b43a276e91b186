//! Directive compilers, one per keyword.

mod base_type;
mod import;
mod property_declaration;
mod view_model;

pub use base_type::{BASE_TYPE_DIRECTIVE, BaseTypeDirectiveCompiler};
pub use import::{IMPORT_DIRECTIVE, ImportDirectiveCompiler};
pub use property_declaration::{PROPERTY_DIRECTIVE, PropertyDeclarationDirectiveCompiler};
pub use view_model::{VIEW_MODEL_DIRECTIVE, ViewModelDirectiveCompiler};
