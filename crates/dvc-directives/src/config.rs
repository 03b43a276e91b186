//! Per-project markup compilation settings.

use dvc_types::{ImportList, NamespaceImport};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTROL_FILE_EXTENSION: &str = ".dotcontrol";

/// Namespace imported into every file unless the configuration says
/// otherwise; it makes `MarkupOptions.X = value` attributes resolve.
pub const DEFAULT_IMPORTED_NAMESPACE: &str = "DotVVM.Framework.Binding";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkupConfiguration {
    /// Imports appended after each file's own `@import` directives.
    pub imported_namespaces: Vec<NamespaceImport>,
    /// Files with this suffix default to the markup control wrapper type.
    pub control_file_extension: String,
    /// Report files without a `@viewModel` directive.
    pub require_view_model: bool,
    /// Build design-time trees instead of compiled ones.
    pub design_time: bool,
}

impl Default for MarkupConfiguration {
    fn default() -> Self {
        Self {
            imported_namespaces: vec![NamespaceImport::new(DEFAULT_IMPORTED_NAMESPACE)],
            control_file_extension: DEFAULT_CONTROL_FILE_EXTENSION.to_string(),
            require_view_model: true,
            design_time: false,
        }
    }
}

impl MarkupConfiguration {
    #[must_use]
    pub fn global_imports(&self) -> ImportList {
        self.imported_namespaces.iter().cloned().collect()
    }

    #[must_use]
    pub fn is_control_file(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.control_file_extension)
    }
}
