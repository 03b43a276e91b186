//! Namespace imports.

use serde::{Deserialize, Serialize};

/// `@import Namespace` or `@import Alias = Namespace.OrType`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamespaceImport {
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl NamespaceImport {
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            alias: None,
        }
    }

    #[must_use]
    pub fn aliased(alias: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            alias: Some(alias.into()),
        }
    }

    /// Parse `Namespace` or `Alias = Namespace`. Both sides must be dotted
    /// identifiers.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text.split_once('=') {
            Some((alias, namespace)) => {
                let alias = alias.trim();
                let namespace = namespace.trim();
                (is_identifier(alias) && is_dotted_name(namespace))
                    .then(|| Self::aliased(alias, namespace))
            }
            None => {
                let namespace = text.trim();
                is_dotted_name(namespace).then(|| Self::new(namespace))
            }
        }
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

fn is_dotted_name(text: &str) -> bool {
    text.split('.').all(is_identifier)
}

/// Ordered import list; earlier entries win on ambiguity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportList {
    imports: Vec<NamespaceImport>,
}

impl ImportList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, import: NamespaceImport) {
        if !self.imports.contains(&import) {
            self.imports.push(import);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NamespaceImport> {
        self.imports.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.imports.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Full names `name` may refer to, most specific first:
    /// alias expansions in import order, `name` itself, then `name` inside
    /// each unaliased namespace in import order.
    #[must_use]
    pub fn candidates(&self, name: &str) -> Vec<String> {
        let (head, rest) = match name.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (name, None),
        };

        let mut candidates: Vec<String> = self
            .imports
            .iter()
            .filter(|import| import.alias.as_deref() == Some(head))
            .map(|import| match rest {
                Some(rest) => format!("{}.{rest}", import.namespace),
                None => import.namespace.clone(),
            })
            .collect();
        candidates.push(name.to_string());
        candidates.extend(
            self.imports
                .iter()
                .filter(|import| import.alias.is_none())
                .map(|import| format!("{}.{name}", import.namespace)),
        );
        candidates
    }

    /// Unaliased namespaces, in order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.imports
            .iter()
            .filter(|import| import.alias.is_none())
            .map(|import| import.namespace.as_str())
    }
}

impl Extend<NamespaceImport> for ImportList {
    fn extend<I: IntoIterator<Item = NamespaceImport>>(&mut self, iter: I) {
        for import in iter {
            self.push(import);
        }
    }
}

impl FromIterator<NamespaceImport> for ImportList {
    fn from_iter<I: IntoIterator<Item = NamespaceImport>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a> IntoIterator for &'a ImportList {
    type Item = &'a NamespaceImport;
    type IntoIter = std::slice::Iter<'a, NamespaceImport>;

    fn into_iter(self) -> Self::IntoIter {
        self.imports.iter()
    }
}
