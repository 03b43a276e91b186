//! Diagnostic types and message lookup.
//!
//! Every message the directive compiler can report lives in `data.rs`,
//! keyed by a numeric code. Message text is part of the tooling contract:
//! editors and tests match on it, so wording changes are breaking changes.
//!
//! Code ranges:
//! - `1xxx` scanner and binding grammar
//! - `2xxx` directive shape and semantics
//! - `3xxx` type resolution
//! - `4xxx` constant evaluation

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::span::Span;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// A diagnostic attached to a directive node or to the compiled file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub span: Span,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(span: Span, message: impl Into<String>, code: u32) -> Self {
        Self {
            span,
            message_text: message.into(),
            category: DiagnosticCategory::Error,
            code,
        }
    }

    /// Create a diagnostic from the message table, filling `{0}`, `{1}`, ...
    /// with `args`.
    ///
    /// Unknown codes still produce a diagnostic so that reporting can never
    /// fail; the message then lists the raw arguments.
    #[must_use]
    pub fn from_code(code: u32, span: Span, args: &[&str]) -> Self {
        match get_diagnostic_message(code) {
            Some(template) => Self {
                span,
                message_text: format_message(template.message, args),
                category: template.category,
                code,
            },
            None => Self::error(span, args.join(" "), code),
        }
    }

    /// Move the diagnostic by `offset` bytes.
    #[must_use]
    pub fn shifted(mut self, offset: u32) -> Self {
        self.span = self.span.shift(offset);
        self
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.category, DiagnosticCategory::Error)
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

static MESSAGES_BY_CODE: Lazy<FxHashMap<u32, &'static DiagnosticMessage>> =
    Lazy::new(|| DIAGNOSTIC_MESSAGES.iter().map(|m| (m.code, m)).collect());

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    MESSAGES_BY_CODE.get(&code).copied()
}

/// Get the message template for a diagnostic code.
///
/// Returns the template string with `{0}`, `{1}`, etc. placeholders.
/// Use `format_message()` to fill in the placeholders.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

#[cfg(test)]
#[path = "../../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
