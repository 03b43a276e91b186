//! Common types and utilities for the dvc markup directive compiler.
//!
//! This crate provides foundational types used across all dvc crates:
//! - Source spans (`Span`) in byte offsets
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`) and the message table
//! - Evaluation limits shared by the parser and the constant evaluator

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Centralized limits and thresholds
pub mod limits;

// Diagnostic records, codes and message templates
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, diagnostic_codes, diagnostic_messages,
    format_message, get_message_template,
};

#[cfg(test)]
#[path = "../tests/span_tests.rs"]
mod span_tests;
