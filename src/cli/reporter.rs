use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;

use dvc_common::{Diagnostic, DiagnosticCategory};
use dvc_types::{ConstantValue, TypeRegistry};

use crate::cli::driver::{CompilationResult, FileResult};

/// Byte offsets of line starts, for 1-based line/column positions.
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .match_indices('\n')
                .map(|(index, _)| u32::try_from(index + 1).unwrap_or(u32::MAX)),
        );
        Self { line_starts }
    }

    /// 1-based line and column (in characters) of `offset`.
    pub fn position(&self, offset: u32, source: &str) -> (u32, u32) {
        let line = self.line_starts.partition_point(|&start| start <= offset).saturating_sub(1);
        let start = self.line_starts[line] as usize;
        let end = (offset as usize).min(source.len()).max(start);
        let column = source.get(start..end).map_or(0, |text| text.chars().count());
        (line as u32 + 1, column as u32 + 1)
    }

    pub fn line_text<'s>(&self, line: u32, source: &'s str) -> Option<&'s str> {
        let start = *self.line_starts.get(line.checked_sub(1)? as usize)? as usize;
        source.get(start..)?.lines().next()
    }
}

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// Every diagnostic of every file, separated by blank lines.
    pub fn render(&self, result: &CompilationResult) -> String {
        let mut out = String::new();
        for file in &result.files {
            let line_map = LineMap::build(&file.source);
            for diagnostic in file.compiled.all_diagnostics() {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(&self.format_diagnostic(file, &line_map, &diagnostic));
            }
        }
        out
    }

    pub fn format_diagnostic(&self, file: &FileResult, line_map: &LineMap, diagnostic: &Diagnostic) -> String {
        let (line, column) = line_map.position(diagnostic.span.start, &file.source);
        let mut output = format!(
            "{}:{line}:{column} - {} {}: {}",
            file.path.display(),
            self.format_category(diagnostic.category),
            self.format_code(diagnostic.code),
            diagnostic.message_text
        );
        if let Some(snippet) = self.format_snippet(file, line_map, diagnostic, line, column) {
            output.push_str(&snippet);
        }
        output
    }

    /// Source line with the span underlined:
    ///
    /// ```text
    ///     2   @viewModel invalid
    ///                    ~~~~~~~
    /// ```
    fn format_snippet(
        &self,
        file: &FileResult,
        line_map: &LineMap,
        diagnostic: &Diagnostic,
        line: u32,
        column: u32,
    ) -> Option<String> {
        let line_text = line_map.line_text(line, &file.source)?;
        let remaining = line_text.chars().count().saturating_sub(column as usize - 1);
        let width = file
            .source
            .get(diagnostic.span.start as usize..diagnostic.span.end as usize)
            .map_or(0, |text| text.chars().count())
            .clamp(1, remaining.max(1));

        let underline = "~".repeat(width);
        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!(
            "\n  {line:>3}   {line_text}\n        {}{underline}",
            " ".repeat(column as usize - 1)
        ))
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
        };
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("DV{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }

    /// `--verbose` listing: wrapper type, view model and properties per file.
    pub fn summary(&self, types: &TypeRegistry, result: &CompilationResult) -> String {
        let mut out = String::new();
        for file in &result.files {
            let compiled = &file.compiled;
            let path = file.path.display().to_string();
            let header = if self.color { path.bold().to_string() } else { path };
            let _ = writeln!(out, "{header}");
            let _ = writeln!(out, "  wrapper type: {}", compiled.wrapper_type.display(types));
            if let Some(view_model) = &compiled.view_model_type {
                let _ = writeln!(out, "  view model: {}", view_model.display(types));
            }
            for property in &compiled.properties {
                let mut line = format!(
                    "  property {}: {}",
                    property.full_name(types),
                    types.display_name(property.property_type)
                );
                if let Some(value) = &property.default_value {
                    let _ = write!(line, " = {}", format_constant(types, value));
                }
                if property.markup_options.required {
                    line.push_str(" [required]");
                }
                let _ = writeln!(out, "{line}");
            }
        }
        let errors = result.error_count();
        let _ = writeln!(
            out,
            "{} file(s), {errors} error(s)",
            result.files.len()
        );
        out
    }
}

fn format_constant(types: &TypeRegistry, value: &ConstantValue) -> String {
    match value {
        ConstantValue::Null => "null".to_string(),
        ConstantValue::String(text) => format!("{text:?}"),
        ConstantValue::Char(c) => format!("{c:?}"),
        ConstantValue::Array { items, .. } => {
            let items: Vec<String> = items.iter().map(|item| format_constant(types, item)).collect();
            format!("[{}]", items.join(", "))
        }
        ConstantValue::Default(id) => format!("default({})", types.display_name(*id)),
        other => other.to_string(),
    }
}

// =============================================================================
// JSON output
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonFileReport {
    pub file: String,
    pub diagnostics: Vec<JsonDiagnostic>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonDiagnostic {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub start: u32,
    pub end: u32,
}

pub fn json_report(result: &CompilationResult) -> Vec<JsonFileReport> {
    result
        .files
        .iter()
        .map(|file| {
            let line_map = LineMap::build(&file.source);
            let diagnostics = file
                .compiled
                .all_diagnostics()
                .into_iter()
                .map(|diagnostic| {
                    let (line, column) = line_map.position(diagnostic.span.start, &file.source);
                    JsonDiagnostic {
                        code: diagnostic.code,
                        category: diagnostic.category,
                        message: diagnostic.message_text,
                        line,
                        column,
                        start: diagnostic.span.start,
                        end: diagnostic.span.end,
                    }
                })
                .collect();
            JsonFileReport {
                file: file.path.display().to_string(),
                diagnostics,
            }
        })
        .collect()
}
