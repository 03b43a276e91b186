//! Directive header scanner.
//!
//! Directives are the `@keyword value` lines at the top of a markup file.
//! Blank lines between them are skipped; the first line that is neither
//! blank nor a directive ends the header.

use dvc_common::{Diagnostic, Span, diagnostic_codes};
use memchr::memchr;
use tracing::trace;

use crate::directive::{DirectiveArena, RawDirectiveNode};

const BYTE_ORDER_MARK: &str = "\u{feff}";

/// Scan the directive header of `source`.
#[must_use]
pub fn scan_directives(source: &str) -> DirectiveArena {
    let bytes = source.as_bytes();
    let mut arena = DirectiveArena::new();
    let mut line_start = if source.starts_with(BYTE_ORDER_MARK) {
        BYTE_ORDER_MARK.len()
    } else {
        0
    };

    while line_start < bytes.len() {
        let line_end = memchr(b'\n', &bytes[line_start..]).map_or(bytes.len(), |i| line_start + i);
        let line = &source[line_start..line_end];
        let content = line.trim();

        if content.is_empty() {
            line_start = line_end + 1;
            continue;
        }
        if !content.starts_with('@') {
            break;
        }

        let directive_start = line_start + (line.len() - line.trim_start().len());
        let directive_end = line_start + line.trim_end().len();
        arena.push(scan_directive_line(source, directive_start, directive_end));
        line_start = line_end + 1;
    }

    trace!(count = arena.len(), "scanned directive header");
    arena
}

/// `source[start..end]` is one trimmed directive line starting with `@`.
fn scan_directive_line(source: &str, start: usize, end: usize) -> RawDirectiveNode {
    let keyword_start = start + 1;
    let after_at = &source[keyword_start..end];
    let keyword_len = after_at
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(after_at.len());
    let keyword_end = keyword_start + keyword_len;

    let rest = &source[keyword_end..end];
    let value_start = keyword_end + (rest.len() - rest.trim_start().len());

    let mut node = RawDirectiveNode::new(
        &source[keyword_start..keyword_end],
        &source[value_start..end],
        offsets(start, end),
        offsets(keyword_start, keyword_end),
        offsets(value_start, end),
    );

    if keyword_len == 0 {
        node.add_diagnostic(Diagnostic::from_code(
            diagnostic_codes::DIRECTIVE_NAME_EXPECTED,
            offsets(start, keyword_start),
            &[],
        ));
    }
    node
}

fn offsets(start: usize, end: usize) -> Span {
    Span::new(start as u32, end as u32)
}
