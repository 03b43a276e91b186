use crate::directive_scanner::scan_directives;
use dvc_common::{Span, diagnostic_codes};

#[test]
fn scans_header_lines_in_order() {
    let source = "@viewModel MyApp.ViewModel\n@property int Count = 5\n<div></div>\n";
    let arena = scan_directives(source);

    assert_eq!(arena.len(), 2);
    let keywords: Vec<_> = arena.iter().map(|(_, node)| node.keyword()).collect();
    assert_eq!(keywords, ["viewModel", "property"]);

    let (_, property) = arena.iter().nth(1).unwrap();
    assert_eq!(property.value(), "int Count = 5");
    assert_eq!(property.value_span().slice(source), "int Count = 5");
    assert_eq!(property.keyword_span().slice(source), "property");
    assert_eq!(property.span().slice(source), "@property int Count = 5");
}

#[test]
fn blank_lines_are_skipped_and_body_stops_scanning() {
    let source = "\n  \n@baseType Foo\r\n\r\n@property string Name\n<p>@property int Ignored</p>\n@import X\n";
    let arena = scan_directives(source);

    assert_eq!(arena.len(), 2);
    assert_eq!(arena.indices("import").len(), 0);
    let (_, base) = arena.iter().next().unwrap();
    assert_eq!(base.value(), "Foo");
    assert_eq!(base.value_span().slice(source), "Foo");
}

#[test]
fn keyword_lookup_is_case_insensitive() {
    let arena = scan_directives("@viewModel A\n@PROPERTY int X\n@property int Y\n");

    assert_eq!(arena.indices("viewmodel").len(), 1);
    assert_eq!(arena.indices("ViewModel").len(), 1);
    assert_eq!(arena.indices("Property").len(), 2);
    assert!(arena.indices("baseType").is_empty());
    assert_eq!(arena.keywords().collect::<Vec<_>>(), ["viewmodel", "property"]);
}

#[test]
fn directive_without_value_has_empty_value_span() {
    let source = "@baseType\n";
    let arena = scan_directives(source);
    let (_, node) = arena.iter().next().unwrap();

    assert_eq!(node.keyword(), "baseType");
    assert_eq!(node.value(), "");
    assert!(node.value_span().is_empty());
    assert!(!node.has_errors());
}

#[test]
fn missing_directive_name_is_reported() {
    let arena = scan_directives("@ int X\n");
    let (_, node) = arena.iter().next().unwrap();

    assert_eq!(node.keyword(), "");
    assert!(node.has_errors());
    assert_eq!(node.diagnostics()[0].code, diagnostic_codes::DIRECTIVE_NAME_EXPECTED);
    assert_eq!(node.diagnostics()[0].span, Span::new(0, 1));
}

#[test]
fn byte_order_mark_is_ignored() {
    let source = "\u{feff}@viewModel A\n";
    let arena = scan_directives(source);
    let (_, node) = arena.iter().next().unwrap();

    assert_eq!(node.keyword(), "viewModel");
    assert_eq!(node.value_span().slice(source), "A");
}

#[test]
fn value_diagnostics_are_shifted_to_file_offsets() {
    let source = "@property int X\n";
    let mut arena = scan_directives(source);
    let index = arena.indices("property")[0];
    let node = arena.get_mut(index).unwrap();

    node.add_error_at(diagnostic_codes::PROPERTY_NAME_EXPECTED, &[], Span::new(4, 5));
    node.add_error(diagnostic_codes::CANNOT_RESOLVE_PROPERTY_DECLARATION, &[]);

    let diagnostics = node.diagnostics();
    assert_eq!(diagnostics[0].span.slice(source), "X");
    assert_eq!(diagnostics[1].span.slice(source), "int X");
    assert_eq!(
        node.error_messages().collect::<Vec<_>>(),
        ["Property name expected.", "Cannot resolve the property declaration."]
    );
    assert!(arena.has_errors());
    assert_eq!(arena.diagnostics().count(), 2);
}

#[test]
fn empty_source_produces_empty_arena() {
    assert!(scan_directives("").is_empty());
    assert!(scan_directives("<html></html>").is_empty());
}
