use dvc_common::diagnostic_codes;
use dvc_scanner::DirectiveArena;
use dvc_types::{TypeDescriptor, TypeId};

use crate::compilers::BaseTypeDirectiveCompiler;
use crate::engine::{DirectiveCompiler, DirectiveError};
use crate::test_support::{Fixture, TESTS_NAMESPACE, arena, fixture, imports, messages};
use crate::tree_builder::ResolvedTreeBuilder;

fn compile_base_type(fixture: &Fixture, file_name: &str, source: &str) -> (TypeDescriptor, DirectiveArena) {
    let builder = ResolvedTreeBuilder::new(&fixture.types);
    let imports = imports(&[TESTS_NAMESPACE]);
    let mut arena = arena(source);
    let result = BaseTypeDirectiveCompiler::new(&builder, file_name, &imports)
        .compile(&mut arena)
        .unwrap();
    (result.artefact, arena)
}

#[test]
fn default_wrapper_depends_on_file_name() {
    let fixture = fixture();
    let (control, arena) = compile_base_type(&fixture, "Controls/Menu.dotcontrol", "");
    assert_eq!(control, TypeDescriptor::Resolved(TypeId::DOTVVM_MARKUP_CONTROL));
    assert!(messages(&arena).is_empty());

    let (page, _) = compile_base_type(&fixture, "Views/Default.dothtml", "@viewModel X\n");
    assert_eq!(page, TypeDescriptor::Resolved(TypeId::DOTVVM_VIEW));

    let (master, _) = compile_base_type(&fixture, "Views/Site.dotmaster", "");
    assert_eq!(master, TypeDescriptor::Resolved(TypeId::DOTVVM_VIEW));
}

#[test]
fn custom_control_extension_selects_markup_control() {
    let fixture = fixture();
    let builder = ResolvedTreeBuilder::new(&fixture.types);
    let imports = imports(&[]);
    let mut arena = arena("");
    let result = BaseTypeDirectiveCompiler::new(&builder, "Menu.ascx", &imports)
        .with_control_file_extension(".ascx")
        .compile(&mut arena)
        .unwrap();
    assert_eq!(result.artefact, TypeDescriptor::Resolved(TypeId::DOTVVM_MARKUP_CONTROL));
}

#[test]
fn valid_base_type_is_the_artefact() {
    let fixture = fixture();
    let (wrapper, arena) = compile_base_type(&fixture, "Menu.dotcontrol", "@baseType TestControl\n");
    assert_eq!(wrapper, TypeDescriptor::Resolved(fixture.test_control));
    assert!(messages(&arena).is_empty());

    let (wrapper, _) = compile_base_type(
        &fixture,
        "Menu.dotcontrol",
        "@baseType DotVVM.Framework.Tests.TestControl\n",
    );
    assert_eq!(wrapper, TypeDescriptor::Resolved(fixture.test_control));
}

#[test]
fn unresolved_base_type_falls_back_to_default() {
    let fixture = fixture();
    let source = "@baseType Missing.Type\n";
    let (wrapper, arena) = compile_base_type(&fixture, "Menu.dotcontrol", source);
    assert_eq!(wrapper, TypeDescriptor::Resolved(TypeId::DOTVVM_MARKUP_CONTROL));
    assert_eq!(
        messages(&arena),
        ["The type 'Missing.Type' specified in baseType directive was not found!"]
    );
    let diagnostic = arena.diagnostics().next().unwrap();
    assert_eq!(diagnostic.code, diagnostic_codes::BASE_TYPE_NOT_FOUND);
    assert_eq!(diagnostic.span.slice(source), "Missing.Type");
}

#[test]
fn non_markup_control_base_is_kept_with_one_error() {
    let fixture = fixture();
    let (wrapper, arena) = compile_base_type(&fixture, "Menu.dotcontrol", "@baseType PlainControl\n");
    assert_eq!(wrapper, TypeDescriptor::Resolved(fixture.not_a_markup_control));
    assert_eq!(
        messages(&arena),
        ["Markup controls must derive from DotvvmMarkupControl class!"]
    );
}

#[test]
fn markup_control_with_tag_names_is_kept_with_one_error() {
    let fixture = fixture();
    let (wrapper, arena) = compile_base_type(&fixture, "Menu.dotcontrol", "@baseType RenamedControl\n");
    assert_eq!(wrapper, TypeDescriptor::Resolved(fixture.renamed_control));
    let diagnostics: Vec<_> = arena.diagnostics().map(|d| d.code).collect();
    assert_eq!(
        diagnostics,
        [diagnostic_codes::MARKUP_CONTROL_CANNOT_DECLARE_TAG_NAMES]
    );
}

#[test]
fn malformed_base_type_is_not_found() {
    let fixture = fixture();
    let (wrapper, arena) = compile_base_type(&fixture, "Page.dothtml", "@baseType TestControl, other\n");
    assert_eq!(wrapper, TypeDescriptor::Resolved(TypeId::DOTVVM_VIEW));
    let messages = messages(&arena);
    assert_eq!(messages.len(), 2, "{messages:?}");
    assert_eq!(messages[0], "Unexpected token ','.");
    assert_eq!(
        messages[1],
        "The type 'TestControl, other' specified in baseType directive was not found!"
    );
}

#[test]
fn second_base_type_directive_is_misuse() {
    let fixture = fixture();
    let builder = ResolvedTreeBuilder::new(&fixture.types);
    let imports = imports(&[TESTS_NAMESPACE]);
    let mut arena = arena("@baseType TestControl\n@baseType PlainControl\n");
    let error = BaseTypeDirectiveCompiler::new(&builder, "Menu.dotcontrol", &imports)
        .compile(&mut arena)
        .unwrap_err();
    assert_eq!(
        error,
        DirectiveError::TooManyDirectives {
            keyword: "baseType",
            count: 2
        }
    );
    assert_eq!(
        error.to_string(),
        "the @baseType directive accepts at most one occurrence, got 2"
    );
}
