//! End-to-end tests for the directive pipeline
//!
//! These drive whole markup headers through the `dvc` facade:
//! - scanning the directive header
//! - resolving imports, view model and base type
//! - evaluating and registering declared properties

use rayon::prelude::*;

use dvc::{
    CompiledDirectives, ConstantValue, MarkupConfiguration, MarkupFileCompiler, TypeDescriptor,
    TypeId, TypeRegistry,
};
use dvc::types::{ControlMarkupOptions, TypeDefinition};

const NS: &str = "MyApp.Controls";

struct Catalog {
    types: TypeRegistry,
    menu_base: TypeId,
    panel: TypeId,
    tagged: TypeId,
    view_model: TypeId,
}

fn catalog() -> Catalog {
    let types = TypeRegistry::new();
    let menu_base = types.register(
        TypeDefinition::class(NS, "MenuBase").with_base(TypeId::DOTVVM_MARKUP_CONTROL),
    );
    let panel = types.register(TypeDefinition::class(NS, "Panel").with_base(TypeId::HTML_GENERIC_CONTROL));
    let tagged = types.register(
        TypeDefinition::class(NS, "Tagged")
            .with_base(TypeId::DOTVVM_MARKUP_CONTROL)
            .with_markup_options(ControlMarkupOptions {
                primary_name: Some("tag".into()),
                alternative_names: Vec::new(),
            }),
    );
    let view_model = types.register(TypeDefinition::class("MyApp.ViewModels", "MenuViewModel"));
    let constants = types.register(TypeDefinition::class(NS, "Defaults"));
    types.add_constant(constants, "Six", ConstantValue::Int(6));
    Catalog {
        types,
        menu_base,
        panel,
        tagged,
        view_model,
    }
}

fn config() -> MarkupConfiguration {
    let mut config = MarkupConfiguration {
        require_view_model: false,
        ..MarkupConfiguration::default()
    };
    config.imported_namespaces.push(dvc::NamespaceImport::new(NS));
    config
        .imported_namespaces
        .push(dvc::NamespaceImport::new("MyApp.Controls.Defaults"));
    config
}

fn compile(catalog: &Catalog, file_name: &str, source: &str) -> CompiledDirectives {
    let config = config();
    MarkupFileCompiler::new(&catalog.types, &config)
        .compile_source(file_name, source)
        .unwrap()
}

fn messages(compiled: &CompiledDirectives) -> Vec<String> {
    compiled
        .all_diagnostics()
        .into_iter()
        .map(|d| d.message_text)
        .collect()
}

#[test]
fn test_array_initializer_with_constant_arithmetic() {
    let catalog = catalog();
    let compiled = compile(
        &catalog,
        "Menu.dotcontrol",
        "@property int[] Items = [1, 1+1, 9/3, 9%5, 2*3-1, Six]\n",
    );
    assert!(messages(&compiled).is_empty(), "{:?}", messages(&compiled));
    let items = compiled.property("Items").unwrap();
    assert_eq!(items.property_type, catalog.types.array_of(TypeId::INT32));
    assert_eq!(
        items.default_value,
        Some(ConstantValue::Array {
            element_type: TypeId::INT32,
            items: (1..=6).map(ConstantValue::Int).collect(),
        })
    );
}

#[test]
fn test_list_is_not_literal_constructible() {
    let catalog = catalog();
    let compiled = compile(
        &catalog,
        "Menu.dotcontrol",
        "@import System.Collections.Generic\n@property List<int> Items = [1, 2, 3, 4, 5, 6]\n",
    );
    let messages = messages(&compiled);
    assert!(messages.len() >= 2, "{messages:?}");
    assert!(messages.iter().any(|m| m.contains("initialize") || m.contains("value")));
    assert!(messages.iter().any(|m| m.contains("type")));

    let directive = &compiled.property_directives[0];
    let list = directive.property_type.type_id().unwrap();
    assert_eq!(catalog.types.display_name(list), "List<int>");
    assert_eq!(directive.initial_value, Some(ConstantValue::Null));
}

#[test]
fn test_mixed_string_array_reports_same_type() {
    let catalog = catalog();
    let compiled = compile(&catalog, "Menu.dotcontrol", "@property string[] X = [1, '', '', '']\n");
    assert!(messages(&compiled).iter().any(|m| m.contains("same type")));
    assert_eq!(
        compiled.property("X").unwrap().default_value,
        Some(ConstantValue::Null)
    );
}

#[test]
fn test_invalid_base_type_is_kept_with_one_diagnostic() {
    let catalog = catalog();
    let compiled = compile(&catalog, "Menu.dotcontrol", "@baseType Panel\n");
    assert_eq!(
        messages(&compiled),
        ["Markup controls must derive from DotvvmMarkupControl class!"]
    );
    assert_eq!(compiled.wrapper_type, TypeDescriptor::Resolved(catalog.panel));
}

#[test]
fn test_tag_names_checked_after_capability() {
    let catalog = catalog();
    let compiled = compile(&catalog, "Menu.dotcontrol", "@baseType Tagged\n");
    assert_eq!(messages(&compiled).len(), 1);
    assert!(messages(&compiled)[0].starts_with("Markup controls cannot use the PrimaryName"));
    assert_eq!(compiled.wrapper_type, TypeDescriptor::Resolved(catalog.tagged));
}

#[test]
fn test_default_wrapper_type_by_file_identity() {
    let catalog = catalog();
    let control = compile(&catalog, "Controls/Menu.dotcontrol", "");
    assert_eq!(
        control.wrapper_type,
        TypeDescriptor::Resolved(TypeId::DOTVVM_MARKUP_CONTROL)
    );
    for page in ["Views/Default.dothtml", "Views/Site.dotmaster", "Menu.dotcontrol.bak"] {
        let compiled = compile(&catalog, page, "");
        assert_eq!(compiled.wrapper_type, TypeDescriptor::Resolved(TypeId::DOTVVM_VIEW), "{page}");
    }
}

#[test]
fn test_attribute_without_literal_keeps_later_attributes() {
    let catalog = catalog();
    let compiled = compile(
        &catalog,
        "Menu.dotcontrol",
        "@property string Title, MarkupOptions.Name = , MarkupOptions.Required = true\n",
    );
    let directive = &compiled.property_directives[0];
    assert_eq!(directive.attributes.len(), 2);

    let missing = &directive.attributes[0];
    assert!(missing.attribute_type.is_resolved());
    assert_eq!(missing.property_name.name, "Name");
    assert!(missing.value_syntax.is_literal());
    assert_eq!(missing.value, None);

    assert_eq!(directive.attributes[1].value, Some(ConstantValue::Bool(true)));
    assert!(compiled.property("Title").unwrap().markup_options.required);
    assert!(
        messages(&compiled)
            .iter()
            .any(|m| m.contains("is missing or not a constant"))
    );
}

#[test]
fn test_malformed_declarations_never_fail() {
    let catalog = catalog();
    let inputs = [
        "@property",
        "@property int",
        "@property = 5",
        "@property int[ X",
        "@property int X = ",
        "@property int X = [1, [2]]",
        "@property int X = (1 +",
        "@property string X = $\"{\"",
        "@property int X, = 1, . = , A.B = C.D",
        "@property List<> X",
        "@property int X = 1 / 0",
        "@property int X = 2147483647 + 1",
    ];
    for input in inputs {
        let compiled = compile(&catalog, "Menu.dotcontrol", &format!("{input}\n"));
        assert!(compiled.has_errors(), "'{input}' should report");
        let directive = &compiled.property_directives[0];
        assert_eq!(directive.declaring_type.as_ref(), Some(&compiled.wrapper_type));
        if let Some(id) = directive.property_type.type_id() {
            if let Some(value) = &directive.initial_value {
                if !catalog.types.is_generic_definition(id) {
                    assert_eq!(value, &dvc::types::default_value(&catalog.types, id), "'{input}'");
                }
            }
        }
    }
}

#[test]
fn test_full_control_header() {
    let catalog = catalog();
    let compiled = compile(
        &catalog,
        "Controls/Menu.dotcontrol",
        "\
@import vm = MyApp.ViewModels
@viewModel vm.MenuViewModel
@baseType MenuBase
@property string Caption = $\"Menu {Six}\", MarkupOptions.AllowHardCodedValue = false
@property double Ratio = 1 / 2.0
",
    );
    assert!(!compiled.has_errors(), "{:?}", messages(&compiled));
    assert_eq!(
        compiled.view_model_type,
        Some(TypeDescriptor::Resolved(catalog.view_model))
    );
    assert_eq!(compiled.wrapper_type, TypeDescriptor::Resolved(catalog.menu_base));
    let caption = compiled.property("Caption").unwrap();
    assert_eq!(caption.default_value, Some(ConstantValue::String("Menu 6".into())));
    assert!(!caption.markup_options.allow_hard_coded_value);
    assert_eq!(
        compiled.property("Ratio").unwrap().default_value,
        Some(ConstantValue::Double(0.5))
    );
    assert!(
        compiled
            .properties
            .iter()
            .all(|p| p.declaring_type == TypeDescriptor::Resolved(catalog.menu_base))
    );
}

#[test]
fn test_parallel_files_share_one_registry() {
    let catalog = catalog();
    let config = config();
    let compiler = MarkupFileCompiler::new(&catalog.types, &config);
    let sources: Vec<(String, String)> = (0..64)
        .map(|i| {
            let source = format!(
                "@import System.Collections.Generic\n@baseType MenuBase\n@property int[] Values = [{i}, {i} * 2]\n@property List<string> Names\n"
            );
            (format!("Controls/C{i}.dotcontrol"), source)
        })
        .collect();

    let compiled: Vec<CompiledDirectives> = sources
        .par_iter()
        .map(|(name, source)| compiler.compile_source(name, source).unwrap())
        .collect();

    let list_of_string = compiled[0].property("Names").unwrap().property_type;
    for (i, file) in compiled.iter().enumerate() {
        assert!(!file.has_errors(), "{:?}", messages(file));
        let values = file.property("Values").unwrap();
        let i = i as i32;
        assert_eq!(
            values.default_value,
            Some(ConstantValue::Array {
                element_type: TypeId::INT32,
                items: vec![ConstantValue::Int(i), ConstantValue::Int(i * 2)],
            })
        );
        assert_eq!(file.property("Names").unwrap().property_type, list_of_string);
    }
}
