use clap::Parser;
use std::path::{Path, PathBuf};

use dvc_types::{ConstantValue, NamespaceImport, TypeId, TypeResolver};

use super::args::CliArgs;
use super::config::{CONFIG_FILE_NAME, load_config, parse_config, resolve_catalog_type, resolve_config};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

const CATALOG: &str = r#"
{
  // controls
  "importedNamespaces": [{ "namespace": "MyApp.Controls" }],
  "requireViewModel": false,
  "types": [
    {
      "namespace": "MyApp.Controls",
      "name": "MenuBase",
      "base": "DotVVM.Framework.Controls.DotvvmMarkupControl",
      "properties": { "Title": "string", "Items": "System.Collections.Generic.List<int>" },
    },
    {
      "namespace": "MyApp.Controls", "name": "Renamed",
      "base": "MyApp.Controls.MenuBase",
      "markupOptions": { "alternativeNames": ["menu"] }, /* tag names */
    },
    {
      "namespace": "MyApp",
      "name": "Limits",
      "constants": { "Max": 10, "Huge": 10000000000, "Ratio": 0.5, "Label": "max", "On": true },
    },
  ],
}
"#;

#[test]
fn parses_jsonc_with_trailing_commas() {
    let config = parse_config(CATALOG).expect("should parse JSONC");

    assert_eq!(
        config.markup.imported_namespaces,
        [NamespaceImport::new("MyApp.Controls")]
    );
    assert!(!config.markup.require_view_model);
    assert_eq!(config.markup.control_file_extension, ".dotcontrol");
    assert_eq!(config.types.len(), 3);
    assert_eq!(config.types[1].markup_options.as_ref().unwrap().alternative_names, ["menu"]);
}

#[test]
fn comment_markers_inside_strings_are_kept() {
    let config = parse_config(r#"{ "controlFileExtension": "//x,/*y*/", }"#).unwrap();
    assert_eq!(config.markup.control_file_extension, "//x,/*y*/");
}

#[test]
fn empty_config_uses_defaults() {
    let config = parse_config("{}").unwrap();
    assert_eq!(config.markup, dvc_directives::MarkupConfiguration::default());
    assert!(config.types.is_empty());
}

#[test]
fn builds_registry_from_catalog() {
    let config = parse_config(CATALOG).unwrap();
    let types = config.build_registry().unwrap();

    let menu = types.lookup("MyApp.Controls.MenuBase").unwrap();
    assert!(types.is_assignable(menu, TypeId::DOTVVM_MARKUP_CONTROL));
    assert_eq!(types.property_type(menu, "Title"), Some(TypeId::STRING));
    let items = types.property_type(menu, "Items").unwrap();
    assert_eq!(types.display_name(items), "List<int>");

    let renamed = types.lookup("MyApp.Controls.Renamed").unwrap();
    assert_eq!(types.base(renamed), Some(menu));
    assert!(types.markup_options(renamed).unwrap().declares_tag_names());

    let limits = types.lookup("MyApp.Limits").unwrap();
    assert_eq!(types.constant(limits, "Max"), Some(ConstantValue::Int(10)));
    assert_eq!(types.constant(limits, "Huge"), Some(ConstantValue::Long(10_000_000_000)));
    assert_eq!(types.constant(limits, "Ratio"), Some(ConstantValue::Double(0.5)));
    assert_eq!(types.constant(limits, "Label"), Some(ConstantValue::String("max".into())));
    assert_eq!(types.constant(limits, "On"), Some(ConstantValue::Bool(true)));
    assert!(types.resolve_constant("MyApp.Limits.Max", &dvc_types::ImportList::new()).is_some());
}

#[test]
fn unknown_base_type_names_the_entry() {
    let config = parse_config(
        r#"{ "types": [{ "namespace": "A", "name": "B", "base": "Not.There" }] }"#,
    )
    .unwrap();
    let error = config.build_registry().unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("invalid type entry 'A.B'"), "{message}");
    assert!(message.contains("unknown type 'Not.There'"), "{message}");
}

#[test]
fn non_scalar_constant_is_rejected() {
    let config = parse_config(
        r#"{ "types": [{ "namespace": "A", "name": "B", "constants": { "X": [1] } }] }"#,
    )
    .unwrap();
    let message = format!("{:#}", config.build_registry().unwrap_err());
    assert!(message.contains("constant 'X'"), "{message}");
}

#[test]
fn catalog_types_use_binding_syntax() {
    let types = dvc_types::TypeRegistry::new();
    assert_eq!(resolve_catalog_type(&types, "int").unwrap(), TypeId::INT32);
    let array = resolve_catalog_type(&types, "string[]").unwrap();
    assert_eq!(types.element_type(array), Some(TypeId::STRING));
    assert!(resolve_catalog_type(&types, "int,").is_err());
    assert!(resolve_catalog_type(&types, "Missing").is_err());
}

#[test]
fn resolve_config_finds_default_file_and_applies_flags() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(temp.path(), CONFIG_FILE_NAME, r#"{ "designTime": false }"#);

    let args = CliArgs::try_parse_from(["dvc", "--design-time", "-i", "m=MyApp.Models", "."]).unwrap();
    let config = resolve_config(&args, temp.path()).unwrap();
    assert!(config.markup.design_time);
    assert_eq!(
        config.markup.imported_namespaces.last(),
        Some(&NamespaceImport::aliased("m", "MyApp.Models"))
    );
}

#[test]
fn resolve_config_without_file_uses_defaults() {
    let temp = tempfile::tempdir().expect("temp dir");
    let args = CliArgs::try_parse_from(["dvc", "."]).unwrap();
    let config = resolve_config(&args, temp.path()).unwrap();
    assert!(config.markup.require_view_model);
}

#[test]
fn invalid_import_flag_is_an_error() {
    let temp = tempfile::tempdir().expect("temp dir");
    let args = CliArgs::try_parse_from(["dvc", "-i", "1bad", "."]).unwrap();
    let error = resolve_config(&args, temp.path()).unwrap_err();
    assert!(error.to_string().contains("invalid --import value '1bad'"));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let temp = tempfile::tempdir().expect("temp dir");
    let error = load_config(&temp.path().join("nope.json")).unwrap_err();
    assert!(error.to_string().starts_with("failed to read config"));
}
