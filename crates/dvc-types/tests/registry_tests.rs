use crate::registry::TypeRegistry;
use crate::types::{ControlMarkupOptions, TypeDefinition, TypeId};
use rayon::prelude::*;

#[test]
fn builtins_have_fixed_ids() {
    let types = TypeRegistry::new();
    assert_eq!(types.lookup("System.Int32"), Some(TypeId::INT32));
    assert_eq!(types.lookup("System.Collections.Generic.List`1"), Some(TypeId::LIST));
    assert_eq!(
        types.lookup("DotVVM.Framework.Controls.DotvvmMarkupControl"),
        Some(TypeId::DOTVVM_MARKUP_CONTROL)
    );
    assert_eq!(
        types.lookup("DotVVM.Framework.Controls.Infrastructure.DotvvmView"),
        Some(TypeId::DOTVVM_VIEW)
    );
    assert!(types.lookup("System.Collections.Generic.List").is_none());
}

#[test]
fn register_is_idempotent_per_full_name() {
    let types = TypeRegistry::new();
    let first = types.register(TypeDefinition::class("MyApp", "Page"));
    let second = types.register(TypeDefinition::class("MyApp", "Page"));
    assert_eq!(first, second);
    assert!(first.0 >= TypeId::FIRST_USER);
}

#[test]
fn constructed_types_are_interned() {
    let types = TypeRegistry::new();
    let list = types.construct_generic(TypeId::LIST, &[TypeId::INT32]).unwrap();
    assert_eq!(types.construct_generic(TypeId::LIST, &[TypeId::INT32]), Some(list));
    assert_eq!(types.array_of(TypeId::INT32), types.array_of(TypeId::INT32));
    assert_ne!(types.array_of(TypeId::INT32), types.array_of(TypeId::INT64));
    assert_eq!(types.generic_parts(list).unwrap().0, TypeId::LIST);
    assert!(!types.is_generic_definition(list));
    assert!(types.is_generic_definition(TypeId::LIST));
}

#[test]
fn construct_generic_checks_arity_and_arguments() {
    let types = TypeRegistry::new();
    assert!(types.construct_generic(TypeId::LIST, &[]).is_none());
    assert!(types.construct_generic(TypeId::LIST, &[TypeId::INT32, TypeId::STRING]).is_none());
    assert!(types.construct_generic(TypeId::STRING, &[TypeId::INT32]).is_none());
    assert!(types.construct_generic(TypeId::LIST, &[TypeId::LIST]).is_none());
    assert!(types.nullable(TypeId::STRING).is_none());
    let nullable_int = types.nullable(TypeId::INT32).unwrap();
    assert!(types.nullable(nullable_int).is_none());
    assert_eq!(types.nullable_underlying(nullable_int), Some(TypeId::INT32));
}

#[test]
fn display_and_full_names() {
    let types = TypeRegistry::new();
    let list = types.construct_generic(TypeId::LIST, &[TypeId::INT32]).unwrap();
    let array = types.array_of(TypeId::STRING);
    let nullable = types.nullable(TypeId::GUID).unwrap();
    let dictionary = types
        .construct_generic(TypeId::DICTIONARY, &[TypeId::STRING, list])
        .unwrap();

    assert_eq!(types.display_name(list), "List<int>");
    assert_eq!(types.display_name(array), "string[]");
    assert_eq!(types.display_name(nullable), "Guid?");
    assert_eq!(types.display_name(dictionary), "Dictionary<string, List<int>>");
    assert_eq!(types.full_name(list), "System.Collections.Generic.List<System.Int32>");
    assert_eq!(types.full_name(array), "System.String[]");
    assert_eq!(types.full_name(TypeId::INT32), "System.Int32");
}

#[test]
fn assignability_follows_bases_and_interfaces() {
    let types = TypeRegistry::new();
    assert!(types.is_assignable(TypeId::DOTVVM_MARKUP_CONTROL, TypeId::DOTVVM_CONTROL));
    assert!(types.is_assignable(TypeId::DOTVVM_MARKUP_CONTROL, TypeId::DOTVVM_BINDABLE_OBJECT));
    assert!(!types.is_assignable(TypeId::DOTVVM_VIEW, TypeId::DOTVVM_MARKUP_CONTROL));
    assert!(types.is_assignable(TypeId::INT32, TypeId::OBJECT));
    assert!(types.is_assignable(TypeId::STRING, TypeId::IENUMERABLE));
    assert!(!types.is_assignable(TypeId::INT32, TypeId::INT64));

    let list = types.construct_generic(TypeId::LIST, &[TypeId::INT32]).unwrap();
    let ints = types.array_of(TypeId::INT32);
    let enumerable = types.construct_generic(TypeId::IENUMERABLE_T, &[TypeId::INT32]).unwrap();
    assert!(types.is_assignable(list, TypeId::IENUMERABLE));
    assert!(!types.is_assignable(ints, list));
    assert!(types.is_assignable(ints, enumerable));
    assert!(types.is_assignable(ints, TypeId::ARRAY));

    let strings = types.array_of(TypeId::STRING);
    let objects = types.array_of(TypeId::OBJECT);
    assert!(types.is_assignable(strings, objects));
    assert!(!types.is_assignable(ints, objects));
}

#[test]
fn attribute_properties_and_markup_options() {
    let types = TypeRegistry::new();
    assert_eq!(
        types.property_type(TypeId::MARKUP_OPTIONS_ATTRIBUTE, "Required"),
        Some(TypeId::BOOLEAN)
    );
    assert_eq!(types.property_type(TypeId::MARKUP_OPTIONS_ATTRIBUTE, "Missing"), None);
    assert!(types.is_attribute(TypeId::MARKUP_OPTIONS_ATTRIBUTE));

    let control = types.register(
        TypeDefinition::class("MyApp.Controls", "Renamed").with_base(TypeId::DOTVVM_MARKUP_CONTROL),
    );
    assert!(types.markup_options(control).is_none());
    types.set_markup_options(
        control,
        ControlMarkupOptions {
            primary_name: Some("Other".into()),
            alternative_names: Vec::new(),
        },
    );
    assert!(types.markup_options(control).unwrap().declares_tag_names());
}

#[test]
fn empty_primary_name_declares_no_tag_names() {
    let unnamed = ControlMarkupOptions {
        primary_name: Some(String::new()),
        alternative_names: Vec::new(),
    };
    assert!(!unnamed.declares_tag_names());
    assert!(!ControlMarkupOptions::default().declares_tag_names());

    let aliased = ControlMarkupOptions {
        primary_name: Some(String::new()),
        alternative_names: vec!["alias".into()],
    };
    assert!(aliased.declares_tag_names());
}

#[test]
fn debug_output_summarizes_the_registry() {
    let types = TypeRegistry::new();
    let builtins = types.len();
    types.register(TypeDefinition::class("MyApp", "Page"));
    let debug = format!("{types:?}");
    assert!(debug.starts_with("TypeRegistry"), "{debug}");
    assert!(debug.contains(&format!("types: {}", builtins + 1)), "{debug}");
}

#[test]
fn parallel_construction_yields_one_id() {
    let types = TypeRegistry::new();
    let ids: Vec<TypeId> = (0..64)
        .into_par_iter()
        .map(|_| types.construct_generic(TypeId::LIST, &[TypeId::STRING]).unwrap())
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));

    let arrays: Vec<TypeId> = (0..64)
        .into_par_iter()
        .map(|_| types.array_of(TypeId::DOUBLE))
        .collect();
    assert!(arrays.windows(2).all(|pair| pair[0] == pair[1]));
}
