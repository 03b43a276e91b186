use dvc_common::diagnostic_codes;
use dvc_parser::{GrammarEntryPoint, parse};
use dvc_types::{ConstantValue, TypeId, TypeRegistry};

use crate::constant_eval::ConstantEvaluator;
use crate::test_support::{Fixture, TESTS_NAMESPACE, fixture, imports};

fn evaluate_in(
    fixture: &Fixture,
    text: &str,
    expected: Option<TypeId>,
) -> (Option<ConstantValue>, Vec<String>, Vec<u32>) {
    let imports = imports(&[TESTS_NAMESPACE, "DotVVM.Framework.Tests.Constants"]);
    let parsed = parse(text, GrammarEntryPoint::Expression);
    assert!(
        parsed.diagnostics.is_empty(),
        "'{text}' should parse cleanly: {:?}",
        parsed.diagnostics
    );
    let mut evaluator = ConstantEvaluator::new(&fixture.types, &imports);
    let value = evaluator.evaluate(&parsed.root, expected);
    let diagnostics = evaluator.into_diagnostics();
    let messages = diagnostics.iter().map(|d| d.message_text.clone()).collect();
    let codes = diagnostics.iter().map(|d| d.code).collect();
    (value, messages, codes)
}

fn evaluate(text: &str) -> (Option<ConstantValue>, Vec<u32>) {
    let (value, _, codes) = evaluate_in(&fixture(), text, None);
    (value, codes)
}

fn value_of(text: &str) -> ConstantValue {
    let (value, codes) = evaluate(text);
    assert!(codes.is_empty(), "'{text}' reported {codes:?}");
    value.unwrap_or_else(|| panic!("'{text}' should evaluate"))
}

fn array_in(types: &TypeRegistry, element: TypeId) -> TypeId {
    types.array_of(element)
}

// =============================================================================
// Arithmetic
// =============================================================================

#[test]
fn integer_arithmetic_follows_precedence() {
    assert_eq!(value_of("1 + 2 * 3"), ConstantValue::Int(7));
    assert_eq!(value_of("(1 + 2) * 3"), ConstantValue::Int(9));
    assert_eq!(value_of("9 % 5"), ConstantValue::Int(4));
    assert_eq!(value_of("7 / 2"), ConstantValue::Int(3));
    assert_eq!(value_of("-7 % 3"), ConstantValue::Int(-1));
    assert_eq!(value_of("-5 + +2"), ConstantValue::Int(-3));
}

#[test]
fn numeric_promotion_widens_to_long_and_double() {
    assert_eq!(value_of("1 + 2L"), ConstantValue::Long(3));
    assert_eq!(value_of("1 + 0.5"), ConstantValue::Double(1.5));
    assert_eq!(value_of("Big + 1"), ConstantValue::Long(10_000_000_001));
    assert_eq!(value_of("2147483648"), ConstantValue::Long(2_147_483_648));
}

#[test]
fn integral_overflow_and_division_by_zero_are_reported() {
    let (value, codes) = evaluate("2147483647 + 1");
    assert_eq!(value, None);
    assert_eq!(codes, [diagnostic_codes::CONSTANT_OVERFLOW]);

    let (value, codes) = evaluate("1 / 0");
    assert_eq!(value, None);
    assert_eq!(codes, [diagnostic_codes::DIVISION_BY_ZERO]);

    let (value, codes) = evaluate("5 % (2 - 2)");
    assert_eq!(value, None);
    assert_eq!(codes, [diagnostic_codes::DIVISION_BY_ZERO]);

    // Floating division follows IEEE rules.
    assert_eq!(value_of("1.0 / 0"), ConstantValue::Double(f64::INFINITY));
}

#[test]
fn long_operator_chain_folds_without_depth() {
    let sum = format!("1{}", " + 1".repeat(299));
    assert_eq!(value_of(&sum), ConstantValue::Int(300));

    let mixed = format!("2{}", " * 1 - 1 + 1".repeat(150));
    assert_eq!(value_of(&mixed), ConstantValue::Int(2));
}

#[test]
fn every_operand_of_a_chain_reports() {
    let (value, codes) = evaluate("Nope + 1 + Missing.Too");
    assert_eq!(value, None);
    assert_eq!(
        codes,
        [diagnostic_codes::CONSTANT_NOT_FOUND, diagnostic_codes::CONSTANT_NOT_FOUND]
    );
}

#[test]
fn operators_on_wrong_operand_types_are_reported() {
    let (_, messages, codes) = evaluate_in(&fixture(), "true - 1", None);
    assert_eq!(codes, [diagnostic_codes::OPERATOR_CANNOT_BE_APPLIED]);
    assert_eq!(
        messages,
        ["Operator '-' cannot be applied to operands of type 'bool' and 'int'."]
    );

    let (value, codes) = evaluate("-\"x\"");
    assert_eq!(value, None);
    assert_eq!(codes, [diagnostic_codes::UNARY_OPERATOR_CANNOT_BE_APPLIED]);
}

// =============================================================================
// Strings
// =============================================================================

#[test]
fn concatenation_and_interpolation() {
    assert_eq!(
        value_of(r#""t" + "e" + $"{"s"}t{1+1}" + Test"#),
        ConstantValue::String("test2test".into())
    );
    assert_eq!(
        value_of(r#""n: " + 1.5 + true"#),
        ConstantValue::String("n: 1.5True".into())
    );
    assert_eq!(value_of(r#""x" + null"#), ConstantValue::String("x".into()));
    assert_eq!(value_of("1 + 2 + \"!\""), ConstantValue::String("3!".into()));
}

// =============================================================================
// Names
// =============================================================================

#[test]
fn constants_resolve_by_bare_and_qualified_name() {
    assert_eq!(value_of("Six"), ConstantValue::Int(6));
    assert_eq!(value_of("Constants.Six * 2"), ConstantValue::Int(12));
    assert_eq!(
        value_of("DotVVM.Framework.Tests.Constants.Test"),
        ConstantValue::String("test".into())
    );
}

#[test]
fn both_operands_report_their_own_problems() {
    let (_, messages, codes) = evaluate_in(&fixture(), "Unknown + Other.Missing", None);
    assert_eq!(
        codes,
        [
            diagnostic_codes::CONSTANT_NOT_FOUND,
            diagnostic_codes::CONSTANT_NOT_FOUND
        ]
    );
    assert_eq!(messages[0], "Could not resolve constant 'Unknown'.");
    assert_eq!(messages[1], "Could not resolve constant 'Other.Missing'.");
}

#[test]
fn non_constant_forms_are_rejected() {
    let (value, codes) = evaluate("a = 1");
    assert_eq!(value, None);
    assert_eq!(codes, [diagnostic_codes::EXPRESSION_IS_NOT_CONSTANT]);
}

#[test]
fn deep_expressions_stop_at_the_depth_limit() {
    let text = vec!["1"; 400].join(" + ");
    let (value, codes) = evaluate(&text);
    assert_eq!(value, None);
    assert!(codes.contains(&diagnostic_codes::NESTING_TOO_DEEP));
}

// =============================================================================
// Array literals
// =============================================================================

#[test]
fn array_literal_uses_expected_element_type() {
    let fixture = fixture();
    let ints = array_in(&fixture.types, TypeId::INT32);
    let (value, _, codes) = evaluate_in(&fixture, "[1, 1+1, 9/3, 9%5, 2*3-1, Six]", Some(ints));
    assert!(codes.is_empty(), "{codes:?}");
    assert_eq!(value, Some(ConstantValue::int_array(1..=6)));

    let longs = array_in(&fixture.types, TypeId::INT64);
    let (value, _, _) = evaluate_in(&fixture, "[1, 2]", Some(longs));
    assert_eq!(
        value,
        Some(ConstantValue::Array {
            element_type: TypeId::INT64,
            items: vec![ConstantValue::Long(1), ConstantValue::Long(2)],
        })
    );
}

#[test]
fn array_literal_infers_int_long_widening() {
    assert_eq!(
        value_of("[1, 2L]"),
        ConstantValue::Array {
            element_type: TypeId::INT64,
            items: vec![ConstantValue::Long(1), ConstantValue::Long(2)],
        }
    );
    assert_eq!(
        value_of("[null, 'a']"),
        ConstantValue::Array {
            element_type: TypeId::STRING,
            items: vec![ConstantValue::Null, ConstantValue::String("a".into())],
        }
    );
    assert_eq!(
        value_of("[]"),
        ConstantValue::Array {
            element_type: TypeId::OBJECT,
            items: Vec::new(),
        }
    );
}

#[test]
fn mixed_array_elements_are_rejected() {
    let fixture = fixture();
    let strings = array_in(&fixture.types, TypeId::STRING);
    let (value, messages, _) = evaluate_in(&fixture, "[1, '', '', '']", Some(strings));
    assert_eq!(value, None);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("same type"), "{messages:?}");

    let ints = array_in(&fixture.types, TypeId::INT32);
    let (value, messages, _) = evaluate_in(&fixture, "[1, 0.0, 0.0, 0.0]", Some(ints));
    assert_eq!(value, None);
    assert_eq!(
        messages,
        ["Array elements must have the same type, found 'int' and 'double'."]
    );

    let (value, codes) = evaluate("[1, null]");
    assert_eq!(value, None);
    assert_eq!(codes, [diagnostic_codes::ARRAY_ELEMENTS_MUST_HAVE_SAME_TYPE]);
}
