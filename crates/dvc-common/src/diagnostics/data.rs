//! Diagnostic message table.
//!
//! Keep `diagnostic_codes`, `diagnostic_messages` and `DIAGNOSTIC_MESSAGES`
//! in sync; `diagnostics_tests` checks that every code has exactly one entry.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    // scanner and binding grammar
    pub const UNEXPECTED_TOKEN: u32 = 1001;
    pub const IDENTIFIER_EXPECTED: u32 = 1002;
    pub const EXPRESSION_EXPECTED: u32 = 1003;
    pub const TOKEN_EXPECTED: u32 = 1004;
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1005;
    pub const INVALID_NUMERIC_LITERAL: u32 = 1006;
    pub const INVALID_CHARACTER: u32 = 1007;
    pub const TYPE_EXPECTED: u32 = 1008;
    pub const UNTERMINATED_INTERPOLATION: u32 = 1009;
    pub const DIRECTIVE_NAME_EXPECTED: u32 = 1010;
    pub const NESTING_TOO_DEEP: u32 = 1011;
    pub const INVALID_ESCAPE_SEQUENCE: u32 = 1012;
    // directive shape and semantics
    pub const BASE_TYPE_NOT_FOUND: u32 = 2001;
    pub const BASE_TYPE_MUST_DERIVE_FROM_MARKUP_CONTROL: u32 = 2002;
    pub const MARKUP_CONTROL_CANNOT_DECLARE_TAG_NAMES: u32 = 2003;
    pub const CANNOT_RESOLVE_PROPERTY_DECLARATION: u32 = 2004;
    pub const PROPERTY_TYPE_EXPECTED: u32 = 2005;
    pub const PROPERTY_NAME_EXPECTED: u32 = 2006;
    pub const PROPERTY_ATTRIBUTE_FORM: u32 = 2007;
    pub const PROPERTY_ATTRIBUTE_VALUE_NOT_CONSTANT: u32 = 2008;
    pub const PROPERTY_ALREADY_DECLARED: u32 = 2009;
    pub const ATTRIBUTE_PROPERTY_NOT_FOUND: u32 = 2010;
    pub const ATTRIBUTE_PROPERTY_VALUE_TYPE: u32 = 2011;
    pub const INVALID_IMPORT_DIRECTIVE: u32 = 2012;
    pub const VIEW_MODEL_DIRECTIVE_MISSING: u32 = 2013;
    pub const DIRECTIVE_SPECIFIED_MORE_THAN_ONCE: u32 = 2014;
    // type resolution
    pub const COULD_NOT_RESOLVE_TYPE: u32 = 3001;
    // constant evaluation
    pub const EXPRESSION_IS_NOT_CONSTANT: u32 = 4001;
    pub const ARRAY_ELEMENTS_MUST_HAVE_SAME_TYPE: u32 = 4002;
    pub const CANNOT_CONVERT_CONSTANT: u32 = 4003;
    pub const CANNOT_INITIALIZE_PROPERTY: u32 = 4004;
    pub const INITIALIZER_IS_NOT_CONSTANT: u32 = 4005;
    pub const CONSTANT_OVERFLOW: u32 = 4006;
    pub const DIVISION_BY_ZERO: u32 = 4007;
    pub const OPERATOR_CANNOT_BE_APPLIED: u32 = 4008;
    pub const CONSTANT_NOT_FOUND: u32 = 4009;
    pub const ARRAY_LITERAL_TOO_LARGE: u32 = 4010;
    pub const UNARY_OPERATOR_CANNOT_BE_APPLIED: u32 = 4011;
}

pub mod diagnostic_messages {
    // scanner and binding grammar
    pub const UNEXPECTED_TOKEN: &str = "Unexpected token '{0}'.";
    pub const IDENTIFIER_EXPECTED: &str = "Identifier expected.";
    pub const EXPRESSION_EXPECTED: &str = "Expression expected.";
    pub const TOKEN_EXPECTED: &str = "'{0}' expected.";
    pub const UNTERMINATED_STRING_LITERAL: &str = "Unterminated string literal.";
    pub const INVALID_NUMERIC_LITERAL: &str = "Invalid numeric literal '{0}'.";
    pub const INVALID_CHARACTER: &str = "Invalid character '{0}'.";
    pub const TYPE_EXPECTED: &str = "Type expected.";
    pub const UNTERMINATED_INTERPOLATION: &str = "Unterminated interpolation hole in string.";
    pub const DIRECTIVE_NAME_EXPECTED: &str = "Directive name expected.";
    pub const NESTING_TOO_DEEP: &str = "Expression is nested too deeply.";
    pub const INVALID_ESCAPE_SEQUENCE: &str = "Invalid escape sequence '\\{0}'.";
    // directive shape and semantics
    pub const BASE_TYPE_NOT_FOUND: &str =
        "The type '{0}' specified in baseType directive was not found!";
    pub const BASE_TYPE_MUST_DERIVE_FROM_MARKUP_CONTROL: &str =
        "Markup controls must derive from DotvvmMarkupControl class!";
    pub const MARKUP_CONTROL_CANNOT_DECLARE_TAG_NAMES: &str =
        "Markup controls cannot use the PrimaryName or AlternativeNames properties in the ControlMarkupOptions attribute!";
    pub const CANNOT_RESOLVE_PROPERTY_DECLARATION: &str =
        "Cannot resolve the property declaration.";
    pub const PROPERTY_TYPE_EXPECTED: &str = "Property type expected";
    pub const PROPERTY_NAME_EXPECTED: &str = "Property name expected.";
    pub const PROPERTY_ATTRIBUTE_FORM: &str =
        "Property attributes must be in the form Attribute.Property = value.";
    pub const PROPERTY_ATTRIBUTE_VALUE_NOT_CONSTANT: &str =
        "Value for property {0} of attribute {1} is missing or not a constant.";
    pub const PROPERTY_ALREADY_DECLARED: &str = "Property '{0}' is already declared on '{1}'.";
    pub const ATTRIBUTE_PROPERTY_NOT_FOUND: &str = "Attribute '{0}' has no property '{1}'.";
    pub const ATTRIBUTE_PROPERTY_VALUE_TYPE: &str =
        "Attribute property '{0}.{1}' expects a value of type '{2}'.";
    pub const INVALID_IMPORT_DIRECTIVE: &str =
        "Import directive value is not a valid namespace or alias declaration.";
    pub const VIEW_MODEL_DIRECTIVE_MISSING: &str =
        "The @viewModel directive is missing in the page!";
    pub const DIRECTIVE_SPECIFIED_MORE_THAN_ONCE: &str =
        "The directive '@{0}' cannot be specified more than once.";
    // type resolution
    pub const COULD_NOT_RESOLVE_TYPE: &str = "Could not resolve type '{0}'.";
    // constant evaluation
    pub const EXPRESSION_IS_NOT_CONSTANT: &str = "Expression '{0}' is not a constant.";
    pub const ARRAY_ELEMENTS_MUST_HAVE_SAME_TYPE: &str =
        "Array elements must have the same type, found '{0}' and '{1}'.";
    pub const CANNOT_CONVERT_CONSTANT: &str =
        "Cannot convert a constant of type '{0}' to type '{1}'.";
    pub const CANNOT_INITIALIZE_PROPERTY: &str =
        "Cannot initialize property '{0}' of type '{1}' with value of type '{2}'.";
    pub const INITIALIZER_IS_NOT_CONSTANT: &str =
        "Cannot initialize property '{0}': the initial value is not a constant.";
    pub const CONSTANT_OVERFLOW: &str = "Constant expression overflows type '{0}'.";
    pub const DIVISION_BY_ZERO: &str = "Division by zero in constant expression.";
    pub const OPERATOR_CANNOT_BE_APPLIED: &str =
        "Operator '{0}' cannot be applied to operands of type '{1}' and '{2}'.";
    pub const CONSTANT_NOT_FOUND: &str = "Could not resolve constant '{0}'.";
    pub const ARRAY_LITERAL_TOO_LARGE: &str = "Array literal has too many elements.";
    pub const UNARY_OPERATOR_CANNOT_BE_APPLIED: &str =
        "Operator '{0}' cannot be applied to an operand of type '{1}'.";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::UNEXPECTED_TOKEN,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNEXPECTED_TOKEN,
    },
    DiagnosticMessage {
        code: diagnostic_codes::IDENTIFIER_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::IDENTIFIER_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPRESSION_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPRESSION_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TOKEN_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TOKEN_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNTERMINATED_STRING_LITERAL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_NUMERIC_LITERAL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_NUMERIC_LITERAL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_CHARACTER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_CHARACTER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_INTERPOLATION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNTERMINATED_INTERPOLATION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DIRECTIVE_NAME_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DIRECTIVE_NAME_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NESTING_TOO_DEEP,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NESTING_TOO_DEEP,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_ESCAPE_SEQUENCE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_ESCAPE_SEQUENCE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::BASE_TYPE_NOT_FOUND,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::BASE_TYPE_NOT_FOUND,
    },
    DiagnosticMessage {
        code: diagnostic_codes::BASE_TYPE_MUST_DERIVE_FROM_MARKUP_CONTROL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::BASE_TYPE_MUST_DERIVE_FROM_MARKUP_CONTROL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MARKUP_CONTROL_CANNOT_DECLARE_TAG_NAMES,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MARKUP_CONTROL_CANNOT_DECLARE_TAG_NAMES,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_RESOLVE_PROPERTY_DECLARATION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_RESOLVE_PROPERTY_DECLARATION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PROPERTY_TYPE_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PROPERTY_TYPE_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PROPERTY_NAME_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PROPERTY_NAME_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PROPERTY_ATTRIBUTE_FORM,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PROPERTY_ATTRIBUTE_FORM,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PROPERTY_ATTRIBUTE_VALUE_NOT_CONSTANT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PROPERTY_ATTRIBUTE_VALUE_NOT_CONSTANT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PROPERTY_ALREADY_DECLARED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PROPERTY_ALREADY_DECLARED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ATTRIBUTE_PROPERTY_NOT_FOUND,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ATTRIBUTE_PROPERTY_NOT_FOUND,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ATTRIBUTE_PROPERTY_VALUE_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ATTRIBUTE_PROPERTY_VALUE_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_IMPORT_DIRECTIVE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_IMPORT_DIRECTIVE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::VIEW_MODEL_DIRECTIVE_MISSING,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::VIEW_MODEL_DIRECTIVE_MISSING,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DIRECTIVE_SPECIFIED_MORE_THAN_ONCE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DIRECTIVE_SPECIFIED_MORE_THAN_ONCE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::COULD_NOT_RESOLVE_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::COULD_NOT_RESOLVE_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPRESSION_IS_NOT_CONSTANT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPRESSION_IS_NOT_CONSTANT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ARRAY_ELEMENTS_MUST_HAVE_SAME_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ARRAY_ELEMENTS_MUST_HAVE_SAME_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_CONVERT_CONSTANT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_CONVERT_CONSTANT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_INITIALIZE_PROPERTY,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_INITIALIZE_PROPERTY,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INITIALIZER_IS_NOT_CONSTANT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INITIALIZER_IS_NOT_CONSTANT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONSTANT_OVERFLOW,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CONSTANT_OVERFLOW,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DIVISION_BY_ZERO,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DIVISION_BY_ZERO,
    },
    DiagnosticMessage {
        code: diagnostic_codes::OPERATOR_CANNOT_BE_APPLIED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::OPERATOR_CANNOT_BE_APPLIED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONSTANT_NOT_FOUND,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CONSTANT_NOT_FOUND,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ARRAY_LITERAL_TOO_LARGE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ARRAY_LITERAL_TOO_LARGE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNARY_OPERATOR_CANNOT_BE_APPLIED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNARY_OPERATOR_CANNOT_BE_APPLIED,
    },
];
