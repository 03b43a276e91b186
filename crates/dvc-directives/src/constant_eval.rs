//! Constant evaluation of property initializers.
//!
//! Evaluates literals, arithmetic, string concatenation and interpolation,
//! named constants and array literals. Spans in the reported diagnostics are
//! relative to the directive value, like the parser's.
//!
//! Array literals are typed by the expected element type when every item
//! converts to it; otherwise the element type is inferred from the items,
//! where `int` and `long` widen to `long` and any other mix is an error.

use dvc_common::limits::{MAX_ARRAY_LITERAL_ELEMENTS, MAX_CONSTANT_EVAL_DEPTH};
use dvc_common::{Diagnostic, Span, diagnostic_codes};
use dvc_parser::{BinaryOperator, BindingNode, InterpolationPart, LiteralValue, NodeKind, UnaryOperator};
use dvc_types::{ConstantValue, ImportList, TypeId, TypeRegistry, TypeResolver, convert_constant};
use tracing::debug;

pub struct ConstantEvaluator<'a> {
    resolver: &'a dyn TypeResolver,
    imports: &'a ImportList,
    diagnostics: Vec<Diagnostic>,
    depth: u32,
}

enum ArithmeticError {
    Overflow,
    DivisionByZero,
    NotApplicable,
}

impl<'a> ConstantEvaluator<'a> {
    #[must_use]
    pub fn new(resolver: &'a dyn TypeResolver, imports: &'a ImportList) -> Self {
        Self {
            resolver,
            imports,
            diagnostics: Vec::new(),
            depth: 0,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn types(&self) -> &'a TypeRegistry {
        self.resolver.types()
    }

    fn error(&mut self, code: u32, span: Span, args: &[&str]) {
        self.diagnostics.push(Diagnostic::from_code(code, span, args));
    }

    /// Evaluate `node`. `expected` only guides array literals; the caller
    /// converts the result. Returns `None` after reporting why, or silently
    /// for `Missing` nodes the parser already reported.
    pub fn evaluate(&mut self, node: &BindingNode, expected: Option<TypeId>) -> Option<ConstantValue> {
        if self.depth >= MAX_CONSTANT_EVAL_DEPTH {
            self.error(diagnostic_codes::NESTING_TOO_DEEP, node.span, &[]);
            return None;
        }
        self.depth += 1;
        let value = self.evaluate_node(node, expected);
        self.depth -= 1;
        value
    }

    fn evaluate_node(&mut self, node: &BindingNode, expected: Option<TypeId>) -> Option<ConstantValue> {
        match &node.kind {
            NodeKind::Literal(literal) => Some(literal_constant(literal)),
            NodeKind::InterpolatedString(parts) => self.evaluate_interpolation(parts),
            NodeKind::Name(_) | NodeKind::MemberAccess { .. } => self.evaluate_name(node),
            NodeKind::Parenthesized(inner) => self.evaluate(inner, expected),
            NodeKind::Unary { operator, operand } => {
                let value = self.evaluate(operand, None)?;
                self.evaluate_unary(*operator, value, node.span)
            }
            NodeKind::Binary {
                operator: BinaryOperator::Assign,
                ..
            } => self.not_constant(node),
            NodeKind::Binary { .. } => self.evaluate_chain(node),
            NodeKind::ArrayInitializer(elements) => self.evaluate_array(elements, expected, node.span),
            NodeKind::GenericName { .. }
            | NodeKind::TypeReference(_)
            | NodeKind::PropertyDeclaration(_) => self.not_constant(node),
            NodeKind::Missing => None,
        }
    }

    fn not_constant(&mut self, node: &BindingNode) -> Option<ConstantValue> {
        let text = node.to_string();
        self.error(diagnostic_codes::EXPRESSION_IS_NOT_CONSTANT, node.span, &[&text]);
        None
    }

    fn evaluate_interpolation(&mut self, parts: &[InterpolationPart]) -> Option<ConstantValue> {
        let mut text = String::new();
        let mut complete = true;
        for part in parts {
            match part {
                InterpolationPart::Text(fragment) => text.push_str(fragment),
                InterpolationPart::Expression(expression) => match self.evaluate(expression, None) {
                    Some(value) => text.push_str(&value.to_string()),
                    None => complete = false,
                },
            }
        }
        complete.then_some(ConstantValue::String(text))
    }

    fn evaluate_name(&mut self, node: &BindingNode) -> Option<ConstantValue> {
        let Some(name) = node.qualified_name() else {
            return self.not_constant(node);
        };
        let value = self.resolver.resolve_constant(&name, self.imports);
        if value.is_none() {
            debug!(name = %name, "unresolved constant in initializer");
            self.error(diagnostic_codes::CONSTANT_NOT_FOUND, node.span, &[&name]);
        }
        value
    }

    // =========================================================================
    // Operators
    // =========================================================================

    /// Fold a left-associative operator chain without recursing into its
    /// left spine. Every operand is evaluated so each reports its own
    /// problems.
    fn evaluate_chain(&mut self, node: &BindingNode) -> Option<ConstantValue> {
        let mut links = Vec::new();
        let mut leftmost = node;
        while let NodeKind::Binary { operator, left, right } = &leftmost.kind {
            if *operator == BinaryOperator::Assign {
                break;
            }
            links.push((*operator, right.as_ref(), leftmost.span));
            leftmost = left.as_ref();
        }

        let mut accumulated = self.evaluate(leftmost, None);
        for (operator, right, span) in links.into_iter().rev() {
            let right = self.evaluate(right, None);
            accumulated = match (accumulated, right) {
                (Some(left), Some(right)) => self.evaluate_binary(operator, left, right, span),
                _ => None,
            };
        }
        accumulated
    }

    fn evaluate_unary(&mut self, operator: UnaryOperator, value: ConstantValue, span: Span) -> Option<ConstantValue> {
        let result = match (operator, &value) {
            (UnaryOperator::Plus, ConstantValue::Int(_) | ConstantValue::Long(_) | ConstantValue::Double(_)) => {
                Ok(value.clone())
            }
            (UnaryOperator::Plus, ConstantValue::Char(c)) => Ok(ConstantValue::Int(char_code(*c))),
            (UnaryOperator::Negate, ConstantValue::Int(v)) => {
                v.checked_neg().map(ConstantValue::Int).ok_or(ArithmeticError::Overflow)
            }
            (UnaryOperator::Negate, ConstantValue::Long(v)) => {
                v.checked_neg().map(ConstantValue::Long).ok_or(ArithmeticError::Overflow)
            }
            (UnaryOperator::Negate, ConstantValue::Double(v)) => Ok(ConstantValue::Double(-v)),
            (UnaryOperator::Negate, ConstantValue::Char(c)) => Ok(ConstantValue::Int(-char_code(*c))),
            _ => Err(ArithmeticError::NotApplicable),
        };
        match result {
            Ok(value) => Some(value),
            Err(ArithmeticError::NotApplicable) => {
                let type_name = value.type_name(self.types());
                self.error(
                    diagnostic_codes::UNARY_OPERATOR_CANNOT_BE_APPLIED,
                    span,
                    &[operator.symbol(), &type_name],
                );
                None
            }
            Err(error) => {
                let type_name = value.type_name(self.types());
                self.arithmetic_error(error, span, &type_name);
                None
            }
        }
    }

    fn evaluate_binary(
        &mut self,
        operator: BinaryOperator,
        left: ConstantValue,
        right: ConstantValue,
        span: Span,
    ) -> Option<ConstantValue> {
        if operator == BinaryOperator::Add
            && (matches!(left, ConstantValue::String(_)) || matches!(right, ConstantValue::String(_)))
        {
            return Some(ConstantValue::String(format!("{left}{right}")));
        }

        let result = match (numeric(&left), numeric(&right)) {
            (Some(Numeric::Int(a)), Some(Numeric::Int(b))) => integral(operator, i64::from(a), i64::from(b))
                .and_then(|v| i32::try_from(v).map_err(|_| ArithmeticError::Overflow))
                .map(ConstantValue::Int)
                .map_err(|e| (e, "int")),
            (Some(Numeric::Double(a)), Some(b)) => floating(operator, a, b.as_f64()).map_err(|e| (e, "double")),
            (Some(a), Some(Numeric::Double(b))) => floating(operator, a.as_f64(), b).map_err(|e| (e, "double")),
            (Some(a), Some(b)) => integral(operator, a.as_i64(), b.as_i64())
                .map(ConstantValue::Long)
                .map_err(|e| (e, "long")),
            _ => Err((ArithmeticError::NotApplicable, "")),
        };

        match result {
            Ok(value) => Some(value),
            Err((ArithmeticError::NotApplicable, _)) => {
                let types = self.types();
                let left_type = left.type_name(types);
                let right_type = right.type_name(types);
                self.error(
                    diagnostic_codes::OPERATOR_CANNOT_BE_APPLIED,
                    span,
                    &[operator.symbol(), &left_type, &right_type],
                );
                None
            }
            Err((error, type_name)) => {
                self.arithmetic_error(error, span, type_name);
                None
            }
        }
    }

    fn arithmetic_error(&mut self, error: ArithmeticError, span: Span, type_name: &str) {
        match error {
            ArithmeticError::Overflow => {
                self.error(diagnostic_codes::CONSTANT_OVERFLOW, span, &[type_name]);
            }
            ArithmeticError::DivisionByZero => self.error(diagnostic_codes::DIVISION_BY_ZERO, span, &[]),
            ArithmeticError::NotApplicable => {}
        }
    }

    // =========================================================================
    // Array literals
    // =========================================================================

    fn evaluate_array(
        &mut self,
        elements: &[BindingNode],
        expected: Option<TypeId>,
        span: Span,
    ) -> Option<ConstantValue> {
        if elements.len() > MAX_ARRAY_LITERAL_ELEMENTS {
            self.error(diagnostic_codes::ARRAY_LITERAL_TOO_LARGE, span, &[]);
            return None;
        }
        let types = self.types();
        let expected_element = expected.and_then(|t| types.element_type(t));

        let mut items = Vec::with_capacity(elements.len());
        let mut complete = true;
        for element in elements {
            match self.evaluate(element, expected_element) {
                Some(value) => items.push(value),
                None => complete = false,
            }
        }
        if !complete {
            return None;
        }

        if let Some(element_type) = expected_element {
            if let Some(converted) = convert_items(types, &items, element_type) {
                return Some(ConstantValue::Array {
                    element_type,
                    items: converted,
                });
            }
        }

        let element_type = self.common_element_type(&items, expected_element, span)?;
        let items = convert_items(types, &items, element_type)?;
        Some(ConstantValue::Array {
            element_type,
            items,
        })
    }

    fn common_element_type(
        &mut self,
        items: &[ConstantValue],
        expected_element: Option<TypeId>,
        span: Span,
    ) -> Option<TypeId> {
        let types = self.types();
        let mut common: Option<TypeId> = None;
        let mut has_null = false;
        for item in items {
            let Some(item_type) = item.type_id(types) else {
                has_null = true;
                continue;
            };
            common = match common {
                None => Some(item_type),
                Some(current) if current == item_type => Some(current),
                Some(current) => match widen(current, item_type) {
                    Some(widened) => Some(widened),
                    None => {
                        let (current, item_type) = (types.display_name(current), types.display_name(item_type));
                        self.error(
                            diagnostic_codes::ARRAY_ELEMENTS_MUST_HAVE_SAME_TYPE,
                            span,
                            &[&current, &item_type],
                        );
                        return None;
                    }
                },
            };
        }
        match common {
            None => Some(expected_element.unwrap_or(TypeId::OBJECT)),
            Some(current) if has_null && types.is_value_type(current) => {
                let current = types.display_name(current);
                self.error(
                    diagnostic_codes::ARRAY_ELEMENTS_MUST_HAVE_SAME_TYPE,
                    span,
                    &[&current, "null"],
                );
                None
            }
            Some(current) => Some(current),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

#[derive(Copy, Clone)]
enum Numeric {
    Int(i32),
    Long(i64),
    Double(f64),
}

impl Numeric {
    #[allow(clippy::cast_possible_truncation)]
    fn as_i64(self) -> i64 {
        match self {
            Self::Int(v) => v as i64,
            Self::Long(v) => v,
            // Only reached for integral operands.
            Self::Double(v) => v as i64,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => f64::from(v),
            Self::Long(v) => v as f64,
            Self::Double(v) => v,
        }
    }
}

fn numeric(value: &ConstantValue) -> Option<Numeric> {
    match value {
        ConstantValue::Int(v) => Some(Numeric::Int(*v)),
        ConstantValue::Char(c) => Some(Numeric::Int(char_code(*c))),
        ConstantValue::Long(v) => Some(Numeric::Long(*v)),
        ConstantValue::Double(v) => Some(Numeric::Double(*v)),
        _ => None,
    }
}

#[allow(clippy::cast_possible_wrap)]
const fn char_code(c: char) -> i32 {
    c as u32 as i32
}

fn integral(operator: BinaryOperator, a: i64, b: i64) -> Result<i64, ArithmeticError> {
    let result = match operator {
        BinaryOperator::Add => a.checked_add(b),
        BinaryOperator::Subtract => a.checked_sub(b),
        BinaryOperator::Multiply => a.checked_mul(b),
        BinaryOperator::Divide | BinaryOperator::Modulo if b == 0 => {
            return Err(ArithmeticError::DivisionByZero);
        }
        BinaryOperator::Divide => a.checked_div(b),
        BinaryOperator::Modulo => a.checked_rem(b),
        BinaryOperator::Assign => return Err(ArithmeticError::NotApplicable),
    };
    result.ok_or(ArithmeticError::Overflow)
}

fn floating(operator: BinaryOperator, a: f64, b: f64) -> Result<ConstantValue, ArithmeticError> {
    let value = match operator {
        BinaryOperator::Add => a + b,
        BinaryOperator::Subtract => a - b,
        BinaryOperator::Multiply => a * b,
        BinaryOperator::Divide => a / b,
        BinaryOperator::Modulo => a % b,
        BinaryOperator::Assign => return Err(ArithmeticError::NotApplicable),
    };
    Ok(ConstantValue::Double(value))
}

const fn widen(a: TypeId, b: TypeId) -> Option<TypeId> {
    match (a, b) {
        (TypeId::INT32, TypeId::INT64) | (TypeId::INT64, TypeId::INT32) => Some(TypeId::INT64),
        _ => None,
    }
}

fn convert_items(types: &TypeRegistry, items: &[ConstantValue], element_type: TypeId) -> Option<Vec<ConstantValue>> {
    items
        .iter()
        .map(|item| convert_constant(types, item, element_type))
        .collect()
}

pub(crate) fn literal_constant(literal: &LiteralValue) -> ConstantValue {
    match literal {
        LiteralValue::Null => ConstantValue::Null,
        LiteralValue::Bool(v) => ConstantValue::Bool(*v),
        LiteralValue::Int(v) => ConstantValue::Int(*v),
        LiteralValue::Long(v) => ConstantValue::Long(*v),
        LiteralValue::Double(v) => ConstantValue::Double(*v),
        LiteralValue::String(v) => ConstantValue::String(v.clone()),
    }
}
