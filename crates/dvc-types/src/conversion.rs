//! Implicit constant conversions and default values.
//!
//! Supported conversions, besides identity and reference assignability:
//! `null` to reference and nullable types, `int` to `long`/`double`,
//! `long` to `double`, `char` to `int`/`long`/`double`, a one-character
//! string to `char`, `T` to `T?`, and arrays element by element.

use crate::constant::ConstantValue;
use crate::registry::TypeRegistry;
use crate::types::TypeId;

/// `default(T)`.
#[must_use]
pub fn default_value(types: &TypeRegistry, target: TypeId) -> ConstantValue {
    match target {
        TypeId::BOOLEAN => ConstantValue::Bool(false),
        TypeId::CHAR => ConstantValue::Char('\0'),
        TypeId::INT32 => ConstantValue::Int(0),
        TypeId::INT64 => ConstantValue::Long(0),
        TypeId::DOUBLE => ConstantValue::Double(0.0),
        _ if types.is_value_type(target) && types.nullable_underlying(target).is_none() => {
            ConstantValue::Default(target)
        }
        _ => ConstantValue::Null,
    }
}

/// Convert `value` to `target`, or `None` when no implicit conversion
/// exists.
#[must_use]
pub fn convert_constant(
    types: &TypeRegistry,
    value: &ConstantValue,
    target: TypeId,
) -> Option<ConstantValue> {
    if let Some(underlying) = types.nullable_underlying(target) {
        return match value {
            ConstantValue::Null => Some(ConstantValue::Null),
            _ => convert_constant(types, value, underlying),
        };
    }

    let converted = match (value, target) {
        (ConstantValue::Null, _) => return (!types.is_value_type(target)).then_some(ConstantValue::Null),
        (ConstantValue::Int(v), TypeId::INT64) => ConstantValue::Long(i64::from(*v)),
        (ConstantValue::Int(v), TypeId::DOUBLE) => ConstantValue::Double(f64::from(*v)),
        // i64 → f64 rounds, as the runtime conversion does.
        #[allow(clippy::cast_precision_loss)]
        (ConstantValue::Long(v), TypeId::DOUBLE) => ConstantValue::Double(*v as f64),
        (ConstantValue::Char(c), TypeId::INT32) => ConstantValue::Int(u32::from(*c) as i32),
        (ConstantValue::Char(c), TypeId::INT64) => ConstantValue::Long(i64::from(u32::from(*c))),
        (ConstantValue::Char(c), TypeId::DOUBLE) => ConstantValue::Double(f64::from(u32::from(*c))),
        (ConstantValue::String(text), TypeId::CHAR) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => ConstantValue::Char(c),
                _ => return None,
            }
        }
        (ConstantValue::Array { items, .. }, _) if types.element_type(target).is_some() => {
            let element_type = types.element_type(target)?;
            let items = items
                .iter()
                .map(|item| convert_constant(types, item, element_type))
                .collect::<Option<Vec<_>>>()?;
            ConstantValue::Array {
                element_type,
                items,
            }
        }
        _ => {
            let source = value.type_id(types)?;
            return types
                .is_assignable(source, target)
                .then(|| value.clone());
        }
    };
    Some(converted)
}
