//! Compile-time constant values.

use std::fmt;

use serde::Serialize;

use crate::registry::TypeRegistry;
use crate::types::TypeId;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConstantValue {
    Null,
    Bool(bool),
    Char(char),
    Int(i32),
    Long(i64),
    Double(f64),
    String(String),
    Array {
        element_type: TypeId,
        items: Vec<ConstantValue>,
    },
    /// `default(T)` of a value type without a literal form, such as `Guid`.
    Default(TypeId),
}

impl ConstantValue {
    /// Runtime type of the value; `None` for `null`.
    #[must_use]
    pub fn type_id(&self, types: &TypeRegistry) -> Option<TypeId> {
        Some(match self {
            Self::Null => return None,
            Self::Bool(_) => TypeId::BOOLEAN,
            Self::Char(_) => TypeId::CHAR,
            Self::Int(_) => TypeId::INT32,
            Self::Long(_) => TypeId::INT64,
            Self::Double(_) => TypeId::DOUBLE,
            Self::String(_) => TypeId::STRING,
            Self::Array { element_type, .. } => types.array_of(*element_type),
            Self::Default(id) => *id,
        })
    }

    /// Short type name for messages; `null` for the null constant.
    #[must_use]
    pub fn type_name(&self, types: &TypeRegistry) -> String {
        self.type_id(types)
            .map_or_else(|| "null".to_string(), |id| types.display_name(id))
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn int_array(items: impl IntoIterator<Item = i32>) -> Self {
        Self::Array {
            element_type: TypeId::INT32,
            items: items.into_iter().map(Self::Int).collect(),
        }
    }
}

/// Shortest round-trip digits; exponent form (`1E+21`, `1E-05`) outside
/// `1e-4 <= |value| < 1e15`.
fn write_double(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("NaN");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if value == 0.0 {
        return write!(f, "{value}");
    }
    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return write!(f, "{value}");
    };
    let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;
    if (-4..15).contains(&exponent) {
        return write!(f, "{value}");
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    write!(f, "{mantissa}E{sign}{:02}", exponent.unsigned_abs())
}

/// Text form used by string concatenation and interpolation.
impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Char(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Long(value) => write!(f, "{value}"),
            Self::Double(value) => write_double(f, *value),
            Self::String(value) => f.write_str(value),
            Self::Array { items, .. } => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Default(TypeId::GUID) => f.write_str("00000000-0000-0000-0000-000000000000"),
            Self::Default(_) => Ok(()),
        }
    }
}
