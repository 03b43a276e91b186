//! Source-like rendering of syntax nodes, used in diagnostic messages.

use std::fmt;

use crate::syntax::{
    BindingNode, Identifier, InterpolationPart, LiteralValue, NodeKind, TypeReference,
    TypeReferenceKind,
};

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Long(value) => write!(f, "{value}L"),
            Self::Double(value) if value.fract() == 0.0 && value.is_finite() => {
                write!(f, "{value:.1}")
            }
            Self::Double(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value:?}"),
        }
    }
}

impl fmt::Display for BindingNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Name(identifier) => write!(f, "{identifier}"),
            NodeKind::GenericName {
                name,
                type_arguments,
            } => {
                write!(f, "{name}<")?;
                write_list(f, type_arguments)?;
                f.write_str(">")
            }
            NodeKind::MemberAccess { target, member } => write!(f, "{target}.{member}"),
            NodeKind::Literal(value) => write!(f, "{value}"),
            NodeKind::InterpolatedString(parts) => {
                f.write_str("$\"")?;
                for part in parts {
                    match part {
                        InterpolationPart::Text(text) => {
                            f.write_str(&text.replace('{', "{{").replace('}', "}}"))?;
                        }
                        InterpolationPart::Expression(expression) => write!(f, "{{{expression}}}")?,
                    }
                }
                f.write_str("\"")
            }
            NodeKind::Unary { operator, operand } => write!(f, "{}{operand}", operator.symbol()),
            NodeKind::Binary {
                operator,
                left,
                right,
            } => write!(f, "{left} {} {right}", operator.symbol()),
            NodeKind::Parenthesized(inner) => write!(f, "({inner})"),
            NodeKind::ArrayInitializer(elements) => {
                f.write_str("[")?;
                write_list(f, elements)?;
                f.write_str("]")
            }
            NodeKind::TypeReference(reference) => write!(f, "{reference}"),
            NodeKind::PropertyDeclaration(declaration) => {
                write!(f, "{} {}", declaration.property_type, declaration.name)?;
                if let Some(initializer) = &declaration.initializer {
                    write!(f, " = {initializer}")?;
                }
                for attribute in &declaration.attributes {
                    write!(f, ", {attribute}")?;
                }
                Ok(())
            }
            NodeKind::Missing => Ok(()),
        }
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeReferenceKind::Actual(node) => write!(f, "{node}"),
            TypeReferenceKind::Array(element) => write!(f, "{element}[]"),
            TypeReferenceKind::Nullable(inner) => write!(f, "{inner}?"),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
