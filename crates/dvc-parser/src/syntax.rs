//! Syntax tree of directive values.
//!
//! Nodes own their children. Spans are byte offsets relative to the start
//! of the parsed directive value.

use dvc_common::Span;
use serde::Serialize;
use smallvec::SmallVec;

// =============================================================================
// Identifiers and literals
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    #[must_use]
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Empty placeholder identifier at `pos`.
    #[must_use]
    pub fn missing(pos: u32) -> Self {
        Self::new("", Span::at(pos))
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum LiteralValue {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    String(String),
}

// =============================================================================
// Operators
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Assign,
}

impl BinaryOperator {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Assign => "=",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    Negate,
    Plus,
}

impl UnaryOperator {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Plus => "+",
        }
    }
}

// =============================================================================
// Nodes
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BindingNode {
    pub kind: NodeKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum NodeKind {
    Name(Identifier),
    GenericName {
        name: Identifier,
        type_arguments: Vec<TypeReference>,
    },
    /// `target.member`; `member` is a `Name` or `GenericName`.
    MemberAccess {
        target: Box<BindingNode>,
        member: Box<BindingNode>,
    },
    Literal(LiteralValue),
    InterpolatedString(Vec<InterpolationPart>),
    Unary {
        operator: UnaryOperator,
        operand: Box<BindingNode>,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<BindingNode>,
        right: Box<BindingNode>,
    },
    Parenthesized(Box<BindingNode>),
    ArrayInitializer(Vec<BindingNode>),
    TypeReference(TypeReference),
    PropertyDeclaration(Box<PropertyDeclarationSyntax>),
    /// Placeholder for a piece the grammar expected but did not find.
    Missing,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum InterpolationPart {
    Text(String),
    Expression(BindingNode),
}

impl BindingNode {
    #[must_use]
    pub const fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }

    #[must_use]
    pub const fn missing(pos: u32) -> Self {
        Self::new(NodeKind::Missing, Span::at(pos))
    }

    #[must_use]
    pub fn name(identifier: Identifier) -> Self {
        let span = identifier.span;
        Self::new(NodeKind::Name(identifier), span)
    }

    /// Empty string literal at `pos`, used where a literal is required but
    /// absent.
    #[must_use]
    pub fn empty_literal(pos: u32) -> Self {
        Self::new(
            NodeKind::Literal(LiteralValue::String(String::new())),
            Span::at(pos),
        )
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self.kind, NodeKind::Missing)
    }

    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self.kind, NodeKind::Literal(_))
    }

    /// The identifier if this node is a bare, non-generic name.
    #[must_use]
    pub const fn as_simple_name(&self) -> Option<&Identifier> {
        match &self.kind {
            NodeKind::Name(identifier) => Some(identifier),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_type_reference(&self) -> Option<&TypeReference> {
        match &self.kind {
            NodeKind::TypeReference(reference) => Some(reference),
            _ => None,
        }
    }

    /// Segments of a dotted name without generic arguments (`A.B.C`).
    #[must_use]
    pub fn qualified_name_segments(&self) -> Option<SmallVec<[&str; 4]>> {
        match &self.kind {
            NodeKind::Name(identifier) if !identifier.is_missing() => {
                let mut segments = SmallVec::new();
                segments.push(identifier.name.as_str());
                Some(segments)
            }
            NodeKind::MemberAccess { target, member } => {
                let mut segments = target.qualified_name_segments()?;
                segments.push(member.as_simple_name().filter(|m| !m.is_missing())?.name.as_str());
                Some(segments)
            }
            _ => None,
        }
    }

    /// `A.B.C` for a dotted name without generic arguments.
    #[must_use]
    pub fn qualified_name(&self) -> Option<String> {
        self.qualified_name_segments()
            .map(|segments| segments.join("."))
    }
}

// =============================================================================
// Type references
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeReference {
    pub kind: TypeReferenceKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum TypeReferenceKind {
    /// A (possibly qualified, possibly generic) name: `Name`, `GenericName`
    /// or `MemberAccess` node.
    Actual(Box<BindingNode>),
    Array(Box<TypeReference>),
    Nullable(Box<TypeReference>),
}

impl TypeReference {
    #[must_use]
    pub fn actual(node: BindingNode) -> Self {
        let span = node.span;
        Self {
            kind: TypeReferenceKind::Actual(Box::new(node)),
            span,
        }
    }

    /// `TypeReference` naming `name` directly, with an empty span at `pos`.
    #[must_use]
    pub fn named(name: &str, pos: u32) -> Self {
        Self::actual(BindingNode::name(Identifier::new(name, Span::at(pos))))
    }

    #[must_use]
    pub fn array_of(element: Self, span: Span) -> Self {
        Self {
            kind: TypeReferenceKind::Array(Box::new(element)),
            span,
        }
    }

    #[must_use]
    pub fn nullable_of(inner: Self, span: Span) -> Self {
        Self {
            kind: TypeReferenceKind::Nullable(Box::new(inner)),
            span,
        }
    }

    #[must_use]
    pub fn into_node(self) -> BindingNode {
        let span = self.span;
        BindingNode::new(NodeKind::TypeReference(self), span)
    }
}

// =============================================================================
// Property declarations
// =============================================================================

/// `<type> <name> [= <initializer>] (, <attribute>)*`
///
/// The slots hold whatever the grammar found; the directive compiler checks
/// that `property_type` is a type reference and `name` a bare identifier.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PropertyDeclarationSyntax {
    pub property_type: BindingNode,
    pub name: BindingNode,
    pub initializer: Option<BindingNode>,
    pub attributes: Vec<BindingNode>,
}
