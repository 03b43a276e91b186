//! Binding token kinds.

use dvc_common::Span;
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Literals and names
    Identifier,
    IntegerLiteral,
    LongLiteral,
    RealLiteral,
    StringLiteral,
    InterpolatedString,

    // Keywords
    TrueKeyword,
    FalseKeyword,
    NullKeyword,

    // Punctuation
    Dot,
    Comma,
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    LessThan,
    GreaterThan,
    Question,
    Equals,

    // Operators
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,

    Unknown,
    EndOfText,
}

impl TokenKind {
    /// Map an identifier-shaped word to its keyword kind.
    #[must_use]
    pub fn keyword(word: &str) -> Option<Self> {
        match word {
            "true" => Some(Self::TrueKeyword),
            "false" => Some(Self::FalseKeyword),
            "null" => Some(Self::NullKeyword),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IntegerLiteral
                | Self::LongLiteral
                | Self::RealLiteral
                | Self::StringLiteral
                | Self::InterpolatedString
                | Self::TrueKeyword
                | Self::FalseKeyword
                | Self::NullKeyword
        )
    }

    /// Fixed source text of punctuation and operator tokens.
    #[must_use]
    pub const fn text(self) -> Option<&'static str> {
        Some(match self {
            Self::Dot => ".",
            Self::Comma => ",",
            Self::OpenBracket => "[",
            Self::CloseBracket => "]",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::Question => "?",
            Self::Equals => "=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::TrueKeyword => "true",
            Self::FalseKeyword => "false",
            Self::NullKeyword => "null",
            _ => return None,
        })
    }
}

/// One token of a directive value. `span` is relative to the value start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Source text, except for string literals where this is the unescaped
    /// content without quotes.
    pub text: String,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }

    #[must_use]
    pub const fn is(&self, kind: TokenKind) -> bool {
        self.kind as u8 == kind as u8
    }
}
