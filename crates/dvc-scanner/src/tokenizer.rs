//! Binding tokenizer.
//!
//! Turns a directive value into tokens. Spans are relative to the start of
//! the value. Malformed input never stops tokenization: the offending text
//! becomes an `Unknown` token (or a best-effort literal) and a diagnostic is
//! recorded.
//!
//! Interpolated strings (`$"a{b}c"`) are returned as one token whose text is
//! the raw content between the quotes; the parser splits the holes.

use dvc_common::{Diagnostic, Span, diagnostic_codes};

use crate::token::{Token, TokenKind};

/// Tokens of one directive value, always terminated by `EndOfText`.
#[derive(Clone, Debug, Default)]
pub struct TokenizeResult {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct BindingTokenizer<'a> {
    text: &'a str,
    pos: usize,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> BindingTokenizer<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Tokenize `text` in one call.
    #[must_use]
    pub fn tokenize(text: &'a str) -> TokenizeResult {
        Self::new(text).run()
    }

    #[must_use]
    pub fn run(mut self) -> TokenizeResult {
        while let Some(ch) = self.skip_whitespace() {
            let start = self.pos;
            match ch {
                c if is_identifier_start(c) => self.scan_identifier(),
                c if c.is_ascii_digit() => self.scan_number(),
                '"' | '\'' => self.scan_string(ch),
                '$' if self.peek_at(1) == Some('"') => self.scan_interpolated_string(),
                _ => match punctuation(ch) {
                    Some(kind) => {
                        self.pos += 1;
                        self.push(kind, start);
                    }
                    None => {
                        self.pos += ch.len_utf8();
                        self.error(
                            diagnostic_codes::INVALID_CHARACTER,
                            start,
                            &[&ch.to_string()],
                        );
                        self.push(TokenKind::Unknown, start);
                    }
                },
            }
        }

        let end = self.text.len() as u32;
        self.tokens
            .push(Token::new(TokenKind::EndOfText, Span::at(end), ""));
        TokenizeResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    // =========================================================================
    // Scanning helpers
    // =========================================================================

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.text[self.pos..].chars().nth(offset)
    }

    fn skip_whitespace(&mut self) -> Option<char> {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                return Some(ch);
            }
            self.pos += ch.len_utf8();
        }
        None
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let text = &self.text[start..self.pos];
        self.tokens
            .push(Token::new(kind, span(start, self.pos), text));
    }

    fn error(&mut self, code: u32, start: usize, args: &[&str]) {
        self.diagnostics
            .push(Diagnostic::from_code(code, span(start, self.pos), args));
    }

    fn scan_identifier(&mut self) {
        let start = self.pos;
        self.eat_while(is_identifier_part);
        let kind = TokenKind::keyword(&self.text[start..self.pos]).unwrap_or(TokenKind::Identifier);
        self.push(kind, start);
    }

    fn scan_number(&mut self) {
        let start = self.pos;
        let mut kind = TokenKind::IntegerLiteral;
        self.eat_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
            self.eat_while(|c| c.is_ascii_digit());
            kind = TokenKind::RealLiteral;
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some('+' | '-')));
            if self.peek_at(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1 + sign;
                self.eat_while(|c| c.is_ascii_digit());
                kind = TokenKind::RealLiteral;
            }
        }

        match self.peek() {
            Some('L' | 'l') if kind == TokenKind::IntegerLiteral => {
                self.pos += 1;
                kind = TokenKind::LongLiteral;
            }
            Some('d' | 'D') => {
                self.pos += 1;
                kind = TokenKind::RealLiteral;
            }
            _ => {}
        }

        // `12abc` is one malformed literal rather than a number and a name.
        if self.peek().is_some_and(is_identifier_part) {
            self.eat_while(is_identifier_part);
            let literal = self.text[start..self.pos].to_string();
            self.error(diagnostic_codes::INVALID_NUMERIC_LITERAL, start, &[&literal]);
        }
        self.push(kind, start);
    }

    fn scan_string(&mut self, quote: char) {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.peek() else {
                self.error(diagnostic_codes::UNTERMINATED_STRING_LITERAL, start, &[]);
                break;
            };
            self.pos += ch.len_utf8();
            if ch == quote {
                break;
            }
            if ch == '\\' {
                self.scan_escape(&mut value);
            } else {
                value.push(ch);
            }
        }
        self.tokens.push(Token::new(
            TokenKind::StringLiteral,
            span(start, self.pos),
            value,
        ));
    }

    fn scan_escape(&mut self, value: &mut String) {
        let escape_start = self.pos - 1;
        let Some(ch) = self.peek() else {
            value.push('\\');
            return;
        };
        self.pos += ch.len_utf8();
        match unescape(ch) {
            Some(unescaped) => value.push(unescaped),
            None => {
                self.error(
                    diagnostic_codes::INVALID_ESCAPE_SEQUENCE,
                    escape_start,
                    &[&ch.to_string()],
                );
                value.push(ch);
            }
        }
    }

    /// `$"..."`; quotes inside `{ }` holes belong to nested literals.
    fn scan_interpolated_string(&mut self) {
        let start = self.pos;
        self.pos += 2;
        let content_start = self.pos;
        let mut depth = 0u32;
        let mut content_end = None;

        while let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
            match ch {
                '\\' => {
                    if let Some(next) = self.peek() {
                        self.pos += next.len_utf8();
                    }
                }
                '{' if depth == 0 && self.peek() == Some('{') => self.pos += 1,
                '}' if depth == 0 && self.peek() == Some('}') => self.pos += 1,
                '{' => depth += 1,
                '}' if depth > 0 => depth -= 1,
                '"' | '\'' if depth > 0 => self.skip_nested_string(ch),
                '"' if depth == 0 => {
                    content_end = Some(self.pos - 1);
                    break;
                }
                _ => {}
            }
        }

        let content_end = content_end.unwrap_or_else(|| {
            self.error(diagnostic_codes::UNTERMINATED_STRING_LITERAL, start, &[]);
            self.pos
        });
        let content = &self.text[content_start..content_end];
        self.tokens.push(Token::new(
            TokenKind::InterpolatedString,
            span(start, self.pos),
            content,
        ));
    }

    fn skip_nested_string(&mut self, quote: char) {
        while let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
            if ch == '\\' {
                if let Some(next) = self.peek() {
                    self.pos += next.len_utf8();
                }
            } else if ch == quote {
                return;
            }
        }
    }
}

fn span(start: usize, end: usize) -> Span {
    Span::new(start as u32, end as u32)
}

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

/// Unescape the character following a backslash.
#[must_use]
pub fn unescape(ch: char) -> Option<char> {
    Some(match ch {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        '0' => '\0',
        '\\' | '"' | '\'' | '{' | '}' => ch,
        _ => return None,
    })
}

fn punctuation(ch: char) -> Option<TokenKind> {
    Some(match ch {
        '.' => TokenKind::Dot,
        ',' => TokenKind::Comma,
        '[' => TokenKind::OpenBracket,
        ']' => TokenKind::CloseBracket,
        '(' => TokenKind::OpenParen,
        ')' => TokenKind::CloseParen,
        '<' => TokenKind::LessThan,
        '>' => TokenKind::GreaterThan,
        '?' => TokenKind::Question,
        '=' => TokenKind::Equals,
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Asterisk,
        '/' => TokenKind::Slash,
        '%' => TokenKind::Percent,
        _ => return None,
    })
}
