//! Recursive-descent parser for directive values.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! declaration := type name ('=' additive)? (',' expression)*
//! expression  := additive ('=' expression)?
//! additive    := multiplicative (('+' | '-') multiplicative)*
//! multiplicative := unary (('*' | '/' | '%') unary)*
//! unary       := ('-' | '+') unary | primary
//! primary     := literal | interpolated | name-chain | '(' expression ')'
//!              | '[' (expression (',' expression)* ','?)? ']'
//! type        := name-chain ('?' | '[' ']')*
//! name-chain  := segment ('.' segment)*
//! segment     := identifier ('<' type (',' type)* '>')?
//! ```

use dvc_common::limits::{MAX_CHAIN_LENGTH, MAX_PARSE_DEPTH};
use dvc_common::{Diagnostic, Span, diagnostic_codes};
use dvc_scanner::{BindingTokenizer, Token, TokenKind, TokenizeResult, unescape};
use serde::Serialize;
use tracing::trace;

use crate::syntax::{
    BinaryOperator, BindingNode, Identifier, InterpolationPart, LiteralValue, NodeKind,
    PropertyDeclarationSyntax, TypeReference, UnaryOperator,
};

/// Which production the directive value is parsed with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum GrammarEntryPoint {
    TypeName,
    PropertyDeclaration,
    Expression,
}

#[derive(Clone, Debug)]
pub struct ParseResult {
    pub root: BindingNode,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Parse `text` starting at `entry`.
#[must_use]
pub fn parse(text: &str, entry: GrammarEntryPoint) -> ParseResult {
    let result = BindingParser::new(BindingTokenizer::tokenize(text)).parse_entry(entry);
    trace!(
        ?entry,
        diagnostics = result.diagnostics.len(),
        "parsed directive value"
    );
    result
}

pub struct BindingParser {
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
    depth: u32,
    /// Chain links on the current syntax path, see `extend_chain`.
    chain: u32,
    /// Set once the nesting limit is hit; the rest of the input is skipped
    /// and no further diagnostics are reported.
    aborted: bool,
}

impl BindingParser {
    #[must_use]
    pub fn new(tokenized: TokenizeResult) -> Self {
        let mut tokens = tokenized.tokens;
        if tokens.last().is_none_or(|t| t.kind != TokenKind::EndOfText) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::new(TokenKind::EndOfText, Span::at(end), ""));
        }
        Self {
            tokens,
            pos: 0,
            diagnostics: tokenized.diagnostics,
            depth: 0,
            chain: 0,
            aborted: false,
        }
    }

    #[must_use]
    pub fn parse_entry(mut self, entry: GrammarEntryPoint) -> ParseResult {
        let root = match entry {
            GrammarEntryPoint::TypeName => self.parse_type_name_value(),
            GrammarEntryPoint::PropertyDeclaration => self.parse_property_declaration(),
            GrammarEntryPoint::Expression => self.parse_expression(),
        };
        self.report_trailing_tokens();
        ParseResult {
            root,
            diagnostics: self.diagnostics,
        }
    }

    // =========================================================================
    // Token access
    // =========================================================================

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn kind(&self) -> TokenKind {
        self.current().kind
    }

    fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map_or(TokenKind::EndOfText, |t| t.kind)
    }

    fn is(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    fn current_start(&self) -> u32 {
        self.current().span.start
    }

    /// End of the last consumed token.
    fn prev_end(&self) -> u32 {
        match self.pos {
            0 => self.current_start(),
            pos => self.tokens[pos - 1].span.end,
        }
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::EndOfText {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.is(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        let text = kind.text().unwrap_or("token");
        let span = Span::at(self.current_start());
        self.error(diagnostic_codes::TOKEN_EXPECTED, span, &[text]);
        false
    }

    fn error(&mut self, code: u32, span: Span, args: &[&str]) {
        if self.aborted || self.diagnostics.iter().any(|d| d.span == span && d.code == code) {
            return;
        }
        self.diagnostics.push(Diagnostic::from_code(code, span, args));
    }

    fn report_unexpected(&mut self) {
        let token = self.current().clone();
        let text = token_display(&token);
        self.error(diagnostic_codes::UNEXPECTED_TOKEN, token.span, &[&text]);
    }

    fn skip_until(&mut self, kind: TokenKind) {
        while !self.is(kind) && !self.is(TokenKind::EndOfText) {
            self.advance();
        }
    }

    fn report_trailing_tokens(&mut self) {
        if !self.is(TokenKind::EndOfText) {
            self.report_unexpected();
            self.pos = self.tokens.len() - 1;
        }
    }

    fn enter(&mut self) -> bool {
        if self.aborted {
            return false;
        }
        if self.depth >= MAX_PARSE_DEPTH {
            self.abort_too_deep();
            return false;
        }
        self.depth += 1;
        true
    }

    /// Count one more link of an operator, member-access or type-suffix
    /// chain. Callers reset `chain` once their chain is complete.
    fn extend_chain(&mut self) -> bool {
        if self.aborted {
            return false;
        }
        if self.chain >= MAX_CHAIN_LENGTH {
            self.abort_too_deep();
            return false;
        }
        self.chain += 1;
        true
    }

    fn abort_too_deep(&mut self) {
        let span = self.current().span;
        self.error(diagnostic_codes::NESTING_TOO_DEEP, span, &[]);
        self.aborted = true;
        self.pos = self.tokens.len() - 1;
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    fn parse_type_name_value(&mut self) -> BindingNode {
        if self.is(TokenKind::EndOfText) {
            let span = Span::at(self.current_start());
            self.error(diagnostic_codes::TYPE_EXPECTED, span, &[]);
            return BindingNode::missing(span.start);
        }
        self.parse_type_reference().into_node()
    }

    /// Anything not starting with an identifier is not a declaration; it is
    /// parsed as an expression so callers still get a tree.
    fn parse_property_declaration(&mut self) -> BindingNode {
        if self.is(TokenKind::EndOfText) {
            return BindingNode::missing(self.current_start());
        }
        if !self.is(TokenKind::Identifier) {
            return self.parse_expression();
        }

        let start = self.current_start();
        let property_type = self.parse_type_reference().into_node();

        // A missing name is left to the directive compiler to report.
        let name = if self.is(TokenKind::Identifier) {
            self.parse_name_chain()
        } else {
            BindingNode::missing(self.current_start())
        };

        let initializer = if self.eat(TokenKind::Equals) {
            Some(self.parse_additive())
        } else {
            None
        };
        self.recover_to_attribute_list();

        let mut attributes = Vec::new();
        while self.eat(TokenKind::Comma) {
            attributes.push(self.parse_expression());
            self.recover_to_attribute_list();
        }

        let declaration = PropertyDeclarationSyntax {
            property_type,
            name,
            initializer,
            attributes,
        };
        BindingNode::new(
            NodeKind::PropertyDeclaration(Box::new(declaration)),
            Span::new(start, self.prev_end().max(start)),
        )
    }

    fn recover_to_attribute_list(&mut self) {
        if !self.is(TokenKind::Comma) && !self.is(TokenKind::EndOfText) {
            self.report_unexpected();
            self.skip_until(TokenKind::Comma);
        }
    }

    // =========================================================================
    // Types and names
    // =========================================================================

    fn parse_type_reference(&mut self) -> TypeReference {
        let start = self.current_start();
        let name = if self.is(TokenKind::Identifier) {
            self.parse_name_chain()
        } else {
            let span = Span::at(start);
            self.error(diagnostic_codes::TYPE_EXPECTED, span, &[]);
            BindingNode::missing(start)
        };

        let chain = self.chain;
        let mut reference = TypeReference::actual(name);
        loop {
            let array = self.is(TokenKind::OpenBracket) && self.peek_kind(1) == TokenKind::CloseBracket;
            if !(array || self.is(TokenKind::Question)) || !self.extend_chain() {
                break;
            }
            if array {
                self.advance();
                let end = self.advance().span.end;
                reference = TypeReference::array_of(reference, Span::new(start, end));
            } else {
                let end = self.advance().span.end;
                reference = TypeReference::nullable_of(reference, Span::new(start, end));
            }
        }
        self.chain = chain;
        reference
    }

    /// `A.B<C>.D`; the current token must be an identifier.
    fn parse_name_chain(&mut self) -> BindingNode {
        let chain = self.chain;
        let mut node = self.parse_name_segment();
        while self.is(TokenKind::Dot) && self.extend_chain() {
            self.advance();
            let member = if self.is(TokenKind::Identifier) {
                self.parse_name_segment()
            } else {
                let span = Span::at(self.current_start());
                self.error(diagnostic_codes::IDENTIFIER_EXPECTED, span, &[]);
                BindingNode::name(Identifier::missing(self.prev_end()))
            };
            let span = node.span.merge(member.span);
            let stop = member.as_simple_name().is_some_and(Identifier::is_missing);
            node = BindingNode::new(
                NodeKind::MemberAccess {
                    target: Box::new(node),
                    member: Box::new(member),
                },
                span,
            );
            if stop {
                break;
            }
        }
        self.chain = chain;
        node
    }

    fn parse_name_segment(&mut self) -> BindingNode {
        let token = self.advance();
        let name = Identifier::new(token.text, token.span);
        if !self.is(TokenKind::LessThan) || !self.enter() {
            return BindingNode::name(name);
        }

        self.advance();
        let mut type_arguments = vec![self.parse_type_reference()];
        while self.eat(TokenKind::Comma) {
            type_arguments.push(self.parse_type_reference());
        }
        self.expect(TokenKind::GreaterThan);
        self.leave();

        let span = Span::new(name.span.start, self.prev_end());
        BindingNode::new(
            NodeKind::GenericName {
                name,
                type_arguments,
            },
            span,
        )
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn parse_expression(&mut self) -> BindingNode {
        let left = self.parse_additive();
        if !self.is(TokenKind::Equals) {
            return left;
        }
        self.advance();
        if !self.enter() {
            return left;
        }
        let right = self.parse_expression();
        self.leave();
        binary(BinaryOperator::Assign, left, right)
    }

    fn parse_additive(&mut self) -> BindingNode {
        let chain = self.chain;
        let mut left = self.parse_multiplicative();
        loop {
            let operator = match self.kind() {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Subtract,
                _ => break,
            };
            self.advance();
            let right = if self.extend_chain() {
                self.parse_multiplicative()
            } else {
                BindingNode::missing(self.current_start())
            };
            left = binary(operator, left, right);
        }
        self.chain = chain;
        left
    }

    fn parse_multiplicative(&mut self) -> BindingNode {
        let chain = self.chain;
        let mut left = self.parse_unary();
        loop {
            let operator = match self.kind() {
                TokenKind::Asterisk => BinaryOperator::Multiply,
                TokenKind::Slash => BinaryOperator::Divide,
                TokenKind::Percent => BinaryOperator::Modulo,
                _ => break,
            };
            self.advance();
            let right = if self.extend_chain() {
                self.parse_unary()
            } else {
                BindingNode::missing(self.current_start())
            };
            left = binary(operator, left, right);
        }
        self.chain = chain;
        left
    }

    fn parse_unary(&mut self) -> BindingNode {
        let operator = match self.kind() {
            TokenKind::Minus => UnaryOperator::Negate,
            TokenKind::Plus => UnaryOperator::Plus,
            _ => return self.parse_primary(),
        };
        let start = self.advance().span.start;
        if !self.enter() {
            return BindingNode::missing(start);
        }
        let operand = self.parse_unary();
        self.leave();
        let span = Span::new(start, operand.span.end.max(start));
        BindingNode::new(
            NodeKind::Unary {
                operator,
                operand: Box::new(operand),
            },
            span,
        )
    }

    fn parse_primary(&mut self) -> BindingNode {
        match self.kind() {
            TokenKind::IntegerLiteral
            | TokenKind::LongLiteral
            | TokenKind::RealLiteral
            | TokenKind::StringLiteral
            | TokenKind::TrueKeyword
            | TokenKind::FalseKeyword
            | TokenKind::NullKeyword => {
                let token = self.advance();
                let value = self.literal_value(&token);
                BindingNode::new(NodeKind::Literal(value), token.span)
            }
            TokenKind::InterpolatedString => {
                let token = self.advance();
                self.parse_interpolated_string(&token)
            }
            TokenKind::Identifier => self.parse_name_chain(),
            TokenKind::OpenParen => self.parse_parenthesized(),
            TokenKind::OpenBracket => self.parse_array_initializer(),
            _ => {
                let start = self.current_start();
                self.error(diagnostic_codes::EXPRESSION_EXPECTED, Span::at(start), &[]);
                BindingNode::missing(start)
            }
        }
    }

    fn parse_parenthesized(&mut self) -> BindingNode {
        let start = self.advance().span.start;
        if !self.enter() {
            return BindingNode::missing(start);
        }
        let inner = self.parse_expression();
        self.expect(TokenKind::CloseParen);
        self.leave();
        BindingNode::new(
            NodeKind::Parenthesized(Box::new(inner)),
            Span::new(start, self.prev_end()),
        )
    }

    fn parse_array_initializer(&mut self) -> BindingNode {
        let start = self.advance().span.start;
        if !self.enter() {
            return BindingNode::missing(start);
        }
        let mut elements = Vec::new();
        while !self.is(TokenKind::CloseBracket) && !self.is(TokenKind::EndOfText) {
            elements.push(self.parse_expression());
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::CloseBracket);
        self.leave();
        BindingNode::new(
            NodeKind::ArrayInitializer(elements),
            Span::new(start, self.prev_end()),
        )
    }

    fn literal_value(&mut self, token: &Token) -> LiteralValue {
        let text = token.text.as_str();
        let parsed = match token.kind {
            TokenKind::TrueKeyword => Some(LiteralValue::Bool(true)),
            TokenKind::FalseKeyword => Some(LiteralValue::Bool(false)),
            TokenKind::NullKeyword => Some(LiteralValue::Null),
            TokenKind::StringLiteral => Some(LiteralValue::String(token.text.clone())),
            TokenKind::LongLiteral => text
                .trim_end_matches(['L', 'l'])
                .parse()
                .ok()
                .map(LiteralValue::Long),
            TokenKind::RealLiteral => text
                .trim_end_matches(['d', 'D'])
                .parse()
                .ok()
                .map(LiteralValue::Double),
            _ => text
                .parse::<i32>()
                .map(LiteralValue::Int)
                .or_else(|_| text.parse::<i64>().map(LiteralValue::Long))
                .ok(),
        };
        parsed.unwrap_or_else(|| {
            self.error(diagnostic_codes::INVALID_NUMERIC_LITERAL, token.span, &[text]);
            LiteralValue::Int(0)
        })
    }

    // =========================================================================
    // Interpolated strings
    // =========================================================================

    fn parse_interpolated_string(&mut self, token: &Token) -> BindingNode {
        let content = token.text.as_str();
        // Content starts after `$"`.
        let base = token.span.start + 2;
        let mut parts = Vec::new();
        let mut text = String::new();
        let mut chars = content.char_indices().peekable();

        while let Some((offset, ch)) = chars.next() {
            match ch {
                '{' | '}' if chars.peek().is_some_and(|&(_, next)| next == ch) => {
                    chars.next();
                    text.push(ch);
                }
                '{' => {
                    let Some(close) = find_hole_end(content, offset) else {
                        let span = Span::new(base + offset as u32, base + content.len() as u32);
                        self.error(diagnostic_codes::UNTERMINATED_INTERPOLATION, span, &[]);
                        if !text.is_empty() {
                            parts.push(InterpolationPart::Text(std::mem::take(&mut text)));
                        }
                        let hole = BindingNode::missing(base + offset as u32 + 1);
                        parts.push(InterpolationPart::Expression(hole));
                        break;
                    };
                    if !text.is_empty() {
                        parts.push(InterpolationPart::Text(std::mem::take(&mut text)));
                    }
                    let hole = &content[offset + 1..close];
                    let expression = self.parse_hole(hole, base + offset as u32 + 1);
                    parts.push(InterpolationPart::Expression(expression));
                    while chars.next_if(|&(i, _)| i <= close).is_some() {}
                }
                '\\' => match chars.next() {
                    Some((_, escaped)) => match unescape(escaped) {
                        Some(unescaped) => text.push(unescaped),
                        None => {
                            let start = base + offset as u32;
                            let span = Span::new(start, start + 1 + escaped.len_utf8() as u32);
                            self.error(
                                diagnostic_codes::INVALID_ESCAPE_SEQUENCE,
                                span,
                                &[&escaped.to_string()],
                            );
                            text.push(escaped);
                        }
                    },
                    None => text.push('\\'),
                },
                _ => text.push(ch),
            }
        }
        if !text.is_empty() {
            parts.push(InterpolationPart::Text(text));
        }

        BindingNode::new(NodeKind::InterpolatedString(parts), token.span)
    }

    /// Parse the expression inside `{ }`; `offset` is where `hole` starts
    /// within the directive value.
    fn parse_hole(&mut self, hole: &str, offset: u32) -> BindingNode {
        if !self.enter() {
            return BindingNode::missing(offset);
        }
        let mut tokenized = BindingTokenizer::tokenize(hole);
        for token in &mut tokenized.tokens {
            token.span = token.span.shift(offset);
        }
        for diagnostic in &mut tokenized.diagnostics {
            diagnostic.span = diagnostic.span.shift(offset);
        }

        let mut nested = Self::new(tokenized);
        nested.depth = self.depth;
        nested.chain = self.chain;
        let expression = nested.parse_expression();
        nested.report_trailing_tokens();

        self.aborted |= nested.aborted;
        for diagnostic in nested.diagnostics {
            if !self.aborted || diagnostic.code == diagnostic_codes::NESTING_TOO_DEEP {
                self.diagnostics.push(diagnostic);
            }
        }
        self.leave();
        expression
    }
}

fn binary(operator: BinaryOperator, left: BindingNode, right: BindingNode) -> BindingNode {
    let span = left.span.merge(right.span);
    BindingNode::new(
        NodeKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

/// Byte index of the `}` closing the hole opened at `open`, skipping nested
/// braces and quoted strings.
fn find_hole_end(content: &str, open: usize) -> Option<usize> {
    let mut depth = 0u32;
    let mut quote = None;
    let mut escaped = false;
    for (i, ch) in content[open + 1..].char_indices() {
        let i = i + open + 1;
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '{' => depth += 1,
            '}' if depth == 0 => return Some(i),
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn token_display(token: &Token) -> String {
    match token.kind {
        TokenKind::StringLiteral => format!("{:?}", token.text),
        TokenKind::InterpolatedString => format!("$\"{}\"", token.text),
        _ => token.text.clone(),
    }
}
