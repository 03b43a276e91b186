use crate::token::TokenKind;
use crate::tokenizer::BindingTokenizer;
use dvc_common::{Span, diagnostic_codes};

fn kinds(text: &str) -> Vec<TokenKind> {
    BindingTokenizer::tokenize(text)
        .tokens
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn property_declaration_tokens() {
    use TokenKind::*;
    assert_eq!(
        kinds("List<int> Items = [1, 2], MarkupOptions.Required = true"),
        [
            Identifier, LessThan, Identifier, GreaterThan, Identifier, Equals, OpenBracket,
            IntegerLiteral, Comma, IntegerLiteral, CloseBracket, Comma, Identifier, Dot,
            Identifier, Equals, TrueKeyword, EndOfText
        ]
    );
}

#[test]
fn numeric_literal_kinds() {
    use TokenKind::*;
    assert_eq!(
        kinds("1 2L 3.5 4d 1e3 7l"),
        [IntegerLiteral, LongLiteral, RealLiteral, RealLiteral, RealLiteral, LongLiteral, EndOfText]
    );
}

#[test]
fn member_access_on_number_is_not_real_literal() {
    use TokenKind::*;
    assert_eq!(kinds("1.Foo"), [IntegerLiteral, Dot, Identifier, EndOfText]);
}

#[test]
fn string_literals_are_unescaped() {
    let result = BindingTokenizer::tokenize(r#""a\"b" 'c\n' ''"#);
    assert!(result.diagnostics.is_empty());
    let texts: Vec<_> = result.tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, ["a\"b", "c\n", "", ""]);
    assert_eq!(result.tokens[0].span, Span::new(0, 6));
}

#[test]
fn unterminated_string_is_reported() {
    let result = BindingTokenizer::tokenize("'abc");
    assert_eq!(result.tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(result.tokens[0].text, "abc");
    assert_eq!(
        result.diagnostics[0].code,
        diagnostic_codes::UNTERMINATED_STRING_LITERAL
    );
}

#[test]
fn invalid_escape_is_reported_and_kept() {
    let result = BindingTokenizer::tokenize(r"'\q'");
    assert_eq!(result.tokens[0].text, "q");
    assert_eq!(result.diagnostics[0].message_text, r"Invalid escape sequence '\q'.");
}

#[test]
fn interpolated_string_is_one_token_with_nested_quotes() {
    let result = BindingTokenizer::tokenize(r#"$"a{"}" + 'x'}b" + 1"#);
    assert!(result.diagnostics.is_empty());
    let first = &result.tokens[0];
    assert_eq!(first.kind, TokenKind::InterpolatedString);
    assert_eq!(first.text, r#"a{"}" + 'x'}b"#);
    assert_eq!(result.tokens[1].kind, TokenKind::Plus);
}

#[test]
fn invalid_character_becomes_unknown_token() {
    let result = BindingTokenizer::tokenize("a # b");
    let kinds: Vec<_> = result.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [TokenKind::Identifier, TokenKind::Unknown, TokenKind::Identifier, TokenKind::EndOfText]
    );
    assert_eq!(result.diagnostics[0].message_text, "Invalid character '#'.");
    assert_eq!(result.diagnostics[0].span, Span::new(2, 3));
}

#[test]
fn malformed_number_is_reported() {
    let result = BindingTokenizer::tokenize("12abc");
    assert_eq!(result.tokens.len(), 2);
    assert_eq!(
        result.diagnostics[0].message_text,
        "Invalid numeric literal '12abc'."
    );
}

#[test]
fn end_of_text_is_positioned_at_value_end() {
    let result = BindingTokenizer::tokenize("int  ");
    let last = result.tokens.last().unwrap();
    assert_eq!(last.kind, TokenKind::EndOfText);
    assert_eq!(last.span, Span::at(5));
}
