use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn array_notation() {
    assert_eq!(
        kinds("3, 4, int32"),
        [
            TokenKind::Int(3),
            TokenKind::Comma,
            TokenKind::Int(4),
            TokenKind::Comma,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn struct_notation() {
    assert_eq!(
        kinds("{x: int32; name: string('utf_16')}"),
        [
            TokenKind::LBrace,
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::Ident,
            TokenKind::Semicolon,
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::Ident,
            TokenKind::LParen,
            TokenKind::Str,
            TokenKind::RParen,
            TokenKind::RBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn subscript_with_negative_step() {
    assert_eq!(
        kinds("2, ::-1, ..."),
        [
            TokenKind::Int(2),
            TokenKind::Comma,
            TokenKind::Colon,
            TokenKind::Colon,
            TokenKind::Int(-1),
            TokenKind::Comma,
            TokenKind::Ellipsis,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn spans_are_byte_offsets() {
    let tokens = lex("  int8 ");
    assert_eq!(tokens[0].span, Span::new(2, 6));
    assert_eq!(tokens[1].span, Span::new(7, 7));
}

#[test]
fn both_quote_styles() {
    assert_eq!(kinds(r#"'ascii' "ucs_2""#), [TokenKind::Str, TokenKind::Str, TokenKind::Eof]);
}

#[test]
fn unknown_characters_are_error_tokens() {
    assert_eq!(kinds("int32 #"), [TokenKind::Ident, TokenKind::Error, TokenKind::Eof]);
    assert_eq!(kinds("99999999999999999999"), [TokenKind::Error, TokenKind::Eof]);
}

#[test]
fn empty_source_is_just_eof() {
    assert_eq!(kinds(""), [TokenKind::Eof]);
}
