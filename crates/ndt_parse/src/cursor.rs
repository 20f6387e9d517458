//! Token cursor.

use crate::lexer::{Token, TokenKind};
use crate::{ParseError, Result, Span};

/// Position in a token list plus the source the tokens were lexed from.
///
/// The last token is always `Eof`, so `current()` is valid at every
/// position the parser can reach.
pub(crate) struct Cursor<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Cursor {
            source,
            tokens,
            pos: 0,
        }
    }

    #[inline]
    pub(crate) fn current(&self) -> Token {
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    #[inline]
    pub(crate) fn kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub(crate) fn span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token.
    pub(crate) fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|p| self.tokens.get(p))
            .map_or_else(Span::default, |t| t.span)
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Check for an identifier with the given text.
    pub(crate) fn check_keyword(&self, keyword: &str) -> bool {
        self.check(TokenKind::Ident) && self.text() == keyword
    }

    /// Source text of the current token.
    pub(crate) fn text(&self) -> &'a str {
        self.source.get(self.span().range()).unwrap_or("")
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail.
    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Consume an identifier and return its text.
    pub(crate) fn expect_ident(&mut self, expected: &'static str) -> Result<&'a str> {
        if self.check(TokenKind::Ident) {
            let text = self.text();
            self.advance();
            Ok(text)
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Error for the current token.
    pub(crate) fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = self.current();
        match token.kind {
            TokenKind::Error => ParseError::InvalidToken {
                text: self.text().to_string(),
                span: token.span,
            },
            TokenKind::Ident | TokenKind::Int(_) | TokenKind::Str => {
                ParseError::UnexpectedToken {
                    expected,
                    found: format!("{} `{}`", token.kind.describe(), self.text()),
                    span: token.span,
                }
            }
            _ => ParseError::UnexpectedToken {
                expected,
                found: token.kind.describe().to_string(),
                span: token.span,
            },
        }
    }
}
