//! Recursive-descent grammar for dtype notation.
//!
//! ```text
//! dtype   := (INT ',')* base
//! base    := scalar | string | bytes | pointer | date | convert | struct | NAME
//! string  := 'string' ('(' (INT (',' ENC)? | ENC) ')')?
//! bytes   := 'bytes' ('(' INT (',' 'align' '=' INT)? ')')?
//! pointer := 'pointer' '(' dtype ')'
//! date    := 'date' ('(' UNIT ')')?
//! convert := 'convert' '(' dtype ',' dtype (',' MODE)? ')'
//! struct  := ('struct' | 'fixedstruct')? '{' (NAME ':' dtype (';' NAME ':' dtype)* ';'?)? '}'
//! ```

use ndt_types::{
    make_bytes_dtype, make_convert_dtype, make_date_dtype, make_fixedarray_dtype,
    make_fixedbytes_dtype, make_fixedstring_dtype, make_fixedstruct_dtype, make_pointer_dtype,
    make_string_dtype, make_struct_dtype, scalar_dtype, AssignErrorMode, DateUnit, Dtype,
    DtypeError, StringEncoding, TypeId,
};
use smallvec::SmallVec;

use crate::cursor::Cursor;
use crate::lexer::{lex, TokenKind};
use crate::{NameLookup, ParseError, Result, Span};

mod subscript;

pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    names: &'a dyn NameLookup,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str, names: &'a dyn NameLookup) -> Self {
        Parser {
            cursor: Cursor::new(source, lex(source)),
            names,
        }
    }

    /// Require that all input was consumed.
    pub(crate) fn finish<T>(&mut self, value: T) -> Result<T> {
        self.cursor.expect(TokenKind::Eof, "end of input")?;
        Ok(value)
    }

    pub(crate) fn dtype(&mut self) -> Result<Dtype> {
        let start = self.cursor.span();
        let mut shape: SmallVec<[i64; 4]> = SmallVec::new();
        while let TokenKind::Int(extent) = self.cursor.kind() {
            self.cursor.advance();
            self.cursor
                .expect(TokenKind::Comma, "`,` after array extent")?;
            shape.push(extent);
        }

        let base = self.base()?;
        if shape.is_empty() {
            return Ok(base);
        }
        let built = make_fixedarray_dtype(&base, &shape, None);
        self.built(built, start)
    }

    fn base(&mut self) -> Result<Dtype> {
        let start = self.cursor.span();
        if self.cursor.check(TokenKind::LBrace) {
            return self.struct_body(false, start);
        }

        let name = self.cursor.expect_ident("dtype")?;
        match name {
            "struct" => self.struct_body(false, start),
            "fixedstruct" => self.struct_body(true, start),
            "string" => self.string_args(start),
            "bytes" => self.bytes_args(start),
            "pointer" => {
                self.cursor.expect(TokenKind::LParen, "`(` after `pointer`")?;
                let target = self.dtype()?;
                self.cursor.expect(TokenKind::RParen, "`)`")?;
                Ok(make_pointer_dtype(&target))
            }
            "date" => {
                let unit = if self.cursor.eat(TokenKind::LParen) {
                    let unit = self.token_arg("date unit", DateUnit::from_token)?;
                    self.cursor.expect(TokenKind::RParen, "`)`")?;
                    unit
                } else {
                    DateUnit::default()
                };
                Ok(make_date_dtype(unit))
            }
            "convert" => {
                self.cursor.expect(TokenKind::LParen, "`(` after `convert`")?;
                let to = self.dtype()?;
                self.cursor.expect(TokenKind::Comma, "`,`")?;
                let from = self.dtype()?;
                let mode = if self.cursor.eat(TokenKind::Comma) {
                    self.token_arg("error mode", AssignErrorMode::from_token)?
                } else {
                    AssignErrorMode::default()
                };
                self.cursor.expect(TokenKind::RParen, "`)`")?;
                Ok(make_convert_dtype(&to, &from, mode))
            }
            _ => self.named(name, start),
        }
    }

    fn named(&self, name: &str, span: Span) -> Result<Dtype> {
        let id = match name {
            "cfloat32" => Some(TypeId::ComplexFloat32),
            "cfloat64" => Some(TypeId::ComplexFloat64),
            _ => TypeId::scalar_from_name(name),
        };
        id.and_then(scalar_dtype)
            .or_else(|| self.names.lookup(name))
            .ok_or_else(|| ParseError::UnknownName {
                name: name.to_string(),
                span,
            })
    }

    fn struct_body(&mut self, fixed: bool, start: Span) -> Result<Dtype> {
        self.cursor.expect(TokenKind::LBrace, "`{`")?;
        let mut types = Vec::new();
        let mut names = Vec::new();
        while !self.cursor.eat(TokenKind::RBrace) {
            names.push(self.cursor.expect_ident("field name")?);
            self.cursor
                .expect(TokenKind::Colon, "`:` after field name")?;
            types.push(self.dtype()?);
            if !self.cursor.eat(TokenKind::Semicolon) {
                self.cursor.expect(TokenKind::RBrace, "`;` or `}`")?;
                break;
            }
        }

        let built = if fixed {
            make_fixedstruct_dtype(&types, &names)
        } else {
            make_struct_dtype(&types, &names)
        };
        self.built(built, start)
    }

    fn string_args(&mut self, start: Span) -> Result<Dtype> {
        if !self.cursor.eat(TokenKind::LParen) {
            return self.built(make_string_dtype(StringEncoding::Utf8), start);
        }
        let built = if let TokenKind::Int(length) = self.cursor.kind() {
            self.cursor.advance();
            let encoding = if self.cursor.eat(TokenKind::Comma) {
                self.encoding()?
            } else {
                StringEncoding::Utf8
            };
            make_fixedstring_dtype(encoding, length)
        } else {
            make_string_dtype(self.encoding()?)
        };
        self.cursor.expect(TokenKind::RParen, "`)`")?;
        self.built(built, start)
    }

    fn bytes_args(&mut self, start: Span) -> Result<Dtype> {
        if !self.cursor.eat(TokenKind::LParen) {
            return Ok(make_bytes_dtype());
        }
        let size = self.expect_int("byte count")?;
        let alignment = if self.cursor.eat(TokenKind::Comma) {
            if !self.cursor.check_keyword("align") {
                return Err(self.cursor.unexpected("`align`"));
            }
            self.cursor.advance();
            self.cursor.expect(TokenKind::Eq, "`=` after `align`")?;
            self.expect_int("alignment")?
        } else {
            1
        };
        self.cursor.expect(TokenKind::RParen, "`)`")?;
        self.built(make_fixedbytes_dtype(size, alignment), start)
    }

    /// Parse an encoding, accepting the short aliases `A`, `U8`, `U16`, `U32`.
    fn encoding(&mut self) -> Result<StringEncoding> {
        self.token_arg("string encoding", |token| match token {
            "A" => Ok(StringEncoding::Ascii),
            "U8" => Ok(StringEncoding::Utf8),
            "U16" => Ok(StringEncoding::Utf16),
            "U32" => Ok(StringEncoding::Utf32),
            _ => StringEncoding::from_token(token),
        })
    }

    /// Parse a quoted or bare token argument with `parse`.
    fn token_arg<T>(
        &mut self,
        expected: &'static str,
        parse: impl FnOnce(&str) -> std::result::Result<T, DtypeError>,
    ) -> Result<T> {
        let text = match self.cursor.kind() {
            TokenKind::Str => {
                let quoted = self.cursor.text();
                quoted.get(1..quoted.len().saturating_sub(1)).unwrap_or("")
            }
            TokenKind::Ident => self.cursor.text(),
            _ => return Err(self.cursor.unexpected(expected)),
        };
        let span = self.cursor.advance().span;
        parse(text).map_err(|source| ParseError::Dtype { source, span })
    }

    pub(crate) fn expect_int(&mut self, expected: &'static str) -> Result<i64> {
        match self.cursor.kind() {
            TokenKind::Int(value) => {
                self.cursor.advance();
                Ok(value)
            }
            _ => Err(self.cursor.unexpected(expected)),
        }
    }

    /// Attach the span from `start` to the last consumed token to a builder error.
    fn built(&self, result: ndt_types::Result<Dtype>, start: Span) -> Result<Dtype> {
        result.map_err(|source| ParseError::Dtype {
            source,
            span: start.merge(self.cursor.previous_span()),
        })
    }
}
