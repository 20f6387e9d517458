//! Subscript grammar.
//!
//! ```text
//! subscript := spec (',' spec)*
//! spec      := INT | INT? ':' INT? (':' INT?)? | '...'
//! ```

use ndt_types::IndexSpec;

use super::Parser;
use crate::lexer::TokenKind;
use crate::Result;

impl Parser<'_> {
    pub(crate) fn subscript(&mut self) -> Result<Vec<IndexSpec>> {
        let mut specs = vec![self.spec()?];
        while self.cursor.eat(TokenKind::Comma) {
            specs.push(self.spec()?);
        }
        Ok(specs)
    }

    fn spec(&mut self) -> Result<IndexSpec> {
        if self.cursor.eat(TokenKind::Ellipsis) {
            return Ok(IndexSpec::Full);
        }

        let start = self.optional_int();
        if !self.cursor.eat(TokenKind::Colon) {
            return match start {
                Some(index) => Ok(IndexSpec::Index(index)),
                None => Err(self.cursor.unexpected("index, range or `...`")),
            };
        }

        let stop = self.optional_int();
        let step = if self.cursor.eat(TokenKind::Colon) {
            self.optional_int()
        } else {
            None
        };

        Ok(match (start, stop, step) {
            (None, None, None) => IndexSpec::Full,
            _ => IndexSpec::stepped(start, stop, step.unwrap_or(1)),
        })
    }

    fn optional_int(&mut self) -> Option<i64> {
        match self.cursor.kind() {
            TokenKind::Int(_) => self.expect_int("integer").ok(),
            _ => None,
        }
    }
}
