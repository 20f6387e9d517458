//! Textual notation for ndt dtypes and subscripts.
//!
//! `parse_dtype("3, 4, {x: int32; y: string('ascii')}")` builds the same
//! dtype as the corresponding `make_*_dtype` calls, and `Dtype`'s `Display`
//! prints text this crate reads back. `parse_subscript("2, ::-1")` reads an
//! index expression for [`ndt_types::Dtype::at`].

mod cursor;
mod error;
mod grammar;
mod lexer;
mod span;

use std::collections::HashMap;
use std::hash::BuildHasher;

use ndt_types::{Dtype, IndexSpec};
use rustc_hash::FxHashMap;

pub use error::{ParseError, Result};
pub use span::Span;

use grammar::Parser;

/// Resolves dtype names that are not built in.
pub trait NameLookup {
    fn lookup(&self, name: &str) -> Option<Dtype>;
}

impl<S: BuildHasher> NameLookup for HashMap<String, Dtype, S> {
    fn lookup(&self, name: &str) -> Option<Dtype> {
        self.get(name).cloned()
    }
}

/// Parse dtype notation using only built-in names.
pub fn parse_dtype(source: &str) -> Result<Dtype> {
    let names: FxHashMap<String, Dtype> = FxHashMap::default();
    parse_dtype_with(source, &names)
}

/// Parse dtype notation, resolving unknown names through `names`.
#[tracing::instrument(level = "trace", skip(names))]
pub fn parse_dtype_with(source: &str, names: &dyn NameLookup) -> Result<Dtype> {
    let mut parser = Parser::new(source, names);
    let dtype = parser.dtype()?;
    parser.finish(dtype)
}

/// Parse a comma-separated index expression.
#[tracing::instrument(level = "trace")]
pub fn parse_subscript(source: &str) -> Result<Vec<IndexSpec>> {
    let names: FxHashMap<String, Dtype> = FxHashMap::default();
    let mut parser = Parser::new(source, &names);
    let specs = parser.subscript()?;
    parser.finish(specs)
}
