//! Parse errors.

use ndt_types::DtypeError;

use crate::Span;

/// Error raised while reading dtype or subscript notation.
///
/// Every variant carries the span of the offending text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The next token does not fit the grammar.
    #[error("expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        span: Span,
    },

    /// A name is neither a built-in dtype nor a registered one.
    #[error("unknown dtype name \"{name}\" at {span}")]
    UnknownName { name: String, span: Span },

    /// Text the lexer could not tokenize.
    #[error("invalid input \"{text}\" at {span}")]
    InvalidToken { text: String, span: Span },

    /// The notation was well formed but a dtype builder rejected it.
    #[error("{source} at {span}")]
    Dtype { source: DtypeError, span: Span },
}

impl ParseError {
    /// Get the span of the offending text.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnknownName { span, .. }
            | ParseError::InvalidToken { span, .. }
            | ParseError::Dtype { span, .. } => *span,
        }
    }

    /// Get the builder error, if a builder rejected the input.
    pub fn dtype_error(&self) -> Option<&DtypeError> {
        match self {
            ParseError::Dtype { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T, E = ParseError> = std::result::Result<T, E>;
