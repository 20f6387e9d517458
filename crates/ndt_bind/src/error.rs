//! Binding layer errors.

use ndt_parse::ParseError;
use ndt_types::DtypeError;

/// A host value does not have the shape an argument requires.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, got {found}")]
pub struct MarshalError {
    pub expected: &'static str,
    pub found: String,
}

impl MarshalError {
    pub(crate) fn new(expected: &'static str, found: impl Into<String>) -> Self {
        MarshalError {
            expected,
            found: found.into(),
        }
    }
}

/// Error raised by a binding entry point.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error(transparent)]
    Dtype(#[from] DtypeError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Marshal(#[from] MarshalError),

    /// No recognizer matched a value.
    #[error("could not deduce a dtype from {value} of type {type_name}")]
    Deduction {
        value: String,
        type_name: &'static str,
    },

    /// A value or type has no dtype mapping.
    #[error("could not convert {value} into a dtype")]
    Conversion { value: String },
}

impl BindError {
    /// Whether the caller can fix the input and try again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            BindError::Dtype(err) => err.is_recoverable(),
            BindError::Parse(err) => err.dtype_error().map_or(true, DtypeError::is_recoverable),
            _ => true,
        }
    }
}

pub type Result<T, E = BindError> = std::result::Result<T, E>;
