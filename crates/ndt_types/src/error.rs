//! Dtype construction and indexing errors.
//!
//! Every variant embeds the offending input verbatim so that a message can be
//! traced back to the call that produced it.

/// Error raised by a dtype builder, the kind taxonomy or the indexing engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DtypeError {
    /// A dtype reported a kind code outside the closed taxonomy.
    #[error("dtype `{dtype}` has unexpected kind value {code}")]
    UnexpectedKind { dtype: String, code: u8 },

    /// Unrecognized string encoding token.
    #[error("invalid input \"{token}\" for string encoding")]
    InvalidEncoding { token: String },

    /// Unrecognized date unit token.
    #[error("invalid input \"{token}\" for date unit, expected \"day\", \"month\" or \"year\"")]
    InvalidUnit { token: String },

    /// Unrecognized assignment error mode token.
    #[error(
        "invalid input \"{token}\" for error mode, expected \"none\", \"overflow\", \
         \"fractional\", \"inexact\" or \"default\""
    )]
    InvalidErrorMode { token: String },

    /// Two argument sequences that must line up have different lengths.
    #[error("{what} has {found} entries, expected {expected}")]
    ArityMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A struct field name appears more than once.
    #[error("duplicate struct field name \"{name}\"")]
    DuplicateFieldName { name: String },

    /// A struct field name is empty.
    #[error("struct field {index} has an empty name")]
    InvalidFieldName { index: usize },

    /// An axis permutation is not a permutation of `0..len`.
    #[error("provided axis permutation {perm:?} is not a valid permutation")]
    InvalidPermutation { perm: Vec<i64> },

    /// A size or extent is negative.
    #[error("invalid {what} {value}, must be non-negative")]
    InvalidSize { what: &'static str, value: i64 },

    /// An alignment is not a power of two, or does not divide the size.
    #[error("invalid alignment {alignment} for a dtype of size {size}")]
    InvalidAlignment { alignment: i64, size: i64 },

    /// A layout's byte size does not fit in the address space.
    #[error("{what} {value} makes the dtype size overflow")]
    SizeOverflow { what: &'static str, value: String },

    /// A layout that needs fixed-size children got a variable-layout one.
    #[error("{context} requires a fixed-size dtype, got `{dtype}`")]
    NotFixedSize { dtype: String, context: String },

    /// More index specifications than the dtype has dimensions.
    #[error("too many indices for dtype `{dtype}`: {provided} provided, at most {rank} allowed")]
    TooManyIndices {
        dtype: String,
        provided: usize,
        rank: usize,
    },

    /// A scalar index falls outside `[-extent, extent)`.
    #[error("index {index} is out of bounds for axis {axis} with extent {extent}")]
    IndexOutOfRange {
        index: i64,
        axis: usize,
        extent: usize,
    },

    /// A range with a zero step.
    #[error("range step cannot be zero (axis {axis})")]
    InvalidStep { axis: usize },
}

/// Coarse classification of a [`DtypeError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The dtype system is inconsistent. Not recoverable.
    Internal,
    /// An enumerated token (encoding, unit, error mode) was not recognized.
    InvalidToken,
    /// Composite builder arguments are malformed.
    MalformedArguments,
    /// An indexing request does not fit the dtype.
    BadIndex,
}

impl DtypeError {
    /// Classify this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::UnexpectedKind { .. } => ErrorClass::Internal,
            Self::InvalidEncoding { .. }
            | Self::InvalidUnit { .. }
            | Self::InvalidErrorMode { .. } => ErrorClass::InvalidToken,
            Self::ArityMismatch { .. }
            | Self::DuplicateFieldName { .. }
            | Self::InvalidFieldName { .. }
            | Self::InvalidPermutation { .. }
            | Self::InvalidSize { .. }
            | Self::InvalidAlignment { .. }
            | Self::SizeOverflow { .. }
            | Self::NotFixedSize { .. } => ErrorClass::MalformedArguments,
            Self::TooManyIndices { .. }
            | Self::IndexOutOfRange { .. }
            | Self::InvalidStep { .. } => ErrorClass::BadIndex,
        }
    }

    /// Whether the caller can fix the input and try again.
    pub fn is_recoverable(&self) -> bool {
        self.class() != ErrorClass::Internal
    }
}

/// Result alias used throughout `ndt_types`.
pub type Result<T, E = DtypeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests;
