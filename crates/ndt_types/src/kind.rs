//! Kind taxonomy.
//!
//! A `Kind` is the coarse classification of a dtype. The set is closed: any
//! raw code outside it means the dtype system was extended without updating
//! this mapping, and is reported as [`DtypeError::UnexpectedKind`].

use std::fmt;

use crate::{Dtype, DtypeError};

/// Coarse dtype classification (u8 discriminant).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Kind {
    /// Boolean.
    Bool = 0,
    /// Signed integer.
    Int = 1,
    /// Unsigned integer.
    Uint = 2,
    /// Real floating point.
    Real = 3,
    /// Complex floating point.
    Complex = 4,
    /// Text with an encoding.
    String = 5,
    /// Date and time.
    Datetime = 6,
    /// Raw bytes.
    Bytes = 7,
    /// No data.
    Void = 8,
    /// Named fields.
    Struct = 9,
    /// Fixed-shape array dimensions over an element.
    UniformArray = 10,
    /// A dtype computed from another one (pointer, conversion).
    Expression = 11,
    /// A dtype pattern to be matched.
    Pattern = 12,
    /// Registry-declared opaque dtype.
    Custom = 13,
}

impl Kind {
    /// All kinds, in code order.
    pub const ALL: [Kind; 14] = [
        Kind::Bool,
        Kind::Int,
        Kind::Uint,
        Kind::Real,
        Kind::Complex,
        Kind::String,
        Kind::Datetime,
        Kind::Bytes,
        Kind::Void,
        Kind::Struct,
        Kind::UniformArray,
        Kind::Expression,
        Kind::Pattern,
        Kind::Custom,
    ];

    /// Decode a raw kind code.
    ///
    /// Returns `None` for codes outside the taxonomy. Use [`Dtype::kind`] to
    /// get an error naming the dtype that carried the code.
    #[inline]
    pub const fn from_raw(code: u8) -> Option<Kind> {
        match code {
            0 => Some(Kind::Bool),
            1 => Some(Kind::Int),
            2 => Some(Kind::Uint),
            3 => Some(Kind::Real),
            4 => Some(Kind::Complex),
            5 => Some(Kind::String),
            6 => Some(Kind::Datetime),
            7 => Some(Kind::Bytes),
            8 => Some(Kind::Void),
            9 => Some(Kind::Struct),
            10 => Some(Kind::UniformArray),
            11 => Some(Kind::Expression),
            12 => Some(Kind::Pattern),
            13 => Some(Kind::Custom),
            _ => None,
        }
    }

    /// Get the raw code.
    #[inline]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Get the kind's text form.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Real => "real",
            Self::Complex => "complex",
            Self::String => "string",
            Self::Datetime => "datetime",
            Self::Bytes => "bytes",
            Self::Void => "void",
            Self::Struct => "struct",
            Self::UniformArray => "uniform_array",
            Self::Expression => "expression",
            Self::Pattern => "pattern",
            Self::Custom => "custom",
        }
    }

    /// Whether values of this kind are numbers.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Bool | Self::Int | Self::Uint | Self::Real | Self::Complex
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Dtype {
    /// Get the kind of this dtype.
    ///
    /// Built-in type ids map statically. Custom dtypes carry a declared raw
    /// code, which is checked against the taxonomy here.
    pub fn kind(&self) -> Result<Kind, DtypeError> {
        if let Some(kind) = self.type_id().builtin_kind() {
            return Ok(kind);
        }
        let code = self.kind_code();
        Kind::from_raw(code).ok_or_else(|| {
            tracing::error!(dtype = %self, code, "dtype reported a kind outside the taxonomy");
            DtypeError::UnexpectedKind {
                dtype: self.to_string(),
                code,
            }
        })
    }
}

/// Get the kind of a dtype as text.
pub fn kind_name(dtype: &Dtype) -> Result<&'static str, DtypeError> {
    dtype.kind().map(Kind::name)
}

// Compile-time size assertion: Kind must be exactly 1 byte
const _: () = assert!(std::mem::size_of::<Kind>() == 1);
