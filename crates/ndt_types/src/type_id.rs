//! Dtype type id for tag-driven dispatch.
//!
//! Every dtype has exactly one `TypeId`. The id fixes how the dtype's
//! parameters are interpreted and, for built-ins, which [`Kind`] it has.
//!
//! # Id Ranges
//!
//! - 0-15: Scalars (fixed size, no parameters)
//! - 16-31: Strings and bytes (encoding and/or size)
//! - 32-47: Expression dtypes (one or two child dtypes)
//! - 48-63: Composites (fields or dims)
//! - 64-79: Date and time
//! - 240-255: Registry-declared

use std::fmt;

use crate::Kind;

/// Dtype discriminant (u8).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum TypeId {
    // === Scalars (0-15) ===
    Bool = 0,
    Int8 = 1,
    Int16 = 2,
    Int32 = 3,
    Int64 = 4,
    Uint8 = 5,
    Uint16 = 6,
    Uint32 = 7,
    Uint64 = 8,
    Float32 = 9,
    Float64 = 10,
    /// Pair of `float32`.
    ComplexFloat32 = 11,
    /// Pair of `float64`.
    ComplexFloat64 = 12,
    /// Zero-sized.
    Void = 13,

    // === Strings and Bytes (16-31) ===
    /// Fixed number of code units, stored inline.
    FixedString = 16,
    /// Variable-length text stored out of line.
    String = 17,
    /// Fixed number of bytes, stored inline.
    FixedBytes = 18,
    /// Variable-length bytes stored out of line.
    Bytes = 19,

    // === Expressions (32-47) ===
    /// Pointer to a value of the target dtype.
    Pointer = 32,
    /// Operand dtype viewed as a value dtype.
    Convert = 33,

    // === Composites (48-63) ===
    /// Named fields, flexible layout.
    Struct = 48,
    /// Named fields, C layout.
    FixedStruct = 49,
    /// Fixed-shape strided dimensions.
    FixedArray = 50,

    // === Date and Time (64-79) ===
    Date = 64,

    // === Registry-declared (240-255) ===
    Custom = 240,
}

impl TypeId {
    /// The scalar ids, in code order.
    pub const SCALARS: [TypeId; 14] = [
        TypeId::Bool,
        TypeId::Int8,
        TypeId::Int16,
        TypeId::Int32,
        TypeId::Int64,
        TypeId::Uint8,
        TypeId::Uint16,
        TypeId::Uint32,
        TypeId::Uint64,
        TypeId::Float32,
        TypeId::Float64,
        TypeId::ComplexFloat32,
        TypeId::ComplexFloat64,
        TypeId::Void,
    ];

    /// Check if this id is a parameterless scalar.
    #[inline]
    pub const fn is_scalar(self) -> bool {
        (self as u8) < 16
    }

    /// Check if this id is a pointer or conversion.
    #[inline]
    pub const fn is_expression(self) -> bool {
        matches!(self, Self::Pointer | Self::Convert)
    }

    /// Get the kind of a built-in id.
    ///
    /// Returns `None` for [`TypeId::Custom`], whose kind is declared per dtype.
    #[inline]
    pub const fn builtin_kind(self) -> Option<Kind> {
        Some(match self {
            Self::Bool => Kind::Bool,
            Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64 => Kind::Int,
            Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64 => Kind::Uint,
            Self::Float32 | Self::Float64 => Kind::Real,
            Self::ComplexFloat32 | Self::ComplexFloat64 => Kind::Complex,
            Self::Void => Kind::Void,
            Self::FixedString | Self::String => Kind::String,
            Self::FixedBytes | Self::Bytes => Kind::Bytes,
            Self::Pointer | Self::Convert => Kind::Expression,
            Self::Struct | Self::FixedStruct => Kind::Struct,
            Self::FixedArray => Kind::UniformArray,
            Self::Date => Kind::Datetime,
            Self::Custom => return None,
        })
    }

    /// Size and alignment of a scalar id, `None` for parameterized ids.
    #[inline]
    pub const fn scalar_layout(self) -> Option<(usize, usize)> {
        Some(match self {
            Self::Bool | Self::Int8 | Self::Uint8 => (1, 1),
            Self::Int16 | Self::Uint16 => (2, 2),
            Self::Int32 | Self::Uint32 | Self::Float32 => (4, 4),
            Self::Int64 | Self::Uint64 | Self::Float64 => (8, 8),
            Self::ComplexFloat32 => (8, 4),
            Self::ComplexFloat64 => (16, 8),
            Self::Void => (0, 1),
            _ => return None,
        })
    }

    /// Look up a scalar id by its name.
    pub fn scalar_from_name(name: &str) -> Option<TypeId> {
        Self::SCALARS.into_iter().find(|id| id.name() == name)
    }

    /// Get the name of this id as a static string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::ComplexFloat32 => "complex_float32",
            Self::ComplexFloat64 => "complex_float64",
            Self::Void => "void",
            Self::FixedString => "fixedstring",
            Self::String => "string",
            Self::FixedBytes => "fixedbytes",
            Self::Bytes => "bytes",
            Self::Pointer => "pointer",
            Self::Convert => "convert",
            Self::Struct => "struct",
            Self::FixedStruct => "fixedstruct",
            Self::FixedArray => "fixedarray",
            Self::Date => "date",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId::{}", self.name())
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Compile-time size assertion: TypeId must be exactly 1 byte
const _: () = assert!(std::mem::size_of::<TypeId>() == 1);
