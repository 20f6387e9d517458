//! Foreign native-layout interop.
//!
//! Interop hooks map foreign element descriptors and scalar type names to
//! dtypes. They return `None` for anything they do not understand so the
//! caller can try the next hook.

use ndt_types::{
    dtype_for, make_date_dtype, make_fixedarray_dtype, make_fixedbytes_dtype,
    make_fixedstring_dtype, make_fixedstruct_dtype, scalar_dtype, DateUnit, Dtype, StringEncoding,
    TypeId,
};
use num_complex::Complex;

use crate::ForeignDescriptor;

/// A source of dtypes for foreign descriptors.
pub trait ForeignInterop: Send + Sync {
    /// Map an element descriptor.
    fn dtype_from_descriptor(&self, descriptor: &ForeignDescriptor) -> Option<Dtype>;

    /// Map a foreign scalar type name.
    fn dtype_from_scalar_type(&self, name: &str) -> Option<Dtype>;
}

/// Interop for array-interface typestrs (`<i4`, `|S5`, `<M8[D]`, ...).
///
/// Only native and byte-order-free typestrs are recognized.
#[derive(Copy, Clone, Debug, Default)]
pub struct TypestrInterop;

impl ForeignInterop for TypestrInterop {
    fn dtype_from_descriptor(&self, descriptor: &ForeignDescriptor) -> Option<Dtype> {
        match descriptor {
            ForeignDescriptor::Typestr(typestr) => parse_typestr(typestr),
            ForeignDescriptor::Record(fields) => {
                let mut types = Vec::with_capacity(fields.len());
                let mut names = Vec::with_capacity(fields.len());
                for (name, field) in fields {
                    types.push(self.dtype_from_descriptor(field)?);
                    names.push(name.as_str());
                }
                make_fixedstruct_dtype(&types, &names).ok()
            }
            ForeignDescriptor::Subarray { element, shape } => {
                let element = self.dtype_from_descriptor(element)?;
                make_fixedarray_dtype(&element, shape, None).ok()
            }
        }
    }

    fn dtype_from_scalar_type(&self, name: &str) -> Option<Dtype> {
        let id = match name {
            "bool_" | "bool" => TypeId::Bool,
            "int8" => TypeId::Int8,
            "int16" => TypeId::Int16,
            "int32" => TypeId::Int32,
            "int64" => TypeId::Int64,
            "uint8" => TypeId::Uint8,
            "uint16" => TypeId::Uint16,
            "uint32" => TypeId::Uint32,
            "uint64" => TypeId::Uint64,
            "float32" => TypeId::Float32,
            "float64" => TypeId::Float64,
            "complex64" => TypeId::ComplexFloat32,
            "complex128" => TypeId::ComplexFloat64,
            _ => return parse_typestr(name),
        };
        scalar_dtype(id)
    }
}

/// Byte-order marks that match this target.
const fn native_order(mark: char) -> bool {
    match mark {
        '|' | '=' => true,
        '<' => cfg!(target_endian = "little"),
        '>' => cfg!(target_endian = "big"),
        _ => false,
    }
}

fn parse_typestr(typestr: &str) -> Option<Dtype> {
    let mut chars = typestr.chars();
    if !native_order(chars.next()?) {
        return None;
    }
    let kind = chars.next()?;
    let rest = chars.as_str();

    if kind == 'M' {
        let unit = match rest {
            "8[D]" => DateUnit::Day,
            "8[M]" => DateUnit::Month,
            "8[Y]" => DateUnit::Year,
            _ => return None,
        };
        return Some(make_date_dtype(unit));
    }

    let size: i64 = rest.parse().ok()?;
    match (kind, size) {
        ('b' | '?', 1) => Some(dtype_for::<bool>()),
        ('i', 1) => Some(dtype_for::<i8>()),
        ('i', 2) => Some(dtype_for::<i16>()),
        ('i', 4) => Some(dtype_for::<i32>()),
        ('i', 8) => Some(dtype_for::<i64>()),
        ('u', 1) => Some(dtype_for::<u8>()),
        ('u', 2) => Some(dtype_for::<u16>()),
        ('u', 4) => Some(dtype_for::<u32>()),
        ('u', 8) => Some(dtype_for::<u64>()),
        ('f', 4) => Some(dtype_for::<f32>()),
        ('f', 8) => Some(dtype_for::<f64>()),
        ('c', 8) => Some(dtype_for::<Complex<f32>>()),
        ('c', 16) => Some(dtype_for::<Complex<f64>>()),
        ('S', n) => make_fixedstring_dtype(StringEncoding::Ascii, n).ok(),
        ('U', n) => make_fixedstring_dtype(StringEncoding::Utf32, n).ok(),
        ('V', n) => make_fixedbytes_dtype(n, 1).ok(),
        _ => None,
    }
}
