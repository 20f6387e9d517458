//! Primitive dtype factory.
//!
//! Scalar dtypes are built once and handed out as clones, so asking for
//! `int32` twice yields two handles to the same allocation.

use std::sync::LazyLock;

use num_complex::Complex;

use crate::{Dtype, DtypeData, TypeId};

/// Pre-built scalar dtypes, indexed by `TypeId` code.
static SCALARS: LazyLock<[Dtype; 14]> =
    LazyLock::new(|| TypeId::SCALARS.map(|id| Dtype::new(DtypeData::Scalar(id))));

/// A native Rust scalar with a canonical dtype.
pub trait NativeScalar: Copy + 'static {
    /// Type id of the canonical dtype.
    const TYPE_ID: TypeId;
}

macro_rules! native_scalars {
    ($($ty:ty => $id:ident),* $(,)?) => {
        $(
            impl NativeScalar for $ty {
                const TYPE_ID: TypeId = TypeId::$id;
            }
        )*
    };
}

native_scalars! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    Complex<f32> => ComplexFloat32,
    Complex<f64> => ComplexFloat64,
    () => Void,
}

/// Get the canonical dtype of a native scalar type.
pub fn dtype_for<T: NativeScalar>() -> Dtype {
    SCALARS[usize::from(T::TYPE_ID as u8)].clone()
}

/// Get the dtype for a scalar type id, `None` if the id takes parameters.
pub fn scalar_dtype(id: TypeId) -> Option<Dtype> {
    id.is_scalar()
        .then(|| SCALARS[usize::from(id as u8)].clone())
}

/// Narrowest signed integer dtype for a value.
///
/// `int32` when the value fits in `i32`, `int64` otherwise. The threshold is
/// fixed and does not depend on the platform's native integer width.
pub fn int_dtype_for_value(value: i64) -> Dtype {
    if i32::try_from(value).is_ok() {
        dtype_for::<i32>()
    } else {
        dtype_for::<i64>()
    }
}
