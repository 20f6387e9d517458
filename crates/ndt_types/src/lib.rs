//! Dtype system for ndt.
//!
//! A `Dtype` is an immutable, `Arc`-shared description of how one element of
//! a multidimensional array is laid out and interpreted. This crate provides:
//!
//! - the closed kind taxonomy ([`Kind`]) and per-dtype type ids ([`TypeId`])
//! - the primitive factory ([`dtype_for`], [`int_dtype_for_value`])
//! - composite builders (`make_*_dtype`)
//! - the multi-axis indexing engine ([`Dtype::at`], [`IndexSpec`])
//!
//! # Sharing
//!
//! `Dtype` clones are reference-count bumps. Equality and hashing are
//! structural, so two dtypes built from identical arguments compare equal
//! even when they are distinct allocations.

mod construct;
mod dtype;
mod error;
mod flags;
mod index;
mod kind;
mod primitive;
mod tokens;
mod type_id;

pub use construct::{
    is_valid_perm, make_bytes_dtype, make_convert_dtype, make_custom_dtype, make_date_dtype,
    make_fixedarray_dtype, make_fixedbytes_dtype, make_fixedstring_dtype, make_fixedstruct_dtype,
    make_pointer_dtype, make_string_dtype, make_struct_dtype,
};
pub use dtype::{Dtype, DtypeData, Field, FixedDim};
pub use error::{DtypeError, ErrorClass, Result};
pub use flags::DtypeFlags;
pub use index::IndexSpec;
pub use kind::{kind_name, Kind};
pub use primitive::{dtype_for, int_dtype_for_value, scalar_dtype, NativeScalar};
pub use tokens::{AssignErrorMode, DateUnit, StringEncoding};
pub use type_id::TypeId;

// Size assertions to prevent accidental regressions.
// `Dtype` is passed by value everywhere and must stay a single pointer.
#[cfg(target_pointer_width = "64")]
const _: () = assert!(std::mem::size_of::<Dtype>() == 8);
