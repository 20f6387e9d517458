//! Host-value binding layer for ndt dtypes.
//!
//! A scripting host hands dynamically typed [`HostValue`]s to the functions
//! on [`DtypeRegistry`], which turn them into [`Dtype`](ndt_types::Dtype)s:
//!
//! - [`DtypeRegistry::dtype_from_object`] for objects that name a dtype
//! - [`DtypeRegistry::deduce_dtype`] for plain values
//! - `make_*` wrappers that marshal host arguments into the builders
//! - [`DtypeRegistry::getitem`] for subscripts
//!
//! Deduction runs through an ordered list of [`Recognizer`]s and foreign
//! layouts go through [`ForeignInterop`] hooks. Both lists live on the
//! registry, so hosts extend them without touching this crate.

mod error;
mod foreign;
mod functions;
mod handle;
mod marshal;
mod recognize;
mod registry;
mod value;

pub use error::{BindError, MarshalError, Result};
pub use foreign::{ForeignInterop, TypestrInterop};
pub use handle::{box_dtype, is_dtype_handle, unbox_dtype};
pub use marshal::{
    extract_date_unit, extract_encoding, extract_error_mode, extract_index, extract_index_spec,
    extract_int_sequence, extract_sequence, extract_string, extract_string_sequence,
    extract_subscript,
};
pub use recognize::{
    default_recognizers, BoolRecognizer, ComplexRecognizer, Context, DateRecognizer,
    FloatRecognizer, ForeignRecognizer, HandleRecognizer, IntRecognizer, Recognizer,
    TextRecognizer,
};
pub use registry::{BindConfig, DtypeRegistry, DtypeRegistryBuilder};
pub use value::{ForeignDescriptor, HostDate, HostSlice, HostType, HostValue, OpaqueHandle};
