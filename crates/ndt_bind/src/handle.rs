//! Boxing dtypes into opaque host handles.

use ndt_types::Dtype;

use crate::value::OpaqueHandle;
use crate::HostValue;

/// Wrap a dtype for storage in a host object.
pub fn box_dtype(dtype: Dtype) -> HostValue {
    HostValue::Handle(OpaqueHandle::new(dtype))
}

/// Check whether a host value is a boxed dtype.
pub fn is_dtype_handle(value: &HostValue) -> bool {
    unbox_ref(value).is_some()
}

/// Get the dtype out of a boxed handle.
pub fn unbox_dtype(value: &HostValue) -> Option<Dtype> {
    unbox_ref(value).cloned()
}

fn unbox_ref(value: &HostValue) -> Option<&Dtype> {
    match value {
        HostValue::Handle(handle) => handle.downcast_ref::<Dtype>(),
        _ => None,
    }
}
