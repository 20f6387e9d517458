//! Value recognizers for dtype deduction.
//!
//! Deduction walks an ordered list of recognizers and takes the first one
//! that claims the value. Hosts extend deduction by adding recognizers to the
//! registry, not by editing this module.

use std::sync::Arc;

use ndt_types::{
    dtype_for, int_dtype_for_value, make_date_dtype, make_string_dtype, DateUnit, Dtype,
    StringEncoding,
};
use num_complex::Complex;

use crate::{unbox_dtype, BindConfig, BindError, ForeignInterop, HostValue, Result};

/// What a recognizer can see besides the value.
pub struct Context<'a> {
    pub config: &'a BindConfig,
    pub interops: &'a [Arc<dyn ForeignInterop>],
}

/// One deduction strategy.
pub trait Recognizer: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// `None` when the value is not this recognizer's business.
    fn recognize(&self, value: &HostValue, cx: &Context<'_>) -> Option<Result<Dtype>>;
}

/// Boxed dtype handles deduce to the dtype they hold.
pub struct HandleRecognizer;

impl Recognizer for HandleRecognizer {
    fn name(&self) -> &'static str {
        "handle"
    }

    fn recognize(&self, value: &HostValue, _cx: &Context<'_>) -> Option<Result<Dtype>> {
        unbox_dtype(value).map(Ok)
    }
}

pub struct BoolRecognizer;

impl Recognizer for BoolRecognizer {
    fn name(&self) -> &'static str {
        "bool"
    }

    fn recognize(&self, value: &HostValue, _cx: &Context<'_>) -> Option<Result<Dtype>> {
        matches!(value, HostValue::Bool(_)).then(|| Ok(dtype_for::<bool>()))
    }
}

/// Integers narrow to `int32` when they fit, `int64` otherwise.
pub struct IntRecognizer;

impl Recognizer for IntRecognizer {
    fn name(&self) -> &'static str {
        "int"
    }

    fn recognize(&self, value: &HostValue, _cx: &Context<'_>) -> Option<Result<Dtype>> {
        let HostValue::Int(n) = value else {
            return None;
        };
        Some(
            i64::try_from(*n)
                .map(int_dtype_for_value)
                .map_err(|_| BindError::Deduction {
                    value: value.to_string(),
                    type_name: value.type_name(),
                }),
        )
    }
}

pub struct FloatRecognizer;

impl Recognizer for FloatRecognizer {
    fn name(&self) -> &'static str {
        "float"
    }

    fn recognize(&self, value: &HostValue, _cx: &Context<'_>) -> Option<Result<Dtype>> {
        matches!(value, HostValue::Float(_)).then(|| Ok(dtype_for::<f64>()))
    }
}

pub struct ComplexRecognizer;

impl Recognizer for ComplexRecognizer {
    fn name(&self) -> &'static str {
        "complex"
    }

    fn recognize(&self, value: &HostValue, _cx: &Context<'_>) -> Option<Result<Dtype>> {
        matches!(value, HostValue::Complex(_)).then(|| Ok(dtype_for::<Complex<f64>>()))
    }
}

/// Bytes and all-ASCII text are `ascii` strings; other text uses the
/// configured wide encoding.
pub struct TextRecognizer;

impl Recognizer for TextRecognizer {
    fn name(&self) -> &'static str {
        "text"
    }

    fn recognize(&self, value: &HostValue, cx: &Context<'_>) -> Option<Result<Dtype>> {
        let encoding = match value {
            HostValue::Bytes(_) => StringEncoding::Ascii,
            HostValue::Text(s) if s.is_ascii() => StringEncoding::Ascii,
            HostValue::Text(_) => cx.config.wide_encoding,
            _ => return None,
        };
        Some(make_string_dtype(encoding).map_err(BindError::from))
    }
}

pub struct DateRecognizer;

impl Recognizer for DateRecognizer {
    fn name(&self) -> &'static str {
        "date"
    }

    fn recognize(&self, value: &HostValue, _cx: &Context<'_>) -> Option<Result<Dtype>> {
        matches!(value, HostValue::Date(_)).then(|| Ok(make_date_dtype(DateUnit::Day)))
    }
}

/// Foreign descriptors go through the registered interop hooks in order.
pub struct ForeignRecognizer;

impl Recognizer for ForeignRecognizer {
    fn name(&self) -> &'static str {
        "foreign"
    }

    fn recognize(&self, value: &HostValue, cx: &Context<'_>) -> Option<Result<Dtype>> {
        let HostValue::Foreign(descriptor) = value else {
            return None;
        };
        cx.interops
            .iter()
            .find_map(|interop| interop.dtype_from_descriptor(descriptor))
            .map(Ok)
    }
}

/// The built-in recognizers in priority order.
pub fn default_recognizers() -> Vec<Arc<dyn Recognizer>> {
    vec![
        Arc::new(HandleRecognizer),
        Arc::new(BoolRecognizer),
        Arc::new(IntRecognizer),
        Arc::new(FloatRecognizer),
        Arc::new(ComplexRecognizer),
        Arc::new(TextRecognizer),
        Arc::new(DateRecognizer),
        Arc::new(ForeignRecognizer),
    ]
}
