//! Host value model.
//!
//! `HostValue` is the dynamically typed value a scripting host hands to the
//! binding layer. Only the shapes the binding layer inspects are modeled.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use num_complex::Complex;

/// A calendar date.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct HostDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

/// A host slice object. Omitted bounds are `None`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct HostSlice {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

/// A host type object.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum HostType {
    NoneType,
    Bool,
    Int,
    Float,
    Complex,
    Bytes,
    Text,
    Date,
    List,
    Tuple,
    /// A foreign scalar type, by name (`"int16"`, `"float32"`, ...).
    Foreign(String),
    /// A foreign native-struct layout type.
    Layout(ForeignDescriptor),
}

impl HostType {
    /// Name of the type as the host spells it.
    pub fn name(&self) -> &str {
        match self {
            HostType::NoneType => "NoneType",
            HostType::Bool => "bool",
            HostType::Int => "int",
            HostType::Float => "float",
            HostType::Complex => "complex",
            HostType::Bytes => "bytes",
            HostType::Text => "str",
            HostType::Date => "date",
            HostType::List => "list",
            HostType::Tuple => "tuple",
            HostType::Foreign(name) => name,
            HostType::Layout(_) => "layout",
        }
    }
}

/// Foreign array-interface style element descriptor.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ForeignDescriptor {
    /// A typestr such as `<i4` or `|S8`.
    Typestr(String),
    /// Named fields laid out in order.
    Record(Vec<(String, ForeignDescriptor)>),
    /// A fixed-shape block of `element`.
    Subarray {
        element: Box<ForeignDescriptor>,
        shape: Vec<i64>,
    },
}

/// Opaque host-side handle around a native value.
#[derive(Clone)]
pub struct OpaqueHandle(Arc<dyn Any + Send + Sync>);

impl OpaqueHandle {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        OpaqueHandle(Arc::new(value))
    }

    /// Borrow the payload if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for OpaqueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OpaqueHandle(..)")
    }
}

/// A dynamically typed host value.
#[derive(Clone, Debug)]
pub enum HostValue {
    None,
    Bool(bool),
    /// Host integers are unbounded; values outside `i128` do not reach us.
    Int(i128),
    Float(f64),
    Complex(Complex<f64>),
    Bytes(Vec<u8>),
    Text(String),
    Date(HostDate),
    List(Vec<HostValue>),
    Tuple(Vec<HostValue>),
    Slice(HostSlice),
    Ellipsis,
    Type(HostType),
    Foreign(ForeignDescriptor),
    Handle(OpaqueHandle),
}

impl HostValue {
    pub fn text(s: impl Into<String>) -> Self {
        HostValue::Text(s.into())
    }

    /// Build a list from anything convertible to host values.
    pub fn list<T: Into<HostValue>>(items: impl IntoIterator<Item = T>) -> Self {
        HostValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a tuple from anything convertible to host values.
    pub fn tuple<T: Into<HostValue>>(items: impl IntoIterator<Item = T>) -> Self {
        HostValue::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Host type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::None => "NoneType",
            HostValue::Bool(_) => "bool",
            HostValue::Int(_) => "int",
            HostValue::Float(_) => "float",
            HostValue::Complex(_) => "complex",
            HostValue::Bytes(_) => "bytes",
            HostValue::Text(_) => "str",
            HostValue::Date(_) => "date",
            HostValue::List(_) => "list",
            HostValue::Tuple(_) => "tuple",
            HostValue::Slice(_) => "slice",
            HostValue::Ellipsis => "ellipsis",
            HostValue::Type(_) => "type",
            HostValue::Foreign(_) => "descriptor",
            HostValue::Handle(handle) => {
                if handle.downcast_ref::<ndt_types::Dtype>().is_some() {
                    "dtype"
                } else {
                    "handle"
                }
            }
        }
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Bool(b)
    }
}

impl From<i64> for HostValue {
    fn from(n: i64) -> Self {
        HostValue::Int(i128::from(n))
    }
}

impl From<i32> for HostValue {
    fn from(n: i32) -> Self {
        HostValue::Int(i128::from(n))
    }
}

impl From<f64> for HostValue {
    fn from(x: f64) -> Self {
        HostValue::Float(x)
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::Text(s.to_string())
    }
}

impl From<HostSlice> for HostValue {
    fn from(s: HostSlice) -> Self {
        HostValue::Slice(s)
    }
}

impl From<HostType> for HostValue {
    fn from(t: HostType) -> Self {
        HostValue::Type(t)
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[HostValue]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Host-style repr.
impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::None => f.write_str("None"),
            HostValue::Bool(true) => f.write_str("True"),
            HostValue::Bool(false) => f.write_str("False"),
            HostValue::Int(n) => write!(f, "{n}"),
            HostValue::Float(x) => write!(f, "{x:?}"),
            HostValue::Complex(c) => write!(f, "({}{:+}j)", c.re, c.im),
            HostValue::Bytes(b) => write!(f, "b'{}'", b.escape_ascii()),
            HostValue::Text(s) => write!(f, "'{s}'"),
            HostValue::Date(d) => write!(f, "date({}, {}, {})", d.year, d.month, d.day),
            HostValue::List(items) => {
                f.write_str("[")?;
                write_seq(f, items)?;
                f.write_str("]")
            }
            HostValue::Tuple(items) => {
                f.write_str("(")?;
                write_seq(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            HostValue::Slice(s) => {
                let show = |v: Option<i64>| v.map_or_else(|| "None".to_string(), |v| v.to_string());
                write!(
                    f,
                    "slice({}, {}, {})",
                    show(s.start),
                    show(s.stop),
                    show(s.step)
                )
            }
            HostValue::Ellipsis => f.write_str("Ellipsis"),
            HostValue::Type(t) => write!(f, "<class '{}'>", t.name()),
            HostValue::Foreign(d) => write!(f, "descriptor({d:?})"),
            HostValue::Handle(handle) => match handle.downcast_ref::<ndt_types::Dtype>() {
                Some(dtype) => write!(f, "dtype('{dtype}')"),
                None => f.write_str("<opaque handle>"),
            },
        }
    }
}
