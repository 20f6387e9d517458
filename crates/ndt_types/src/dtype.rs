//! The `Dtype` value.
//!
//! A dtype is an `Arc` around its parameters plus layout metadata computed
//! once at construction. Dtypes are never mutated after they are built, so
//! clones share freely across threads.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::{AssignErrorMode, DateUnit, DtypeFlags, StringEncoding, TypeId};

mod format;

/// Size of an out-of-line reference (data pointer plus end pointer).
const BLOCKREF_SIZE: usize = 2 * std::mem::size_of::<usize>();
const POINTER_SIZE: usize = std::mem::size_of::<usize>();
const POINTER_ALIGN: usize = std::mem::align_of::<usize>();

/// A named struct field.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Field {
    pub name: String,
    pub dtype: Dtype,
}

impl Field {
    pub fn new(name: impl Into<String>, dtype: Dtype) -> Self {
        Field {
            name: name.into(),
            dtype,
        }
    }
}

/// One dimension of a fixed array: extent and byte stride.
///
/// Strides may be negative after indexing with a negative step.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FixedDim {
    pub extent: usize,
    pub stride: isize,
}

/// Kind-specific parameters of a dtype.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum DtypeData {
    /// A parameterless scalar (`TypeId::is_scalar`).
    Scalar(TypeId),
    /// `length` code units of `encoding`, stored inline.
    FixedString {
        encoding: StringEncoding,
        length: usize,
    },
    /// Variable-length text.
    String { encoding: StringEncoding },
    /// `size` raw bytes aligned to `alignment`.
    FixedBytes { size: usize, alignment: usize },
    /// Variable-length raw bytes.
    Bytes,
    /// Pointer to a `target` value.
    Pointer { target: Dtype },
    /// `operand` storage viewed as `value`.
    Convert {
        value: Dtype,
        operand: Dtype,
        mode: AssignErrorMode,
    },
    /// Ordered fields with a flexible layout.
    Struct { fields: Vec<Field> },
    /// Ordered fields in C layout, with byte offsets.
    FixedStruct {
        fields: Vec<Field>,
        offsets: SmallVec<[usize; 8]>,
    },
    /// Fixed-shape dimensions over a non-array element.
    FixedArray {
        element: Dtype,
        dims: SmallVec<[FixedDim; 4]>,
    },
    /// Calendar date at `unit` granularity.
    Date { unit: DateUnit },
    /// Registry-declared opaque dtype.
    Custom {
        name: String,
        kind_code: u8,
        size: usize,
        alignment: usize,
    },
}

#[derive(Eq, PartialEq, Hash)]
struct DtypeInner {
    data: DtypeData,
    flags: DtypeFlags,
    size: Option<usize>,
    alignment: usize,
}

/// Immutable, shared description of a data element's layout.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Dtype(Arc<DtypeInner>);

impl Dtype {
    /// Wrap parameters, computing layout metadata.
    ///
    /// Callers validate the parameters first; this never fails.
    pub(crate) fn new(data: DtypeData) -> Self {
        let (flags, size, alignment) = layout_of(&data);
        Dtype(Arc::new(DtypeInner {
            data,
            flags,
            size,
            alignment,
        }))
    }

    /// Build a fixed array, merging an array element into the outer dims.
    pub(crate) fn fixed_array(element: Dtype, mut dims: SmallVec<[FixedDim; 4]>) -> Self {
        if dims.is_empty() {
            return element;
        }
        if let DtypeData::FixedArray {
            element: inner,
            dims: inner_dims,
        } = element.data()
        {
            dims.extend(inner_dims.iter().copied());
            return Dtype::new(DtypeData::FixedArray {
                element: inner.clone(),
                dims,
            });
        }
        Dtype::new(DtypeData::FixedArray { element, dims })
    }

    /// Get the parameters of this dtype.
    #[inline]
    pub fn data(&self) -> &DtypeData {
        &self.0.data
    }

    /// Get the type id.
    pub fn type_id(&self) -> TypeId {
        match self.data() {
            DtypeData::Scalar(id) => *id,
            DtypeData::FixedString { .. } => TypeId::FixedString,
            DtypeData::String { .. } => TypeId::String,
            DtypeData::FixedBytes { .. } => TypeId::FixedBytes,
            DtypeData::Bytes => TypeId::Bytes,
            DtypeData::Pointer { .. } => TypeId::Pointer,
            DtypeData::Convert { .. } => TypeId::Convert,
            DtypeData::Struct { .. } => TypeId::Struct,
            DtypeData::FixedStruct { .. } => TypeId::FixedStruct,
            DtypeData::FixedArray { .. } => TypeId::FixedArray,
            DtypeData::Date { .. } => TypeId::Date,
            DtypeData::Custom { .. } => TypeId::Custom,
        }
    }

    /// Raw kind code; for built-ins this is always a valid [`crate::Kind`].
    pub(crate) fn kind_code(&self) -> u8 {
        match (self.data(), self.type_id().builtin_kind()) {
            (DtypeData::Custom { kind_code, .. }, _) => *kind_code,
            (_, Some(kind)) => kind.raw(),
            (_, None) => u8::MAX,
        }
    }

    /// Get the pre-computed flags.
    #[inline]
    pub fn flags(&self) -> DtypeFlags {
        self.0.flags
    }

    /// Size in bytes of one element, `None` for flexible layouts.
    #[inline]
    pub fn data_size(&self) -> Option<usize> {
        self.0.size
    }

    /// Alignment in bytes of one element.
    #[inline]
    pub fn alignment(&self) -> usize {
        self.0.alignment
    }

    /// Check whether two handles share one allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Dtype) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Fields of a struct or fixed struct, in layout order.
    pub fn fields(&self) -> Option<&[Field]> {
        match self.data() {
            DtypeData::Struct { fields } | DtypeData::FixedStruct { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Byte offsets of a fixed struct's fields.
    pub fn field_offsets(&self) -> Option<&[usize]> {
        match self.data() {
            DtypeData::FixedStruct { offsets, .. } => Some(offsets),
            _ => None,
        }
    }

    /// Dimensions of a fixed array.
    pub fn dims(&self) -> Option<&[FixedDim]> {
        match self.data() {
            DtypeData::FixedArray { dims, .. } => Some(dims),
            _ => None,
        }
    }

    /// Extents of the leading fixed dims (empty for non-arrays).
    pub fn shape(&self) -> SmallVec<[usize; 4]> {
        self.dims()
            .map(|dims| dims.iter().map(|d| d.extent).collect())
            .unwrap_or_default()
    }

    /// Byte strides of the leading fixed dims (empty for non-arrays).
    pub fn strides(&self) -> SmallVec<[isize; 4]> {
        self.dims()
            .map(|dims| dims.iter().map(|d| d.stride).collect())
            .unwrap_or_default()
    }

    /// Number of leading fixed dims.
    pub fn rank(&self) -> usize {
        self.dims().map_or(0, <[FixedDim]>::len)
    }

    /// Element of a fixed array.
    pub fn element(&self) -> Option<&Dtype> {
        match self.data() {
            DtypeData::FixedArray { element, .. } => Some(element),
            _ => None,
        }
    }

    /// Target of a pointer.
    pub fn target(&self) -> Option<&Dtype> {
        match self.data() {
            DtypeData::Pointer { target } => Some(target),
            _ => None,
        }
    }

    /// Encoding of a fixed or variable string.
    pub fn encoding(&self) -> Option<StringEncoding> {
        match self.data() {
            DtypeData::FixedString { encoding, .. } | DtypeData::String { encoding } => {
                Some(*encoding)
            }
            _ => None,
        }
    }

    /// Unit of a date.
    pub fn unit(&self) -> Option<DateUnit> {
        match self.data() {
            DtypeData::Date { unit } => Some(*unit),
            _ => None,
        }
    }

    /// Error mode of a conversion.
    pub fn error_mode(&self) -> Option<AssignErrorMode> {
        match self.data() {
            DtypeData::Convert { mode, .. } => Some(*mode),
            _ => None,
        }
    }

    /// The dtype values are seen as: a conversion's value dtype, else `self`.
    pub fn value_dtype(&self) -> &Dtype {
        match self.data() {
            DtypeData::Convert { value, .. } => value,
            _ => self,
        }
    }

    /// The dtype values are stored as: a conversion's operand, else `self`.
    pub fn operand_dtype(&self) -> &Dtype {
        match self.data() {
            DtypeData::Convert { operand, .. } => operand,
            _ => self,
        }
    }

    /// Check whether a fixed array's strides are the C-order default.
    pub fn is_c_contiguous(&self) -> bool {
        match self.data() {
            DtypeData::FixedArray { element, dims } => {
                let shape: SmallVec<[usize; 4]> = dims.iter().map(|d| d.extent).collect();
                let expected = c_strides(&shape, element.data_size().unwrap_or(0));
                dims.iter().zip(expected).all(|(d, s)| d.stride == s)
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dtype({self})")
    }
}

/// Convert a byte count to a signed stride, saturating.
#[inline]
pub(crate) fn to_stride(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

/// Strides for `shape` where the last axis varies fastest.
pub(crate) fn c_strides(shape: &[usize], element_size: usize) -> SmallVec<[isize; 4]> {
    let mut strides: SmallVec<[isize; 4]> = SmallVec::from_elem(0, shape.len());
    let mut stride = to_stride(element_size);
    for (axis, &extent) in shape.iter().enumerate().rev() {
        strides[axis] = stride;
        stride = stride.saturating_mul(to_stride(extent));
    }
    strides
}

/// Bytes spanned by a strided layout.
fn array_span(dims: &[FixedDim], element_size: usize) -> usize {
    if dims.iter().any(|d| d.extent == 0) {
        return 0;
    }
    // Builders reject layouts past `isize::MAX`; indexing only narrows them.
    dims.iter().fold(element_size, |acc, d| {
        acc.saturating_add(d.stride.unsigned_abs().saturating_mul(d.extent - 1))
    })
}

/// Compute flags, size and alignment for a set of parameters.
fn layout_of(data: &DtypeData) -> (DtypeFlags, Option<usize>, usize) {
    use DtypeFlags as F;

    let (flags, size, alignment) = match data {
        DtypeData::Scalar(id) => {
            let (size, alignment) = id.scalar_layout().unwrap_or((0, 1));
            (F::IS_SCALAR | F::FIXED_SIZE | F::POD, Some(size), alignment)
        }
        DtypeData::FixedString { encoding, length } => {
            let unit = encoding.code_unit_size();
            (
                F::IS_STRING | F::FIXED_SIZE | F::POD,
                Some(unit.saturating_mul(*length)),
                unit,
            )
        }
        DtypeData::String { .. } => (
            F::IS_STRING | F::FIXED_SIZE | F::HAS_BLOCKREF,
            Some(BLOCKREF_SIZE),
            POINTER_ALIGN,
        ),
        DtypeData::FixedBytes { size, alignment } => (F::FIXED_SIZE | F::POD, Some(*size), *alignment),
        DtypeData::Bytes => (
            F::FIXED_SIZE | F::HAS_BLOCKREF,
            Some(BLOCKREF_SIZE),
            POINTER_ALIGN,
        ),
        DtypeData::Pointer { target } => (
            F::propagate_all([target.flags()])
                | F::IS_EXPRESSION
                | F::HAS_EXPRESSION
                | F::HAS_BLOCKREF
                | F::FIXED_SIZE,
            Some(POINTER_SIZE),
            POINTER_ALIGN,
        ),
        DtypeData::Convert { value, operand, .. } => {
            let mut flags = F::propagate_all([value.flags(), operand.flags()])
                | F::IS_EXPRESSION
                | F::HAS_EXPRESSION;
            if operand.flags().is_fixed_size() {
                flags |= F::FIXED_SIZE;
            }
            (flags, operand.data_size(), operand.alignment())
        }
        DtypeData::Struct { fields } => (
            F::propagate_all(fields.iter().map(|f| f.dtype.flags()))
                | F::IS_STRUCT
                | F::HAS_VARIABLE_LAYOUT,
            None,
            max_alignment(fields),
        ),
        DtypeData::FixedStruct { fields, offsets } => {
            let alignment = max_alignment(fields);
            let end = fields
                .iter()
                .zip(offsets)
                .map(|(f, &offset)| offset.saturating_add(f.dtype.data_size().unwrap_or(0)))
                .max()
                .unwrap_or(0);
            let mut flags =
                F::propagate_all(fields.iter().map(|f| f.dtype.flags())) | F::IS_STRUCT | F::FIXED_SIZE;
            if fields.iter().all(|f| f.dtype.flags().is_pod()) {
                flags |= F::POD;
            }
            (flags, Some(end.next_multiple_of(alignment)), alignment)
        }
        DtypeData::FixedArray { element, dims } => {
            let mut flags = F::propagate_all([element.flags()]) | F::IS_ARRAY | F::FIXED_SIZE;
            if element.flags().is_pod() {
                flags |= F::POD;
            }
            let size = array_span(dims, element.data_size().unwrap_or(0));
            (flags, Some(size), element.alignment())
        }
        DtypeData::Date { .. } => (F::IS_SCALAR | F::FIXED_SIZE | F::POD, Some(4), 4),
        DtypeData::Custom {
            size, alignment, ..
        } => (F::HAS_CUSTOM | F::FIXED_SIZE, Some(*size), *alignment),
    };

    let flags = if size == Some(0) {
        flags | F::ZERO_SIZED
    } else {
        flags
    };
    (flags, size, alignment)
}

fn max_alignment(fields: &[Field]) -> usize {
    fields
        .iter()
        .map(|f| f.dtype.alignment())
        .max()
        .unwrap_or(1)
}
