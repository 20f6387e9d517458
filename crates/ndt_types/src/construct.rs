//! Composite dtype builders.
//!
//! Every builder validates all of its arguments before allocating, so a
//! failed call never yields a partially built dtype.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::dtype::{c_strides, to_stride};
use crate::{
    AssignErrorMode, DateUnit, Dtype, DtypeData, DtypeError, Field, FixedDim, Result,
    StringEncoding,
};

/// Largest alignment accepted for bytes and custom dtypes.
const MAX_ALIGNMENT: usize = 16;

/// Build a conversion from `from` storage to `to` values.
///
/// If `from` already yields `to` values, `from` is returned unchanged.
pub fn make_convert_dtype(to: &Dtype, from: &Dtype, mode: AssignErrorMode) -> Dtype {
    if from.value_dtype() == to {
        return from.clone();
    }
    Dtype::new(DtypeData::Convert {
        value: to.clone(),
        operand: from.clone(),
        mode,
    })
}

/// Build a string of `size` code units stored inline.
pub fn make_fixedstring_dtype(encoding: StringEncoding, size: i64) -> Result<Dtype> {
    let encoding = encoding.validated()?;
    let length = non_negative("string size", size)?;
    checked_size(length.checked_mul(encoding.code_unit_size())).ok_or_else(|| {
        DtypeError::SizeOverflow {
            what: "string size",
            value: size.to_string(),
        }
    })?;
    Ok(Dtype::new(DtypeData::FixedString { encoding, length }))
}

/// Build a variable-length string.
pub fn make_string_dtype(encoding: StringEncoding) -> Result<Dtype> {
    let encoding = encoding.validated()?;
    Ok(Dtype::new(DtypeData::String { encoding }))
}

/// Build `size` raw bytes with the given alignment.
pub fn make_fixedbytes_dtype(size: i64, alignment: i64) -> Result<Dtype> {
    let size_bytes = non_negative("bytes size", size)?;
    let bad_alignment = || DtypeError::InvalidAlignment { alignment, size };
    let align = usize::try_from(alignment).map_err(|_| bad_alignment())?;
    if !valid_alignment(align) || size_bytes % align != 0 {
        return Err(bad_alignment());
    }
    Ok(Dtype::new(DtypeData::FixedBytes {
        size: size_bytes,
        alignment: align,
    }))
}

/// Build variable-length raw bytes.
pub fn make_bytes_dtype() -> Dtype {
    Dtype::new(DtypeData::Bytes)
}

/// Build a pointer to `target`.
pub fn make_pointer_dtype(target: &Dtype) -> Dtype {
    Dtype::new(DtypeData::Pointer {
        target: target.clone(),
    })
}

/// Build a struct with a flexible layout.
#[tracing::instrument(level = "trace", skip_all, fields(fields = field_types.len()))]
pub fn make_struct_dtype<S: AsRef<str>>(field_types: &[Dtype], field_names: &[S]) -> Result<Dtype> {
    let fields = zip_fields(field_types, field_names)?;
    Ok(Dtype::new(DtypeData::Struct { fields }))
}

/// Build a struct in C layout.
///
/// Each field starts at the next offset aligned to its own alignment; every
/// field must have a fixed size.
#[tracing::instrument(level = "trace", skip_all, fields(fields = field_types.len()))]
pub fn make_fixedstruct_dtype<S: AsRef<str>>(
    field_types: &[Dtype],
    field_names: &[S],
) -> Result<Dtype> {
    let fields = zip_fields(field_types, field_names)?;
    let offsets = c_layout(&fields)?;
    Ok(Dtype::new(DtypeData::FixedStruct { fields, offsets }))
}

/// Build a fixed-shape array of `element`.
///
/// `axis_perm[0]` names the fastest-varying axis; `None` means C order
/// (last axis fastest). An array `element` is merged: its dims follow the
/// new ones.
#[tracing::instrument(level = "trace", skip_all, fields(element = %element, shape = ?shape))]
pub fn make_fixedarray_dtype(
    element: &Dtype,
    shape: &[i64],
    axis_perm: Option<&[i64]>,
) -> Result<Dtype> {
    let extents = shape
        .iter()
        .map(|&extent| non_negative("array extent", extent))
        .collect::<Result<SmallVec<[usize; 4]>>>()?;

    let Some(element_size) = element.data_size() else {
        return Err(DtypeError::NotFixedSize {
            dtype: element.to_string(),
            context: "fixedarray element".to_string(),
        });
    };

    array_bytes(&extents, element_size).map_err(|extent| DtypeError::SizeOverflow {
        what: "array extent",
        value: extent.to_string(),
    })?;

    let strides = match axis_perm {
        Some(perm) => {
            let Some(order) = perm_order(perm) else {
                return Err(DtypeError::InvalidPermutation {
                    perm: perm.to_vec(),
                });
            };
            if order.len() != extents.len() {
                return Err(DtypeError::ArityMismatch {
                    what: "axis permutation",
                    expected: extents.len(),
                    found: order.len(),
                });
            }
            perm_strides(&extents, &order, element_size)
        }
        None => c_strides(&extents, element_size),
    };

    let dims = extents
        .iter()
        .zip(strides)
        .map(|(&extent, stride)| FixedDim { extent, stride })
        .collect();
    Ok(Dtype::fixed_array(element.clone(), dims))
}

/// Build a date with the given granularity.
pub fn make_date_dtype(unit: DateUnit) -> Dtype {
    Dtype::new(DtypeData::Date { unit })
}

/// Build a registry-declared opaque dtype.
///
/// The kind code is stored as given; [`Dtype::kind`] checks it.
pub fn make_custom_dtype(name: &str, kind_code: u8, size: usize, alignment: usize) -> Result<Dtype> {
    if !valid_alignment(alignment) || size % alignment != 0 {
        return Err(DtypeError::InvalidAlignment {
            alignment: i64::try_from(alignment).unwrap_or(i64::MAX),
            size: i64::try_from(size).unwrap_or(i64::MAX),
        });
    }
    Ok(Dtype::new(DtypeData::Custom {
        name: name.to_string(),
        kind_code,
        size,
        alignment,
    }))
}

/// Check whether `perm` is a permutation of `0..perm.len()`.
pub fn is_valid_perm(perm: &[i64]) -> bool {
    perm_order(perm).is_some()
}

fn perm_order(perm: &[i64]) -> Option<SmallVec<[usize; 4]>> {
    let mut seen: SmallVec<[bool; 8]> = SmallVec::from_elem(false, perm.len());
    perm.iter()
        .map(|&axis| {
            let axis = usize::try_from(axis).ok().filter(|&a| a < perm.len())?;
            if std::mem::replace(&mut seen[axis], true) {
                return None;
            }
            Some(axis)
        })
        .collect()
}

fn perm_strides(extents: &[usize], order: &[usize], element_size: usize) -> SmallVec<[isize; 4]> {
    let mut strides: SmallVec<[isize; 4]> = SmallVec::from_elem(0, extents.len());
    let mut stride = to_stride(element_size);
    for &axis in order {
        strides[axis] = stride;
        stride = stride.saturating_mul(to_stride(extents[axis]));
    }
    strides
}

/// Accept a byte count only if it also fits a signed stride.
fn checked_size(bytes: Option<usize>) -> Option<usize> {
    bytes.filter(|&n| isize::try_from(n).is_ok())
}

/// Total bytes of a dense array, or the extent that overflows it.
fn array_bytes(extents: &[usize], element_size: usize) -> Result<usize, usize> {
    if extents.contains(&0) {
        return Ok(0);
    }
    extents.iter().try_fold(element_size, |acc, &extent| {
        checked_size(acc.checked_mul(extent)).ok_or(extent)
    })
}

fn non_negative(what: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| DtypeError::InvalidSize { what, value })
}

fn valid_alignment(alignment: usize) -> bool {
    alignment.is_power_of_two() && alignment <= MAX_ALIGNMENT
}

fn zip_fields<S: AsRef<str>>(field_types: &[Dtype], field_names: &[S]) -> Result<Vec<Field>> {
    if field_types.len() != field_names.len() {
        return Err(DtypeError::ArityMismatch {
            what: "field names",
            expected: field_types.len(),
            found: field_names.len(),
        });
    }

    let mut seen = FxHashSet::default();
    let mut fields = Vec::with_capacity(field_types.len());
    for (index, (dtype, name)) in field_types.iter().zip(field_names).enumerate() {
        let name: &str = name.as_ref();
        if name.is_empty() {
            return Err(DtypeError::InvalidFieldName { index });
        }
        if !seen.insert(name) {
            return Err(DtypeError::DuplicateFieldName {
                name: name.to_string(),
            });
        }
        fields.push(Field::new(name, dtype.clone()));
    }
    Ok(fields)
}

/// Compute C-layout offsets for fixed-size fields.
pub(crate) fn c_layout(fields: &[Field]) -> Result<SmallVec<[usize; 8]>> {
    let mut offsets = SmallVec::with_capacity(fields.len());
    let mut offset = 0usize;
    for field in fields {
        let Some(size) = field.dtype.data_size() else {
            return Err(DtypeError::NotFixedSize {
                dtype: field.dtype.to_string(),
                context: format!("fixedstruct field \"{}\"", field.name),
            });
        };
        let overflow = || DtypeError::SizeOverflow {
            what: "fixedstruct field",
            value: format!("\"{}\"", field.name),
        };
        offset = offset
            .checked_next_multiple_of(field.dtype.alignment())
            .ok_or_else(overflow)?;
        offsets.push(offset);
        offset = checked_size(offset.checked_add(size)).ok_or_else(overflow)?;
    }
    Ok(offsets)
}

#[cfg(test)]
mod tests;
