use super::*;
use crate::{dtype_for, DtypeFlags, Kind, TypeId};
use num_complex::Complex;
use pretty_assertions::assert_eq;

fn int32() -> Dtype {
    dtype_for::<i32>()
}

fn float64() -> Dtype {
    dtype_for::<f64>()
}

fn ok<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("unexpected error: {err}"),
    }
}

// === Strings ===

#[test]
fn fixedstring_size_scales_with_encoding() {
    let ascii = ok(make_fixedstring_dtype(StringEncoding::Ascii, 10));
    let utf16 = ok(make_fixedstring_dtype(StringEncoding::Utf16, 10));
    let utf32 = ok(make_fixedstring_dtype(StringEncoding::Utf32, 10));

    assert_eq!(ascii.data_size(), Some(10));
    assert_eq!(utf16.data_size(), Some(20));
    assert_eq!(utf32.data_size(), Some(40));
    assert_eq!(utf32.alignment(), 4);
    assert_eq!(utf32.encoding(), Some(StringEncoding::Utf32));
    assert!(ascii.flags().is_pod());
}

#[test]
fn fixedstring_rejects_negative_size() {
    assert_eq!(
        make_fixedstring_dtype(StringEncoding::Utf8, -1),
        Err(DtypeError::InvalidSize {
            what: "string size",
            value: -1
        })
    );
}

#[test]
fn builders_reject_invalid_encoding() {
    assert!(matches!(
        make_string_dtype(StringEncoding::Invalid),
        Err(DtypeError::InvalidEncoding { .. })
    ));
    assert!(matches!(
        make_fixedstring_dtype(StringEncoding::Invalid, 3),
        Err(DtypeError::InvalidEncoding { .. })
    ));
}

#[test]
fn variable_string_holds_blockref() {
    let s = ok(make_string_dtype(StringEncoding::Utf8));
    assert_eq!(s.kind(), Ok(Kind::String));
    assert!(s.flags().has_blockref());
    assert!(!s.flags().is_pod());
    assert_eq!(s.data_size(), Some(2 * std::mem::size_of::<usize>()));
}

// === Bytes ===

#[test]
fn fixedbytes_alignment_rules() {
    let b = ok(make_fixedbytes_dtype(8, 4));
    assert_eq!(b.data_size(), Some(8));
    assert_eq!(b.alignment(), 4);
    assert_eq!(b.kind(), Ok(Kind::Bytes));

    assert!(matches!(
        make_fixedbytes_dtype(6, 4),
        Err(DtypeError::InvalidAlignment { .. })
    ));
    assert!(matches!(
        make_fixedbytes_dtype(6, 3),
        Err(DtypeError::InvalidAlignment { .. })
    ));
    assert!(matches!(
        make_fixedbytes_dtype(-2, 1),
        Err(DtypeError::InvalidSize { .. })
    ));
    assert_eq!(make_bytes_dtype().kind(), Ok(Kind::Bytes));
}

// === Pointer and convert ===

#[test]
fn pointer_is_expression() {
    let p = make_pointer_dtype(&int32());
    assert_eq!(p.kind(), Ok(Kind::Expression));
    assert_eq!(p.target(), Some(&int32()));
    assert!(p.flags().contains(DtypeFlags::IS_EXPRESSION));
    assert_eq!(p.data_size(), Some(std::mem::size_of::<usize>()));
}

#[test]
fn convert_carries_mode_and_operand_layout() {
    let c = make_convert_dtype(&int32(), &float64(), AssignErrorMode::Overflow);
    assert_eq!(c.kind(), Ok(Kind::Expression));
    assert_eq!(c.value_dtype(), &int32());
    assert_eq!(c.operand_dtype(), &float64());
    assert_eq!(c.error_mode(), Some(AssignErrorMode::Overflow));
    assert_eq!(c.data_size(), Some(8));
}

#[test]
fn convert_to_same_value_is_identity() {
    let f = float64();
    let c = make_convert_dtype(&f, &f, AssignErrorMode::Inexact);
    assert!(c.ptr_eq(&f));

    let c1 = make_convert_dtype(&int32(), &float64(), AssignErrorMode::Default);
    let c2 = make_convert_dtype(&int32(), &c1, AssignErrorMode::None);
    assert_eq!(c2, c1);
}

// === Structs ===

#[test]
fn struct_preserves_field_order() {
    let s = ok(make_struct_dtype(&[int32(), float64()], &["a", "b"]));
    let fields: Vec<(&str, TypeId)> = s
        .fields()
        .unwrap_or_default()
        .iter()
        .map(|f| (f.name.as_str(), f.dtype.type_id()))
        .collect();
    assert_eq!(fields, [("a", TypeId::Int32), ("b", TypeId::Float64)]);
    assert_eq!(s.kind(), Ok(Kind::Struct));
    assert_eq!(s.data_size(), None);
    assert_eq!(s.alignment(), 8);
}

#[test]
fn struct_arity_mismatch() {
    assert_eq!(
        make_struct_dtype(&[int32()], &["a", "b"]),
        Err(DtypeError::ArityMismatch {
            what: "field names",
            expected: 1,
            found: 2
        })
    );
    assert!(matches!(
        make_fixedstruct_dtype(&[int32(), int32()], &["a"]),
        Err(DtypeError::ArityMismatch { .. })
    ));
}

#[test]
fn struct_rejects_duplicate_and_empty_names() {
    assert_eq!(
        make_struct_dtype(&[int32(), float64()], &["x", "x"]),
        Err(DtypeError::DuplicateFieldName {
            name: "x".to_string()
        })
    );
    assert_eq!(
        make_struct_dtype(&[int32()], &[""]),
        Err(DtypeError::InvalidFieldName { index: 0 })
    );
}

#[test]
fn empty_struct() {
    let names: [&str; 0] = [];
    let s = ok(make_fixedstruct_dtype(&[], &names));
    assert_eq!(s.data_size(), Some(0));
    assert_eq!(s.alignment(), 1);
    assert!(s.flags().contains(DtypeFlags::ZERO_SIZED));
}

#[test]
fn fixedstruct_c_layout() {
    let int8 = dtype_for::<i8>();
    let s = ok(make_fixedstruct_dtype(
        &[int8.clone(), float64(), dtype_for::<i16>(), int8],
        &["a", "b", "c", "d"],
    ));
    assert_eq!(s.field_offsets(), Some(&[0, 8, 16, 18][..]));
    assert_eq!(s.data_size(), Some(24));
    assert_eq!(s.alignment(), 8);
    assert!(s.flags().is_pod());
}

#[test]
fn fixedstruct_requires_fixed_size_fields() {
    let inner = ok(make_struct_dtype(&[int32()], &["x"]));
    let err = make_fixedstruct_dtype(&[inner], &["inner"]);
    assert!(matches!(err, Err(DtypeError::NotFixedSize { .. })));
}

#[test]
fn fixedstruct_with_string_is_not_pod() {
    let s = ok(make_string_dtype(StringEncoding::Utf8));
    let fs = ok(make_fixedstruct_dtype(&[int32(), s], &["id", "name"]));
    assert!(fs.flags().has_blockref());
    assert!(!fs.flags().is_pod());
    assert_eq!(fs.field_offsets(), Some(&[0, 8][..]));
}

// === Fixed arrays ===

#[test]
fn fixedarray_default_c_order() {
    let a = ok(make_fixedarray_dtype(&int32(), &[3, 4], None));
    assert_eq!(a.shape().as_slice(), &[3, 4]);
    assert_eq!(a.strides().as_slice(), &[16, 4]);
    assert_eq!(a.rank(), 2);
    assert_eq!(a.data_size(), Some(48));
    assert_eq!(a.kind(), Ok(Kind::UniformArray));
    assert!(a.is_c_contiguous());
}

#[test]
fn fixedarray_with_permutation() {
    let c_order = ok(make_fixedarray_dtype(&int32(), &[3, 4], Some(&[1, 0])));
    assert_eq!(c_order.strides().as_slice(), &[16, 4]);

    let f_order = ok(make_fixedarray_dtype(&int32(), &[3, 4], Some(&[0, 1])));
    assert_eq!(f_order.strides().as_slice(), &[4, 12]);
    assert_eq!(f_order.data_size(), Some(48));
    assert!(!f_order.is_c_contiguous());
}

#[test]
fn fixedarray_invalid_permutation() {
    assert_eq!(
        make_fixedarray_dtype(&int32(), &[3, 4], Some(&[0, 0])),
        Err(DtypeError::InvalidPermutation { perm: vec![0, 0] })
    );
    assert!(matches!(
        make_fixedarray_dtype(&int32(), &[3, 4], Some(&[0, 2])),
        Err(DtypeError::InvalidPermutation { .. })
    ));
    assert!(matches!(
        make_fixedarray_dtype(&int32(), &[3, 4], Some(&[-1, 0])),
        Err(DtypeError::InvalidPermutation { .. })
    ));
}

#[test]
fn fixedarray_permutation_length_mismatch() {
    assert_eq!(
        make_fixedarray_dtype(&int32(), &[3, 4], Some(&[1, 0, 2])),
        Err(DtypeError::ArityMismatch {
            what: "axis permutation",
            expected: 2,
            found: 3
        })
    );
}

#[test]
fn fixedarray_rejects_negative_extent() {
    assert_eq!(
        make_fixedarray_dtype(&int32(), &[3, -4], None),
        Err(DtypeError::InvalidSize {
            what: "array extent",
            value: -4
        })
    );
}

#[test]
fn fixedarray_requires_fixed_size_element() {
    let s = ok(make_struct_dtype(&[int32()], &["x"]));
    assert!(matches!(
        make_fixedarray_dtype(&s, &[2], None),
        Err(DtypeError::NotFixedSize { .. })
    ));
}

#[test]
fn fixedarray_zero_extent_and_rank_zero() {
    let empty = ok(make_fixedarray_dtype(&int32(), &[0, 5], None));
    assert_eq!(empty.data_size(), Some(0));
    assert_eq!(empty.shape().as_slice(), &[0, 5]);

    let scalar = ok(make_fixedarray_dtype(&int32(), &[], None));
    assert_eq!(scalar, int32());
}

#[test]
fn fixedarray_of_array_merges_dims() {
    let inner = ok(make_fixedarray_dtype(&dtype_for::<Complex<f32>>(), &[4], None));
    let outer = ok(make_fixedarray_dtype(&inner, &[3], None));
    let direct = ok(make_fixedarray_dtype(
        &dtype_for::<Complex<f32>>(),
        &[3, 4],
        None,
    ));
    assert_eq!(outer, direct);
    assert_eq!(outer.element(), Some(&dtype_for::<Complex<f32>>()));
}

#[test]
fn permutation_validity() {
    assert!(is_valid_perm(&[]));
    assert!(is_valid_perm(&[0]));
    assert!(is_valid_perm(&[2, 0, 1]));
    assert!(!is_valid_perm(&[1]));
    assert!(!is_valid_perm(&[1, 1]));
    assert!(!is_valid_perm(&[0, 3, 1]));
}

// === Date and custom ===

#[test]
fn date_units_are_distinct() {
    let day = make_date_dtype(DateUnit::Day);
    let month = make_date_dtype(DateUnit::Month);
    assert_ne!(day, month);
    assert_eq!(day.unit(), Some(DateUnit::Day));
    assert_eq!(day.kind(), Ok(Kind::Datetime));
    assert_eq!(day.data_size(), Some(4));
}

#[test]
fn custom_alignment_must_divide_size() {
    assert!(matches!(
        make_custom_dtype("odd", Kind::Custom.raw(), 6, 4),
        Err(DtypeError::InvalidAlignment { .. })
    ));
    let rgb = ok(make_custom_dtype("rgb", Kind::Custom.raw(), 3, 1));
    assert!(rgb.flags().contains(DtypeFlags::HAS_CUSTOM));
}

// === Idempotence ===

#[test]
fn identical_arguments_build_equal_dtypes() {
    let a = ok(make_fixedstruct_dtype(&[int32(), float64()], &["a", "b"]));
    let b = ok(make_fixedstruct_dtype(&[int32(), float64()], &["a", "b"]));
    assert_eq!(a, b);
    assert!(!a.ptr_eq(&b));

    let x = ok(make_fixedarray_dtype(&a, &[5, 10], Some(&[0, 1])));
    let y = ok(make_fixedarray_dtype(&b, &[5, 10], Some(&[0, 1])));
    assert_eq!(x, y);
}

// === Size overflow ===

#[test]
fn fixedarray_extent_overflow_is_an_error() {
    assert_eq!(
        make_fixedarray_dtype(&int32(), &[i64::MAX], None),
        Err(DtypeError::SizeOverflow {
            what: "array extent",
            value: i64::MAX.to_string(),
        })
    );
    assert!(matches!(
        make_fixedarray_dtype(&int32(), &[1 << 40, 1 << 40], Some(&[0, 1])),
        Err(DtypeError::SizeOverflow { .. })
    ));

    let rows = ok(make_fixedarray_dtype(&int32(), &[1 << 40], None));
    assert!(matches!(
        make_fixedarray_dtype(&rows, &[1 << 40], None),
        Err(DtypeError::SizeOverflow { .. })
    ));
}

#[test]
fn zero_extent_never_overflows() {
    let a = ok(make_fixedarray_dtype(&int32(), &[0, i64::MAX], None));
    assert_eq!(a.data_size(), Some(0));
}

#[test]
fn fixedstring_size_overflow_is_an_error() {
    assert_eq!(
        make_fixedstring_dtype(StringEncoding::Utf32, i64::MAX),
        Err(DtypeError::SizeOverflow {
            what: "string size",
            value: i64::MAX.to_string(),
        })
    );
    let widest = ok(make_fixedstring_dtype(StringEncoding::Ascii, i64::MAX));
    assert_eq!(widest.data_size(), usize::try_from(i64::MAX).ok());
}

#[test]
fn fixedstruct_offset_overflow_is_an_error() {
    let half = ok(make_fixedbytes_dtype(1 << 62, 1));
    let err = make_fixedstruct_dtype(&[half.clone(), half.clone(), half], &["a", "b", "c"]);
    assert_eq!(
        err,
        Err(DtypeError::SizeOverflow {
            what: "fixedstruct field",
            value: "\"b\"".to_string(),
        })
    );
    assert_eq!(
        err.map_err(|e| e.to_string()),
        Err("fixedstruct field \"b\" makes the dtype size overflow".to_string())
    );
}
