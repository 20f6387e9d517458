//! Property-based tests for dtype construction and indexing.
//!
//! Generates random shapes, permutations and index expressions and checks:
//! 1. Layout: any valid permutation covers exactly `product(shape)` elements
//! 2. Idempotence: identical builder arguments give equal dtypes
//! 3. Indexing: ranges agree with a brute-force position count
//! 4. Overflow: oversized layouts are rejected with an error

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    reason = "Proptest macros generate code with these patterns"
)]

use ndt_types::{
    dtype_for, is_valid_perm, make_fixedarray_dtype, make_fixedbytes_dtype,
    make_fixedstring_dtype, make_fixedstruct_dtype, Dtype, DtypeError, IndexSpec, StringEncoding,
};
use proptest::prelude::*;

// -- Strategies --

fn shape_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..6, 0..5)
}

/// A shape paired with a random permutation of its axes.
fn shape_and_perm_strategy() -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
    shape_strategy().prop_flat_map(|shape| {
        let axes: Vec<i64> = (0..shape.len() as i64).collect();
        (Just(shape), Just(axes).prop_shuffle())
    })
}

fn element_strategy() -> impl Strategy<Value = Dtype> {
    prop_oneof![
        Just(dtype_for::<i8>()),
        Just(dtype_for::<i16>()),
        Just(dtype_for::<f32>()),
        Just(dtype_for::<f64>()),
        Just(dtype_for::<num_complex::Complex<f64>>()),
    ]
}

fn bound_strategy() -> impl Strategy<Value = Option<i64>> {
    prop::option::of(prop_oneof![
        8 => -12i64..12,
        1 => Just(i64::MIN),
        1 => Just(i64::MAX),
    ])
}

fn range_strategy() -> impl Strategy<Value = (Option<i64>, Option<i64>, i64)> {
    (
        bound_strategy(),
        bound_strategy(),
        prop_oneof![
            4 => -4i64..0,
            4 => 1i64..5,
            1 => Just(i64::MIN),
            1 => Just(i64::MAX),
        ],
    )
}

fn encoding_strategy() -> impl Strategy<Value = StringEncoding> {
    prop_oneof![
        Just(StringEncoding::Ascii),
        Just(StringEncoding::Ucs2),
        Just(StringEncoding::Utf8),
        Just(StringEncoding::Utf16),
        Just(StringEncoding::Utf32),
    ]
}

/// Count positions in `0..n` visited by a clamped strided slice, by walking.
fn brute_force_count(n: i64, start: Option<i64>, stop: Option<i64>, step: i64) -> usize {
    let norm = |v: i64| if v < 0 { v + n } else { v };
    let (start, stop) = if step > 0 {
        (
            start.map_or(0, |s| norm(s).clamp(0, n)),
            stop.map_or(n, |s| norm(s).clamp(0, n)),
        )
    } else {
        (
            start.map_or(n - 1, |s| norm(s).clamp(-1, n - 1)),
            stop.map_or(-1, |s| norm(s).clamp(-1, n - 1)),
        )
    };
    let mut count = 0;
    let mut pos = start;
    while (step > 0 && pos < stop) || (step < 0 && pos > stop) {
        count += 1;
        let Some(next) = pos.checked_add(step) else {
            break;
        };
        pos = next;
    }
    count
}

// -- Properties --

proptest! {
    #[test]
    fn permuted_layout_covers_all_elements(
        (shape, perm) in shape_and_perm_strategy(),
        element in element_strategy(),
    ) {
        prop_assert!(is_valid_perm(&perm));
        let a = make_fixedarray_dtype(&element, &shape, Some(&perm)).unwrap();
        let count: i64 = shape.iter().product();
        let elem_size = element.data_size().unwrap() as i64;
        prop_assert_eq!(a.data_size().unwrap() as i64, count * elem_size);
        prop_assert_eq!(a.rank(), shape.len());
    }

    #[test]
    fn c_order_matches_default(shape in shape_strategy(), element in element_strategy()) {
        let c_perm: Vec<i64> = (0..shape.len() as i64).rev().collect();
        let explicit = make_fixedarray_dtype(&element, &shape, Some(&c_perm)).unwrap();
        let implicit = make_fixedarray_dtype(&element, &shape, None).unwrap();
        prop_assert_eq!(explicit, implicit);
    }

    #[test]
    fn builders_are_idempotent(
        (shape, perm) in shape_and_perm_strategy(),
        fields in prop::collection::vec(element_strategy(), 0..6),
    ) {
        let names: Vec<String> = (0..fields.len()).map(|i| format!("f{i}")).collect();
        let s1 = make_fixedstruct_dtype(&fields, &names).unwrap();
        let s2 = make_fixedstruct_dtype(&fields, &names).unwrap();
        prop_assert_eq!(&s1, &s2);

        let a1 = make_fixedarray_dtype(&s1, &shape, Some(&perm)).unwrap();
        let a2 = make_fixedarray_dtype(&s2, &shape, Some(&perm)).unwrap();
        prop_assert_eq!(a1, a2);
    }

    #[test]
    fn full_slices_preserve_dtype(shape in shape_strategy(), element in element_strategy()) {
        let a = make_fixedarray_dtype(&element, &shape, None).unwrap();
        let specs = vec![IndexSpec::Full; shape.len()];
        prop_assert_eq!(a.at(&specs).unwrap(), a);
    }

    #[test]
    fn range_extent_matches_walk(
        extent in 0i64..10,
        (start, stop, step) in range_strategy(),
    ) {
        let a = make_fixedarray_dtype(&dtype_for::<i32>(), &[extent], None).unwrap();
        let sub = a.at_one(IndexSpec::stepped(start, stop, step)).unwrap();
        let expected = brute_force_count(extent, start, stop, step);
        let sub_shape = sub.shape();
        prop_assert_eq!(sub_shape.as_slice(), &[expected]);
        let sub_strides = sub.strides();
        prop_assert_eq!(sub_strides.as_slice(), &[4isize.saturating_mul(step as isize)]);
    }

    #[test]
    fn huge_extents_are_rejected(
        extent in (i64::MAX / 2 + 1)..=i64::MAX,
        leading in prop::collection::vec(1i64..4, 0..3),
        element in element_strategy(),
    ) {
        let mut shape = leading;
        shape.extend([extent, 2]);
        let result = make_fixedarray_dtype(&element, &shape, None);
        prop_assert!(matches!(result, Err(DtypeError::SizeOverflow { .. })), "{:?}", result);
    }

    #[test]
    fn huge_fixed_sizes_are_rejected(
        length in (i64::MAX / 2 + 1)..=i64::MAX,
        encoding in encoding_strategy(),
    ) {
        // Code units wider than one byte push the size past `isize::MAX`.
        let string = make_fixedstring_dtype(encoding, length);
        let wide = matches!(
            encoding,
            StringEncoding::Ucs2 | StringEncoding::Utf16 | StringEncoding::Utf32
        );
        prop_assert_eq!(
            matches!(string, Err(DtypeError::SizeOverflow { .. })),
            wide,
            "{:?}",
            string
        );

        let bytes = make_fixedbytes_dtype(length, 1).unwrap();
        let pair = make_fixedstruct_dtype(&[bytes.clone(), bytes], &["a", "b"]);
        prop_assert!(matches!(pair, Err(DtypeError::SizeOverflow { .. })), "{:?}", pair);
    }

    #[test]
    fn scalar_index_drops_one_axis(
        shape in prop::collection::vec(1i64..6, 1..5),
        raw_index in any::<i64>(),
    ) {
        let a = make_fixedarray_dtype(&dtype_for::<f64>(), &shape, None).unwrap();
        let index = raw_index.rem_euclid(shape[0]);
        let sub = a.at_one(index).unwrap();
        if shape.len() == 1 {
            prop_assert_eq!(sub, dtype_for::<f64>());
        } else {
            prop_assert_eq!(sub.rank(), shape.len() - 1);
            let sub_shape = sub.shape();
            prop_assert_eq!(sub_shape.as_slice(), &a.shape()[1..]);
        }
    }

    #[test]
    fn out_of_range_reports_input(
        extent in 0i64..8,
        offset in 0i64..100,
        negative in any::<bool>(),
    ) {
        let a = make_fixedarray_dtype(&dtype_for::<u8>(), &[extent], None).unwrap();
        let index = if negative { -extent - 1 - offset } else { extent + offset };
        let err = a.at_one(index).unwrap_err();
        prop_assert_eq!(
            err,
            DtypeError::IndexOutOfRange { index, axis: 0, extent: extent as usize }
        );
    }
}
