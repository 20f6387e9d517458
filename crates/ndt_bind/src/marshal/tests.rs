use super::*;
use crate::{BindError, HostSlice};
use ndt_types::DtypeError;
use pretty_assertions::assert_eq;

// === Strings and sequences ===

#[test]
fn string_from_text_and_bytes() {
    assert_eq!(extract_string(&HostValue::text("int32")), Ok("int32"));
    assert_eq!(extract_string(&HostValue::Bytes(b"int8".to_vec())), Ok("int8"));
}

#[test]
fn string_rejects_other_types() {
    assert_eq!(
        extract_string(&HostValue::from(3)),
        Err(MarshalError {
            expected: "string",
            found: "int".to_string(),
        })
    );
}

#[test]
fn string_rejects_invalid_utf8_bytes() {
    let err = extract_string(&HostValue::Bytes(vec![0xff, 0xfe])).unwrap_err();
    assert_eq!(err.expected, "UTF-8 text");
    assert_eq!(err.found, "b'\\xff\\xfe'");
}

#[test]
fn sequences_accept_lists_and_tuples() {
    assert_eq!(
        extract_int_sequence(&HostValue::list([3, 4])),
        Ok(vec![3, 4])
    );
    assert_eq!(
        extract_string_sequence(&HostValue::tuple(["a", "b"])),
        Ok(vec!["a".to_string(), "b".to_string()])
    );
}

#[test]
fn sequences_reject_scalars() {
    let err = extract_sequence(&HostValue::text("ab")).unwrap_err();
    assert_eq!(err.to_string(), "expected sequence, got str");
}

#[test]
fn int_sequence_reports_bad_item() {
    let err = extract_int_sequence(&HostValue::list([HostValue::from(1), HostValue::from(1.5)]))
        .unwrap_err();
    assert_eq!(err.expected, "integer");
    assert_eq!(err.found, "float");
}

#[test]
fn index_outside_int64_is_rejected() {
    let big = HostValue::Int(i128::from(i64::MAX) + 1);
    let err = extract_index(&big).unwrap_err();
    assert_eq!(err.expected, "integer in int64 range");
    assert_eq!(err.found, "9223372036854775808");
}

// === Subscripts ===

#[test]
fn index_spec_from_each_shape() {
    assert_eq!(extract_index_spec(&HostValue::from(-1)), Ok(IndexSpec::Index(-1)));
    assert_eq!(extract_index_spec(&HostValue::Ellipsis), Ok(IndexSpec::Full));
    assert_eq!(
        extract_index_spec(&HostValue::from(HostSlice::default())),
        Ok(IndexSpec::Full)
    );
    assert_eq!(
        extract_index_spec(&HostValue::from(HostSlice {
            start: Some(1),
            stop: Some(4),
            step: None,
        })),
        Ok(IndexSpec::range(1, 4))
    );
    assert_eq!(
        extract_index_spec(&HostValue::from(HostSlice {
            start: None,
            stop: None,
            step: Some(-1),
        })),
        Ok(IndexSpec::stepped(None, None, -1))
    );
}

#[test]
fn index_spec_rejects_text() {
    let err = extract_index_spec(&HostValue::text("0")).unwrap_err();
    assert_eq!(err.expected, "integer, slice or ellipsis");
}

#[test]
fn subscript_tuple_gives_many_specs() {
    let subscript = HostValue::tuple([
        HostValue::from(2),
        HostValue::from(HostSlice {
            start: Some(0),
            stop: Some(5),
            step: None,
        }),
    ]);
    assert_eq!(
        extract_subscript(&subscript),
        Ok(vec![IndexSpec::Index(2), IndexSpec::range(0, 5)])
    );
}

#[test]
fn subscript_list_is_a_single_spec() {
    assert!(extract_subscript(&HostValue::list([1, 2])).is_err());
    assert_eq!(extract_subscript(&HostValue::from(3)), Ok(vec![IndexSpec::Index(3)]));
}

// === Tokens ===

#[test]
fn encoding_tokens() {
    assert_eq!(
        extract_encoding(&HostValue::text("utf_8")),
        Ok(StringEncoding::Utf8)
    );
    assert_eq!(
        extract_encoding(&HostValue::text("utf_9")),
        Err(BindError::Dtype(DtypeError::InvalidEncoding {
            token: "utf_9".to_string(),
        }))
    );
    assert!(matches!(
        extract_encoding(&HostValue::from(8)),
        Err(BindError::Marshal(_))
    ));
}

#[test]
fn encoding_tokens_accept_bytes() {
    assert_eq!(
        extract_encoding(&HostValue::Bytes(b"utf_16".to_vec())),
        Ok(StringEncoding::Utf16)
    );
    assert!(matches!(
        extract_encoding(&HostValue::Bytes(vec![0xff, 0xfe])),
        Err(BindError::Marshal(_))
    ));
}

#[test]
fn date_unit_defaults_on_none() {
    assert_eq!(
        extract_date_unit(&HostValue::None, DateUnit::Month),
        Ok(DateUnit::Month)
    );
    assert_eq!(
        extract_date_unit(&HostValue::text("year"), DateUnit::Day),
        Ok(DateUnit::Year)
    );
    let err = extract_date_unit(&HostValue::text("week"), DateUnit::Day).unwrap_err();
    assert!(err.to_string().contains("week"), "message was {err}");
}

#[test]
fn error_mode_defaults_on_none() {
    assert_eq!(
        extract_error_mode(&HostValue::None),
        Ok(AssignErrorMode::Default)
    );
    assert_eq!(
        extract_error_mode(&HostValue::text("overflow")),
        Ok(AssignErrorMode::Overflow)
    );
    assert!(extract_error_mode(&HostValue::text("loose")).is_err());
}
