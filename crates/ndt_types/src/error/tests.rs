use super::*;

#[test]
fn messages_embed_offending_token() {
    let err = DtypeError::InvalidEncoding {
        token: "utf_9".to_string(),
    };
    assert!(err.to_string().contains("\"utf_9\""));

    let err = DtypeError::InvalidUnit {
        token: "week".to_string(),
    };
    assert!(err.to_string().contains("\"week\""));
}

#[test]
fn unexpected_kind_is_not_recoverable() {
    let err = DtypeError::UnexpectedKind {
        dtype: "blob".to_string(),
        code: 200,
    };
    assert_eq!(err.class(), ErrorClass::Internal);
    assert!(!err.is_recoverable());
    assert_eq!(err.to_string(), "dtype `blob` has unexpected kind value 200");
}

#[test]
fn classes_follow_taxonomy() {
    let arity = DtypeError::ArityMismatch {
        what: "field names",
        expected: 1,
        found: 2,
    };
    assert_eq!(arity.class(), ErrorClass::MalformedArguments);
    assert!(arity.is_recoverable());

    let dup = DtypeError::DuplicateFieldName {
        name: "a".to_string(),
    };
    assert_eq!(dup.class(), ErrorClass::MalformedArguments);

    let oob = DtypeError::IndexOutOfRange {
        index: 10,
        axis: 0,
        extent: 5,
    };
    assert_eq!(oob.class(), ErrorClass::BadIndex);
    assert_eq!(
        oob.to_string(),
        "index 10 is out of bounds for axis 0 with extent 5"
    );
}
