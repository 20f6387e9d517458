//! Extraction of typed arguments from host values.
//!
//! Every extractor fails with [`MarshalError`] naming what it expected and the
//! host type it found. Sequences are lists or tuples.

use ndt_types::{AssignErrorMode, DateUnit, IndexSpec, StringEncoding};

use crate::{HostValue, MarshalError, Result};

/// Borrow text from a text or bytes value.
pub fn extract_string(value: &HostValue) -> Result<&str, MarshalError> {
    match value {
        HostValue::Text(s) => Ok(s.as_str()),
        HostValue::Bytes(b) => {
            std::str::from_utf8(b).map_err(|_| MarshalError::new("UTF-8 text", value.to_string()))
        }
        _ => Err(MarshalError::new("string", value.type_name())),
    }
}

/// Borrow the items of a list or tuple.
pub fn extract_sequence(value: &HostValue) -> Result<&[HostValue], MarshalError> {
    match value {
        HostValue::List(items) | HostValue::Tuple(items) => Ok(items.as_slice()),
        _ => Err(MarshalError::new("sequence", value.type_name())),
    }
}

pub fn extract_string_sequence(value: &HostValue) -> Result<Vec<String>, MarshalError> {
    extract_sequence(value)?
        .iter()
        .map(|item| extract_string(item).map(str::to_string))
        .collect()
}

pub fn extract_int_sequence(value: &HostValue) -> Result<Vec<i64>, MarshalError> {
    extract_sequence(value)?.iter().map(extract_index).collect()
}

/// Read an integer that fits in `i64`.
pub fn extract_index(value: &HostValue) -> Result<i64, MarshalError> {
    match value {
        HostValue::Int(n) => {
            i64::try_from(*n).map_err(|_| MarshalError::new("integer in int64 range", n.to_string()))
        }
        _ => Err(MarshalError::new("integer", value.type_name())),
    }
}

/// Read one index spec: an integer, a slice or an ellipsis.
pub fn extract_index_spec(value: &HostValue) -> Result<IndexSpec, MarshalError> {
    match value {
        HostValue::Int(_) => extract_index(value).map(IndexSpec::Index),
        HostValue::Ellipsis => Ok(IndexSpec::Full),
        HostValue::Slice(slice) => Ok(match (slice.start, slice.stop, slice.step) {
            (None, None, None) => IndexSpec::Full,
            (start, stop, step) => IndexSpec::stepped(start, stop, step.unwrap_or(1)),
        }),
        _ => Err(MarshalError::new("integer, slice or ellipsis", value.type_name())),
    }
}

/// Read a subscript: a tuple gives one spec per item, anything else one spec.
pub fn extract_subscript(value: &HostValue) -> Result<Vec<IndexSpec>, MarshalError> {
    match value {
        HostValue::Tuple(items) => items.iter().map(extract_index_spec).collect(),
        _ => Ok(vec![extract_index_spec(value)?]),
    }
}

/// Read a string encoding token.
pub fn extract_encoding(value: &HostValue) -> Result<StringEncoding> {
    let token = extract_string(value)?;
    Ok(StringEncoding::from_token(token)?)
}

/// Read a date unit token; `None` selects `default`.
pub fn extract_date_unit(value: &HostValue, default: DateUnit) -> Result<DateUnit> {
    match value {
        HostValue::None => Ok(default),
        HostValue::Text(token) => Ok(DateUnit::from_token(token)?),
        _ => Err(MarshalError::new("date unit", value.type_name()).into()),
    }
}

/// Read an assignment error mode token; `None` selects the default mode.
pub fn extract_error_mode(value: &HostValue) -> Result<AssignErrorMode> {
    match value {
        HostValue::None => Ok(AssignErrorMode::default()),
        HostValue::Text(token) => Ok(AssignErrorMode::from_token(token)?),
        _ => Err(MarshalError::new("error mode", value.type_name()).into()),
    }
}

#[cfg(test)]
mod tests;
