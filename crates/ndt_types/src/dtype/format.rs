//! Dtype formatting.
//!
//! Prints the textual dtype notation accepted by `ndt_parse`. C-order fixed
//! arrays print as leading extents (`3, 4, int32`); other stride patterns use
//! a display-only `fixedarray(..)` form.

use std::fmt;

use super::{Dtype, DtypeData, Field};
use crate::{AssignErrorMode, DateUnit, StringEncoding};

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data() {
            DtypeData::Scalar(id) => f.write_str(id.name()),
            DtypeData::FixedString { encoding, length } => {
                write!(f, "string({length}, '{encoding}')")
            }
            DtypeData::String { encoding } => {
                if *encoding == StringEncoding::Utf8 {
                    f.write_str("string")
                } else {
                    write!(f, "string('{encoding}')")
                }
            }
            DtypeData::FixedBytes { size, alignment } => {
                if *alignment == 1 {
                    write!(f, "bytes({size})")
                } else {
                    write!(f, "bytes({size}, align={alignment})")
                }
            }
            DtypeData::Bytes => f.write_str("bytes"),
            DtypeData::Pointer { target } => write!(f, "pointer({target})"),
            DtypeData::Convert {
                value,
                operand,
                mode,
            } => {
                if *mode == AssignErrorMode::Default {
                    write!(f, "convert({value}, {operand})")
                } else {
                    write!(f, "convert({value}, {operand}, '{mode}')")
                }
            }
            DtypeData::Struct { fields } => write_fields(f, "", fields),
            DtypeData::FixedStruct { fields, .. } => write_fields(f, "fixedstruct", fields),
            DtypeData::FixedArray { element, dims } => {
                if self.is_c_contiguous() {
                    for dim in dims {
                        write!(f, "{}, ", dim.extent)?;
                    }
                    write!(f, "{element}")
                } else {
                    f.write_str("fixedarray(shape=[")?;
                    write_list(f, dims.iter().map(|d| d.extent))?;
                    f.write_str("], strides=[")?;
                    write_list(f, dims.iter().map(|d| d.stride))?;
                    write!(f, "], {element})")
                }
            }
            DtypeData::Date { unit } => {
                if *unit == DateUnit::Day {
                    f.write_str("date")
                } else {
                    write!(f, "date('{unit}')")
                }
            }
            DtypeData::Custom { name, .. } => f.write_str(name),
        }
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, keyword: &str, fields: &[Field]) -> fmt::Result {
    f.write_str(keyword)?;
    f.write_str("{")?;
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str("; ")?;
        }
        write!(f, "{}: {}", field.name, field.dtype)?;
    }
    f.write_str("}")
}

fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
