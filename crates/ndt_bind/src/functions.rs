//! Binding entry points.
//!
//! These are the operations a host module exposes: converting host objects
//! into dtypes, deducing dtypes from values and calling the builders with
//! host-typed arguments.

use ndt_types::{
    kind_name, make_convert_dtype, make_date_dtype, make_fixedarray_dtype, make_fixedstring_dtype,
    make_fixedstruct_dtype, make_pointer_dtype, make_string_dtype, make_struct_dtype, Dtype,
};

use crate::marshal::{
    extract_date_unit, extract_encoding, extract_error_mode, extract_index, extract_int_sequence,
    extract_sequence, extract_string, extract_string_sequence, extract_subscript,
};
use crate::{unbox_dtype, BindError, DtypeRegistry, HostType, HostValue, Result};

impl DtypeRegistry {
    /// Convert a host object that names a dtype.
    ///
    /// Accepts dtype handles, notation strings, type objects and foreign
    /// descriptors.
    pub fn dtype_from_object(&self, value: &HostValue) -> Result<Dtype> {
        match value {
            HostValue::Handle(_) => unbox_dtype(value).ok_or_else(|| conversion(value)),
            HostValue::Text(_) | HostValue::Bytes(_) => self.parse(extract_string(value)?),
            HostValue::Type(ty) => self.dtype_from_type_descriptor(ty),
            HostValue::Foreign(descriptor) => self
                .interops()
                .iter()
                .find_map(|interop| interop.dtype_from_descriptor(descriptor))
                .ok_or_else(|| conversion(value)),
            _ => Err(conversion(value)),
        }
    }

    /// Deduce the dtype of a host value.
    ///
    /// Recognizers are tried in order; the first that claims the value wins.
    pub fn deduce_dtype(&self, value: &HostValue) -> Result<Dtype> {
        let cx = self.context();
        for recognizer in self.recognizers() {
            if let Some(result) = recognizer.recognize(value, &cx) {
                tracing::trace!(recognizer = recognizer.name(), %value, "deduced dtype");
                return result;
            }
        }
        Err(BindError::Deduction {
            value: value.to_string(),
            type_name: value.type_name(),
        })
    }

    /// Map a host type object to the dtype its values deduce to.
    pub fn dtype_from_type_descriptor(&self, ty: &HostType) -> Result<Dtype> {
        let mapped = match ty {
            HostType::Bool => Some(ndt_types::dtype_for::<bool>()),
            HostType::Int => Some(ndt_types::dtype_for::<i32>()),
            HostType::Float => Some(ndt_types::dtype_for::<f64>()),
            HostType::Complex => Some(ndt_types::dtype_for::<num_complex::Complex<f64>>()),
            HostType::Date => Some(make_date_dtype(ndt_types::DateUnit::Day)),
            HostType::Foreign(name) => self
                .interops()
                .iter()
                .find_map(|interop| interop.dtype_from_scalar_type(name)),
            HostType::Layout(descriptor) => self
                .interops()
                .iter()
                .find_map(|interop| interop.dtype_from_descriptor(descriptor)),
            HostType::NoneType
            | HostType::Bytes
            | HostType::Text
            | HostType::List
            | HostType::Tuple => None,
        };
        mapped.ok_or_else(|| BindError::Conversion {
            value: HostValue::Type(ty.clone()).to_string(),
        })
    }

    /// Kind name of the dtype a host object names.
    pub fn kind_of(&self, value: &HostValue) -> Result<&'static str> {
        let dtype = self.dtype_from_object(value)?;
        Ok(kind_name(&dtype)?)
    }

    /// Convert each item of a list or tuple with [`Self::dtype_from_object`].
    pub fn extract_dtype_sequence(&self, value: &HostValue) -> Result<Vec<Dtype>> {
        extract_sequence(value)?
            .iter()
            .map(|item| self.dtype_from_object(item))
            .collect()
    }

    pub fn make_convert(&self, to: &Dtype, from: &Dtype, mode: &HostValue) -> Result<Dtype> {
        Ok(make_convert_dtype(to, from, extract_error_mode(mode)?))
    }

    pub fn make_fixedstring(&self, encoding: &HostValue, size: i64) -> Result<Dtype> {
        Ok(make_fixedstring_dtype(extract_encoding(encoding)?, size)?)
    }

    pub fn make_string(&self, encoding: &HostValue) -> Result<Dtype> {
        Ok(make_string_dtype(extract_encoding(encoding)?)?)
    }

    pub fn make_pointer(&self, target: &Dtype) -> Dtype {
        make_pointer_dtype(target)
    }

    /// Build a struct from a sequence of dtype-like objects and a sequence
    /// of names.
    pub fn make_struct(&self, field_types: &HostValue, field_names: &HostValue) -> Result<Dtype> {
        let types = self.extract_dtype_sequence(field_types)?;
        let names = extract_string_sequence(field_names)?;
        Ok(make_struct_dtype(&types, &names)?)
    }

    pub fn make_fixedstruct(
        &self,
        field_types: &HostValue,
        field_names: &HostValue,
    ) -> Result<Dtype> {
        let types = self.extract_dtype_sequence(field_types)?;
        let names = extract_string_sequence(field_names)?;
        Ok(make_fixedstruct_dtype(&types, &names)?)
    }

    /// Build a fixed array.
    ///
    /// `shape` is an integer or a sequence of integers. `axis_perm` is `None`
    /// for C order or a sequence of axis numbers, fastest first.
    pub fn make_fixedarray(
        &self,
        element: &Dtype,
        shape: &HostValue,
        axis_perm: &HostValue,
    ) -> Result<Dtype> {
        let shape = match shape {
            HostValue::Int(_) => vec![extract_index(shape)?],
            _ => extract_int_sequence(shape)?,
        };
        let perm = match axis_perm {
            HostValue::None => None,
            _ => Some(extract_int_sequence(axis_perm)?),
        };
        Ok(make_fixedarray_dtype(element, &shape, perm.as_deref())?)
    }

    /// Build a date; `None` selects the configured default unit.
    pub fn make_date(&self, unit: &HostValue) -> Result<Dtype> {
        let unit = extract_date_unit(unit, self.config().default_date_unit)?;
        Ok(make_date_dtype(unit))
    }

    /// Index a dtype with a host subscript.
    ///
    /// A tuple indexes several axes; any other value indexes the first.
    pub fn getitem(&self, dtype: &Dtype, subscript: &HostValue) -> Result<Dtype> {
        let specs = extract_subscript(subscript)?;
        Ok(dtype.at(&specs)?)
    }
}

fn conversion(value: &HostValue) -> BindError {
    BindError::Conversion {
        value: value.to_string(),
    }
}
