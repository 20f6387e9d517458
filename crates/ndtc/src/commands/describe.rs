//! `show`, `kind` and `index`.

use std::fmt::Write;

use ndt_bind::DtypeRegistry;
use ndt_types::{kind_name, Dtype};

use super::CliError;

/// Multi-line summary of a dtype.
pub fn describe(dtype: &Dtype) -> Result<String, CliError> {
    let kind = kind_name(dtype)?;
    let size = dtype
        .data_size()
        .map_or_else(|| "variable".to_string(), |size| size.to_string());

    let mut out = String::new();
    let _ = writeln!(out, "{dtype}");
    let _ = writeln!(out, "  kind:      {kind}");
    let _ = writeln!(out, "  size:      {size}");
    let _ = writeln!(out, "  alignment: {}", dtype.alignment());
    if dtype.rank() > 0 {
        let _ = writeln!(out, "  shape:     {:?}", dtype.shape().as_slice());
        let _ = writeln!(out, "  strides:   {:?}", dtype.strides().as_slice());
    }
    Ok(out)
}

pub fn show_dtype(registry: &DtypeRegistry, text: &str) -> Result<String, CliError> {
    let dtype = registry.parse(text)?;
    describe(&dtype)
}

pub fn kind_of(registry: &DtypeRegistry, text: &str) -> Result<String, CliError> {
    let dtype = registry.parse(text)?;
    Ok(format!("{}\n", kind_name(&dtype)?))
}

pub fn index_dtype(
    registry: &DtypeRegistry,
    text: &str,
    subscript: &str,
) -> Result<String, CliError> {
    let dtype = registry.parse(text)?;
    let specs = ndt_parse::parse_subscript(subscript)?;
    describe(&dtype.at(&specs)?)
}
