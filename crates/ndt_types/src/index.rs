//! Dtype indexing.
//!
//! Indexing a dtype yields the dtype of the selected sub-element: scalar
//! indices drop an array axis or select a struct field, ranges keep the axis
//! with a new extent and stride. Specs are consumed left to right, first by
//! the leading fixed dims, then by the element.

use std::fmt;

use smallvec::SmallVec;

use crate::construct::c_layout;
use crate::{make_convert_dtype, Dtype, DtypeData, DtypeError, Field, FixedDim, Result};

/// One component of an index expression.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum IndexSpec {
    /// A single position; negative values count from the end.
    Index(i64),
    /// A strided range with host slice semantics (clamped bounds, negative steps).
    Range {
        start: Option<i64>,
        stop: Option<i64>,
        step: i64,
    },
    /// The whole axis (`:`).
    Full,
}

impl IndexSpec {
    pub fn index(i: i64) -> Self {
        IndexSpec::Index(i)
    }

    /// `start:stop` with step 1.
    pub fn range(start: i64, stop: i64) -> Self {
        IndexSpec::Range {
            start: Some(start),
            stop: Some(stop),
            step: 1,
        }
    }

    /// `start:stop:step`, either bound optional.
    pub fn stepped(start: Option<i64>, stop: Option<i64>, step: i64) -> Self {
        IndexSpec::Range { start, stop, step }
    }

    /// Check whether this spec removes the axis it applies to.
    pub fn is_scalar(self) -> bool {
        matches!(self, IndexSpec::Index(_))
    }
}

impl From<i64> for IndexSpec {
    fn from(i: i64) -> Self {
        IndexSpec::Index(i)
    }
}

impl From<std::ops::Range<i64>> for IndexSpec {
    fn from(r: std::ops::Range<i64>) -> Self {
        IndexSpec::range(r.start, r.end)
    }
}

impl From<std::ops::RangeFull> for IndexSpec {
    fn from(_: std::ops::RangeFull) -> Self {
        IndexSpec::Full
    }
}

impl fmt::Display for IndexSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexSpec::Index(i) => write!(f, "{i}"),
            IndexSpec::Full => f.write_str(":"),
            IndexSpec::Range { start, stop, step } => {
                if let Some(start) = start {
                    write!(f, "{start}")?;
                }
                f.write_str(":")?;
                if let Some(stop) = stop {
                    write!(f, "{stop}")?;
                }
                if *step != 1 {
                    write!(f, ":{step}")?;
                }
                Ok(())
            }
        }
    }
}

/// An index spec resolved against a concrete extent.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Resolved {
    /// A single in-bounds position.
    Position(usize),
    /// `count` positions starting at `start`, `step` apart.
    Span { start: i64, count: usize, step: i64 },
}

impl IndexSpec {
    fn resolve(self, axis: usize, extent: usize) -> Result<Resolved> {
        let n = i64::try_from(extent).unwrap_or(i64::MAX);
        match self {
            IndexSpec::Index(index) => {
                let pos = if index < 0 { index + n } else { index };
                if !(0..n).contains(&pos) {
                    return Err(DtypeError::IndexOutOfRange {
                        index,
                        axis,
                        extent,
                    });
                }
                Ok(Resolved::Position(usize::try_from(pos).unwrap_or(0)))
            }
            IndexSpec::Full => Ok(Resolved::Span {
                start: 0,
                count: extent,
                step: 1,
            }),
            IndexSpec::Range { start, stop, step } => {
                if step == 0 {
                    return Err(DtypeError::InvalidStep { axis });
                }
                let (lower, upper) = if step > 0 { (0, n) } else { (-1, n - 1) };
                let clamp = |bound: i64| {
                    if bound < 0 {
                        (bound + n).max(lower)
                    } else {
                        bound.min(upper)
                    }
                };
                let start = start.map_or(if step > 0 { lower } else { upper }, clamp);
                let stop = stop.map_or(if step > 0 { upper } else { lower }, clamp);
                // Clamped bounds lie in `-1..=n`, so only the step can be extreme.
                let distance = if step > 0 { stop - start } else { start - stop };
                let count = if distance > 0 {
                    (distance - 1).unsigned_abs() / step.unsigned_abs() + 1
                } else {
                    0
                };
                Ok(Resolved::Span {
                    start,
                    count: usize::try_from(count).unwrap_or(0),
                    step,
                })
            }
        }
    }
}

/// Why a recursive index step failed.
enum Failure {
    /// Specs remained when a dtype with no further axes was reached.
    Exhausted { consumed: usize },
    Error(DtypeError),
}

impl From<DtypeError> for Failure {
    fn from(err: DtypeError) -> Self {
        Failure::Error(err)
    }
}

impl Dtype {
    /// Get the dtype selected by an index expression.
    ///
    /// An empty expression selects the whole dtype.
    pub fn at(&self, specs: &[IndexSpec]) -> Result<Dtype> {
        tracing::trace!(dtype = %self, specs = specs.len(), "indexing dtype");
        apply(self, specs, 0).map_err(|failure| match failure {
            Failure::Exhausted { consumed } => DtypeError::TooManyIndices {
                dtype: self.to_string(),
                provided: specs.len(),
                rank: consumed,
            },
            Failure::Error(err) => err,
        })
    }

    /// Index with a single spec.
    pub fn at_one(&self, spec: impl Into<IndexSpec>) -> Result<Dtype> {
        self.at(&[spec.into()])
    }
}

fn apply(dtype: &Dtype, specs: &[IndexSpec], axis: usize) -> Result<Dtype, Failure> {
    let Some((&first, rest)) = specs.split_first() else {
        return Ok(dtype.clone());
    };

    match dtype.data() {
        DtypeData::FixedArray { element, dims } => {
            let used = specs.len().min(dims.len());
            let mut new_dims: SmallVec<[FixedDim; 4]> = SmallVec::with_capacity(dims.len());
            for (i, (spec, dim)) in specs.iter().zip(dims.iter()).enumerate() {
                match spec.resolve(axis + i, dim.extent)? {
                    Resolved::Position(_) => {}
                    Resolved::Span { count, step, .. } => new_dims.push(FixedDim {
                        extent: count,
                        stride: dim
                            .stride
                            .saturating_mul(isize::try_from(step).unwrap_or(isize::MAX)),
                    }),
                }
            }
            new_dims.extend(dims[used..].iter().copied());
            let element = apply(element, &specs[used..], axis + used)?;
            Ok(Dtype::fixed_array(element, new_dims))
        }
        DtypeData::Struct { fields } | DtypeData::FixedStruct { fields, .. } => {
            let fixed = matches!(dtype.data(), DtypeData::FixedStruct { .. });
            match first.resolve(axis, fields.len())? {
                Resolved::Position(pos) => apply(&fields[pos].dtype, rest, axis + 1),
                Resolved::Span { start, count, step } => {
                    let selected = (0..count)
                        .map(|k| {
                            let pos = start + step * i64::try_from(k).unwrap_or(0);
                            let field = &fields[usize::try_from(pos).unwrap_or(0)];
                            let dtype = apply(&field.dtype, rest, axis + 1)?;
                            Ok(Field::new(field.name.clone(), dtype))
                        })
                        .collect::<Result<Vec<Field>, Failure>>()?;
                    if fixed {
                        let offsets = c_layout(&selected)?;
                        Ok(Dtype::new(DtypeData::FixedStruct {
                            fields: selected,
                            offsets,
                        }))
                    } else {
                        Ok(Dtype::new(DtypeData::Struct { fields: selected }))
                    }
                }
            }
        }
        DtypeData::Pointer { target } => Ok(Dtype::new(DtypeData::Pointer {
            target: apply(target, specs, axis)?,
        })),
        DtypeData::Convert {
            value,
            operand,
            mode,
        } => {
            let value = apply(value, specs, axis)?;
            let operand = apply(operand, specs, axis)?;
            Ok(make_convert_dtype(&value, &operand, *mode))
        }
        _ => Err(Failure::Exhausted { consumed: axis }),
    }
}
