//! Enumerated dtype parameters and their token forms.
//!
//! Each parameter has a small, closed vocabulary. Token matching is exact:
//! case-sensitive and without trimming.

use std::fmt;

use crate::DtypeError;

/// Text storage scheme of a string dtype.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StringEncoding {
    Ascii,
    Ucs2,
    Utf8,
    Utf16,
    Utf32,
    /// Sentinel; never accepted by a builder.
    Invalid,
}

impl StringEncoding {
    /// Parse an encoding token.
    pub fn from_token(token: &str) -> Result<Self, DtypeError> {
        match token {
            "ascii" => Ok(Self::Ascii),
            "ucs_2" => Ok(Self::Ucs2),
            "utf_8" => Ok(Self::Utf8),
            "utf_16" => Ok(Self::Utf16),
            "utf_32" => Ok(Self::Utf32),
            _ => Err(DtypeError::InvalidEncoding {
                token: token.to_string(),
            }),
        }
    }

    /// Get the token for this encoding.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Ucs2 => "ucs_2",
            Self::Utf8 => "utf_8",
            Self::Utf16 => "utf_16",
            Self::Utf32 => "utf_32",
            Self::Invalid => "invalid",
        }
    }

    /// Bytes per code unit.
    pub const fn code_unit_size(self) -> usize {
        match self {
            Self::Ascii | Self::Utf8 | Self::Invalid => 1,
            Self::Ucs2 | Self::Utf16 => 2,
            Self::Utf32 => 4,
        }
    }

    /// Reject the `Invalid` sentinel.
    pub(crate) fn validated(self) -> Result<Self, DtypeError> {
        if self == Self::Invalid {
            return Err(DtypeError::InvalidEncoding {
                token: self.token().to_string(),
            });
        }
        Ok(self)
    }
}

impl fmt::Display for StringEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Granularity of a date dtype.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum DateUnit {
    #[default]
    Day,
    Month,
    Year,
}

impl DateUnit {
    /// Parse a unit token.
    pub fn from_token(token: &str) -> Result<Self, DtypeError> {
        match token {
            "day" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(DtypeError::InvalidUnit {
                token: token.to_string(),
            }),
        }
    }

    /// Get the token for this unit.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for DateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Error-checking policy of a conversion.
///
/// Carried by convert dtypes and passed through unchanged; the dtype system
/// does not perform the conversion itself.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum AssignErrorMode {
    /// No checking.
    None,
    /// Raise on overflow.
    Overflow,
    /// Raise on overflow or a lost fractional part.
    Fractional,
    /// Raise on any loss of precision.
    Inexact,
    /// Whatever the evaluation context uses.
    #[default]
    Default,
}

impl AssignErrorMode {
    /// Parse an error mode token.
    pub fn from_token(token: &str) -> Result<Self, DtypeError> {
        match token {
            "none" => Ok(Self::None),
            "overflow" => Ok(Self::Overflow),
            "fractional" => Ok(Self::Fractional),
            "inexact" => Ok(Self::Inexact),
            "default" => Ok(Self::Default),
            _ => Err(DtypeError::InvalidErrorMode {
                token: token.to_string(),
            }),
        }
    }

    /// Get the token for this mode.
    pub const fn token(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Overflow => "overflow",
            Self::Fractional => "fractional",
            Self::Inexact => "inexact",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for AssignErrorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
