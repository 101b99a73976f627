//! Error types for color and metric parsing

use std::fmt;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// Wrong number of hex digits after stripping '#' (must be 3 or 6)
    InvalidLength(usize),
    /// A character that is not a hexadecimal digit
    InvalidCharacter(char),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength(len) => {
                write!(
                    f,
                    "invalid hex color length {} (expected 3 or 6 digits)",
                    len
                )
            }
            ParseColorError::InvalidCharacter(c) => {
                write!(f, "invalid hex character: {:?}", c)
            }
        }
    }
}

impl std::error::Error for ParseColorError {}

/// Error type for parsing distance metric keys such as `"ciede2000"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMetricError {
    /// The key that did not match any metric
    pub key: String,
}

impl fmt::Display for ParseMetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown distance metric {:?} (expected one of rgb, cie76, ciede2000, oklab, hyab, oklch-weighted)",
            self.key
        )
    }
}

impl std::error::Error for ParseMetricError {}
