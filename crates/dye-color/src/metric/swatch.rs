//! Precomputed multi-space color sample.

use std::str::FromStr;

use crate::color::{Lab, LinearRgb, Oklab, Oklch, Srgb};
use crate::error::ParseColorError;

/// A color with every representation a distance metric may need.
///
/// All conversions happen once, at construction. Catalog entries build their
/// swatch at load time so that per-query scoring is conversion-free; query
/// targets build one per call.
///
/// # Example
///
/// ```
/// use dye_color::{DistanceMetric, Swatch};
///
/// let red: Swatch = "#FF0000".parse().unwrap();
/// let near_red: Swatch = "#FE0000".parse().unwrap();
/// assert_eq!(DistanceMetric::Rgb.distance(&red, &near_red), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    srgb: Srgb,
    lab: Lab,
    oklab: Oklab,
    oklch: Oklch,
}

impl Swatch {
    /// Build a swatch, precomputing CIELAB, Oklab and Oklch.
    pub fn new(srgb: Srgb) -> Self {
        let linear = LinearRgb::from(srgb);
        let oklab = Oklab::from(linear);
        Self {
            srgb,
            lab: Lab::from(linear),
            oklab,
            oklch: Oklch::from(oklab),
        }
    }

    /// The 8-bit sRGB color.
    #[inline]
    pub fn srgb(&self) -> Srgb {
        self.srgb
    }

    /// CIELAB (D65) coordinates.
    #[inline]
    pub fn lab(&self) -> Lab {
        self.lab
    }

    /// Oklab coordinates.
    #[inline]
    pub fn oklab(&self) -> Oklab {
        self.oklab
    }

    /// Oklch coordinates.
    #[inline]
    pub fn oklch(&self) -> Oklch {
        self.oklch
    }
}

impl From<Srgb> for Swatch {
    fn from(srgb: Srgb) -> Self {
        Swatch::new(srgb)
    }
}

impl FromStr for Swatch {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Srgb>().map(Swatch::new)
    }
}
