//! Distance metric dispatch.

use std::fmt;
use std::str::FromStr;

use super::swatch::Swatch;
use crate::error::ParseMetricError;

/// Per-attribute gains for [`DistanceMetric::OklchWeighted`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OklchWeights {
    /// Lightness gain
    pub l: f64,
    /// Chroma gain
    pub c: f64,
    /// Hue gain
    pub h: f64,
}

impl OklchWeights {
    /// Create weights from lightness, chroma and hue gains.
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }
}

impl Default for OklchWeights {
    /// Unit weights: the metric degenerates to Euclidean Oklab distance.
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// Distance metric for matching a color against catalog entries.
///
/// Every metric satisfies `distance(a, b) >= 0` and `distance(x, x) == 0`.
/// `Rgb`, `Cie76`, `Oklab` and `HyAB` are exactly symmetric; `Ciede2000`
/// and `OklchWeighted` are symmetric up to floating point rounding.
///
/// Only [`DistanceMetric::Rgb`] agrees with the geometry of an RGB spatial
/// index; see [`DistanceMetric::is_rgb_euclidean`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DistanceMetric {
    /// Euclidean distance over raw 0..=255 sRGB channels.
    #[default]
    Rgb,
    /// CIE76: Euclidean distance in CIELAB.
    Cie76,
    /// CIEDE2000 (ΔE00).
    Ciede2000,
    /// Euclidean distance in Oklab.
    Oklab,
    /// HyAB hybrid distance in CIELAB: `|ΔL| + sqrt(Δa² + Δb²)`.
    HyAB,
    /// Oklch distance with custom lightness/chroma/hue gains.
    OklchWeighted(OklchWeights),
}

impl DistanceMetric {
    /// Compute the distance between two swatches.
    #[inline]
    pub fn distance(&self, a: &Swatch, b: &Swatch) -> f64 {
        match *self {
            DistanceMetric::Rgb => a.srgb().distance(b.srgb()),
            DistanceMetric::Cie76 => a.lab().cie76(b.lab()),
            DistanceMetric::Ciede2000 => a.lab().ciede2000(b.lab()),
            DistanceMetric::Oklab => a.oklab().distance(b.oklab()),
            DistanceMetric::HyAB => a.lab().hyab(b.lab()),
            DistanceMetric::OklchWeighted(w) => a.oklch().weighted_distance(b.oklch(), w.l, w.c, w.h),
        }
    }

    /// True when this metric is plain Euclidean distance in RGB, i.e. when
    /// an RGB k-d tree answers it exactly without re-ranking.
    #[inline]
    pub fn is_rgb_euclidean(&self) -> bool {
        matches!(self, DistanceMetric::Rgb)
    }

    /// The metric's string key.
    pub fn key(&self) -> &'static str {
        match self {
            DistanceMetric::Rgb => "rgb",
            DistanceMetric::Cie76 => "cie76",
            DistanceMetric::Ciede2000 => "ciede2000",
            DistanceMetric::Oklab => "oklab",
            DistanceMetric::HyAB => "hyab",
            DistanceMetric::OklchWeighted(_) => "oklch-weighted",
        }
    }

    /// Parse a metric key, using `weights` when the key is `oklch-weighted`.
    pub fn from_key(key: &str, weights: OklchWeights) -> Result<Self, ParseMetricError> {
        match key.trim().to_ascii_lowercase().as_str() {
            "rgb" => Ok(DistanceMetric::Rgb),
            "cie76" => Ok(DistanceMetric::Cie76),
            "ciede2000" => Ok(DistanceMetric::Ciede2000),
            "oklab" => Ok(DistanceMetric::Oklab),
            "hyab" => Ok(DistanceMetric::HyAB),
            "oklch-weighted" => Ok(DistanceMetric::OklchWeighted(weights)),
            _ => Err(ParseMetricError {
                key: key.to_string(),
            }),
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = ParseMetricError;

    /// Parse a metric key; `oklch-weighted` gets unit weights.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DistanceMetric::from_key(s, OklchWeights::default())
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
