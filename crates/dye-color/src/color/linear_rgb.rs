//! Linear RGB color type
//!
//! Linear RGB is the hub every perceptual space converts from: both CIELAB
//! (via XYZ) and OKLab (via LMS) start from linear light.

/// A color in linear RGB color space.
///
/// Values are linear light intensity, typically in the range 0.0..=1.0.
/// Construct from 8-bit sRGB with `LinearRgb::from(srgb)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f64,
    /// Green channel (linear light intensity)
    pub g: f64,
    /// Blue channel (linear light intensity)
    pub b: f64,
}

impl LinearRgb {
    /// Create a new LinearRgb color from linear RGB values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}
