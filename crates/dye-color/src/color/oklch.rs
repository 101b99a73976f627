//! Oklch: Oklab in cylindrical coordinates
//!
//! Lightness is unchanged, `(a, b)` becomes chroma (radius) and hue (angle,
//! radians). Splitting chroma from hue lets callers weight the three
//! attributes independently when ranking dyes.

use super::oklab::Oklab;

/// Lightness, chroma and hue of an Oklab color.
///
/// Greys have no meaningful hue; `h` comes out as whatever `atan2` gives.
/// The hue term of [`Oklch::weighted_distance`] is scaled by chroma, so an
/// arbitrary hue on a grey never contributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f64,
    /// Distance from the grey axis
    pub c: f64,
    /// Radians, `(-π, π]`
    pub h: f64,
}

impl Oklch {
    /// Weighted perceptual distance with independent L/C/H gains.
    ///
    /// `sqrt((kl·ΔL)² + (kc·ΔC)² + (kh·ΔH)²)` where
    /// `ΔH = 2·sqrt(C1·C2)·sin(Δh/2)` is the hue difference expressed as
    /// a chord length, so that with unit weights this equals Euclidean
    /// Oklab distance.
    ///
    /// ```
    /// use dye_color::{Oklab, Oklch};
    ///
    /// let a = Oklab::new(0.6, 0.1, 0.05);
    /// let b = Oklab::new(0.4, -0.05, 0.1);
    /// let d = Oklch::from(a).weighted_distance(Oklch::from(b), 1.0, 1.0, 1.0);
    /// assert!((d - a.distance(b)).abs() < 1e-9);
    /// ```
    #[inline]
    pub fn weighted_distance(self, other: Oklch, kl: f64, kc: f64, kh: f64) -> f64 {
        let dl = self.l - other.l;
        let dc = self.c - other.c;
        let dh = 2.0 * (self.c * other.c).sqrt() * ((other.h - self.h) / 2.0).sin();
        let (wl, wc, wh) = (kl * dl, kc * dc, kh * dh);
        (wl * wl + wc * wc + wh * wh).sqrt()
    }
}

impl From<Oklab> for Oklch {
    fn from(lab: Oklab) -> Self {
        Self {
            l: lab.l,
            c: lab.chroma(),
            h: lab.b.atan2(lab.a),
        }
    }
}

impl From<Oklch> for Oklab {
    fn from(lch: Oklch) -> Self {
        let (sin, cos) = lch.h.sin_cos();
        Self::new(lch.l, lch.c * cos, lch.c * sin)
    }
}
