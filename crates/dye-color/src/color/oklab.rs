//! Oklab, used by the `oklab` and `oklch-weighted` metrics
//!
//! Conversion follows Ottosson's published matrices (revision of
//! 2021-01-25): <https://bottosson.github.io/posts/oklab/>

use super::linear_rgb::LinearRgb;

/// Oklab coordinates. Euclidean distance here tracks perceived
/// difference far better than in sRGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    /// Perceived lightness, 0 for black up to 1 for white
    pub l: f64,
    /// Negative toward green, positive toward red
    pub a: f64,
    /// Negative toward blue, positive toward yellow
    pub b: f64,
}

impl Oklab {
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Squared Euclidean distance in Oklab space.
    #[inline]
    pub fn distance_squared(self, other: Oklab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }

    /// Euclidean distance in Oklab space.
    ///
    /// ```
    /// use dye_color::Oklab;
    ///
    /// let white = Oklab::new(1.0, 0.0, 0.0);
    /// let black = Oklab::new(0.0, 0.0, 0.0);
    /// assert!((white.distance(black) - 1.0).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn distance(self, other: Oklab) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Chroma magnitude `sqrt(a² + b²)`.
    #[inline]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }
}

impl From<LinearRgb> for Oklab {
    fn from(rgb: LinearRgb) -> Self {
        // linear sRGB -> LMS cone response
        let l = 0.4122214708 * rgb.r + 0.5363325363 * rgb.g + 0.0514459929 * rgb.b;
        let m = 0.2119034982 * rgb.r + 0.6806995451 * rgb.g + 0.1073969566 * rgb.b;
        let s = 0.0883024619 * rgb.r + 0.2817188376 * rgb.g + 0.6299787005 * rgb.b;

        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        Oklab {
            l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }
}
