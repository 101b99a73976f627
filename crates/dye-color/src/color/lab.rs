//! CIELAB color space and CIE color-difference formulas
//!
//! Conversion goes linear RGB -> XYZ (sRGB primaries) -> L*a*b* under the
//! D65 reference white. CIEDE2000 follows CIE Technical Report 142-2001
//! with the graphic-arts parametric factors kL = kC = kH = 1.

use std::f64::consts::PI;

use super::linear_rgb::LinearRgb;

// D65 reference white point
const D65_XN: f64 = 0.95047;
const D65_YN: f64 = 1.00000;
const D65_ZN: f64 = 1.08883;

/// 25^7, the chroma normalizer used by the G and RC terms.
const POW25_7: f64 = 6_103_515_625.0;

/// A color in CIELAB (D65).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness (0-100)
    pub l: f64,
    /// Green-red axis (roughly -128..128)
    pub a: f64,
    /// Blue-yellow axis (roughly -128..128)
    pub b: f64,
}

impl Lab {
    /// Mid grey with no chroma. Stands in for entries that carry no color data.
    pub const NEUTRAL_GRAY: Lab = Lab::new(50.0, 0.0, 0.0);

    /// Create a new Lab color
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// CIE76 color difference: Euclidean distance in L*a*b*.
    #[inline]
    pub fn cie76(self, other: Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }

    /// HyAB hybrid distance (Abasi et al., 2020).
    ///
    /// City-block lightness plus Euclidean chrominance:
    /// `|ΔL| + sqrt(Δa² + Δb²)`. Better behaved than CIE76 for large
    /// differences.
    #[inline]
    pub fn hyab(self, other: Lab) -> f64 {
        let dl = (self.l - other.l).abs();
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl + da.hypot(db)
    }

    /// CIEDE2000 color difference (ΔE00).
    ///
    /// ```
    /// use dye_color::Lab;
    ///
    /// // Reference pair 1 from Sharma, Wu & Dalal (2005)
    /// let a = Lab::new(50.0, 2.6772, -79.7751);
    /// let b = Lab::new(50.0, 0.0, -82.7485);
    /// assert!((a.ciede2000(b) - 2.0425).abs() < 1e-4);
    /// ```
    pub fn ciede2000(self, other: Lab) -> f64 {
        const KL: f64 = 1.0;
        const KC: f64 = 1.0;
        const KH: f64 = 1.0;

        let (l1, a1, b1) = (self.l, self.a, self.b);
        let (l2, a2, b2) = (other.l, other.a, other.b);

        let c_ab_mean = (a1.hypot(b1) + a2.hypot(b2)) / 2.0;
        let c_ab_mean_pow7 = c_ab_mean.powi(7);
        let g = 0.5 * (1.0 - (c_ab_mean_pow7 / (c_ab_mean_pow7 + POW25_7)).sqrt());

        let a1_prime = a1 * (1.0 + g);
        let a2_prime = a2 * (1.0 + g);
        let c1_prime = a1_prime.hypot(b1);
        let c2_prime = a2_prime.hypot(b2);
        let h1_prime = hue_degrees(a1_prime, b1);
        let h2_prime = hue_degrees(a2_prime, b2);

        let delta_l_prime = l2 - l1;
        let delta_c_prime = c2_prime - c1_prime;

        let chroma_product = c1_prime * c2_prime;
        let delta_h_prime = if chroma_product == 0.0 {
            0.0
        } else {
            let delta_h = h2_prime - h1_prime;
            if delta_h.abs() <= 180.0 {
                delta_h
            } else if delta_h > 180.0 {
                delta_h - 360.0
            } else {
                delta_h + 360.0
            }
        };
        let delta_big_h_prime =
            2.0 * chroma_product.sqrt() * (delta_h_prime.to_radians() / 2.0).sin();

        let l_prime_mean = (l1 + l2) / 2.0;
        let c_prime_mean = (c1_prime + c2_prime) / 2.0;
        let h_prime_mean = if chroma_product == 0.0 {
            h1_prime + h2_prime
        } else if (h1_prime - h2_prime).abs() <= 180.0 {
            (h1_prime + h2_prime) / 2.0
        } else if h1_prime + h2_prime < 360.0 {
            (h1_prime + h2_prime + 360.0) / 2.0
        } else {
            (h1_prime + h2_prime - 360.0) / 2.0
        };

        let hm = h_prime_mean.to_radians();
        let t = 1.0 - 0.17 * (hm - PI / 6.0).cos()
            + 0.24 * (2.0 * hm).cos()
            + 0.32 * (3.0 * hm + PI / 30.0).cos()
            - 0.20 * (4.0 * hm - 63.0_f64.to_radians()).cos();

        let l_offset_sq = (l_prime_mean - 50.0).powi(2);
        let sl = 1.0 + (0.015 * l_offset_sq) / (20.0 + l_offset_sq).sqrt();
        let sc = 1.0 + 0.045 * c_prime_mean;
        let sh = 1.0 + 0.015 * c_prime_mean * t;

        // Rotation term for the blue region
        let delta_theta = 30.0 * (-((h_prime_mean - 275.0) / 25.0).powi(2)).exp();
        let c_prime_mean_pow7 = c_prime_mean.powi(7);
        let rc = 2.0 * (c_prime_mean_pow7 / (c_prime_mean_pow7 + POW25_7)).sqrt();
        let rt = -(2.0 * delta_theta).to_radians().sin() * rc;

        let term_l = delta_l_prime / (KL * sl);
        let term_c = delta_c_prime / (KC * sc);
        let term_h = delta_big_h_prime / (KH * sh);

        // Clamp: the rotation term can push the sum a hair below zero for
        // near-identical colors.
        (term_l * term_l + term_c * term_c + term_h * term_h + rt * term_c * term_h)
            .max(0.0)
            .sqrt()
    }
}

/// Hue angle in degrees, 0..360.
fn hue_degrees(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a).to_degrees();
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

/// CIE L*a*b* companding function
fn lab_f(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;
    const DELTA_CUBE: f64 = DELTA * DELTA * DELTA;

    if t > DELTA_CUBE {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

impl From<LinearRgb> for Lab {
    fn from(rgb: LinearRgb) -> Self {
        let x = rgb.r * 0.4124564 + rgb.g * 0.3575761 + rgb.b * 0.1804375;
        let y = rgb.r * 0.2126729 + rgb.g * 0.7151522 + rgb.b * 0.0721750;
        let z = rgb.r * 0.0193339 + rgb.g * 0.1191920 + rgb.b * 0.9503041;

        let fx = lab_f(x / D65_XN);
        let fy = lab_f(y / D65_YN);
        let fz = lab_f(z / D65_ZN);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Srgb;

    fn lab_of(r: u8, g: u8, b: u8) -> Lab {
        Lab::from(LinearRgb::from(Srgb::new(r, g, b)))
    }

    #[test]
    fn test_known_lab_values() {
        let white = lab_of(255, 255, 255);
        assert!((white.l - 100.0).abs() < 0.01, "White L = {}", white.l);
        assert!(white.a.abs() < 0.01 && white.b.abs() < 0.01);

        let black = lab_of(0, 0, 0);
        assert!(black.l.abs() < 1e-9);

        // sRGB red: L*=53.24, a*=80.09, b*=67.20
        let red = lab_of(255, 0, 0);
        assert!((red.l - 53.24).abs() < 0.05, "Red L = {}", red.l);
        assert!((red.a - 80.09).abs() < 0.05, "Red a = {}", red.a);
        assert!((red.b - 67.20).abs() < 0.05, "Red b = {}", red.b);
    }

    #[test]
    fn test_lab_matches_palette_crate() {
        use palette::white_point::D65;
        use palette::{IntoColor, Lab as PaletteLab, LinSrgb, Srgb as PaletteSrgb};

        for (r, g, b) in [(255, 0, 0), (0, 128, 255), (200, 180, 40), (17, 17, 17)] {
            let ours = lab_of(r, g, b);
            let linear: LinSrgb<f64> = PaletteSrgb::new(r, g, b).into_format::<f64>().into_linear();
            let theirs: PaletteLab<D65, f64> = linear.into_color();
            assert!((ours.l - theirs.l).abs() < 0.05, "L mismatch for ({r},{g},{b})");
            assert!((ours.a - theirs.a).abs() < 0.05, "a mismatch for ({r},{g},{b})");
            assert!((ours.b - theirs.b).abs() < 0.05, "b mismatch for ({r},{g},{b})");
        }
    }

    /// Reference pairs from Sharma, Wu & Dalal, "The CIEDE2000 Color-Difference
    /// Formula: Implementation Notes, Supplementary Test Data".
    #[test]
    fn test_ciede2000_reference_pairs() {
        let cases = [
            (Lab::new(50.0, 2.6772, -79.7751), Lab::new(50.0, 0.0, -82.7485), 2.0425),
            (Lab::new(50.0, 3.1571, -77.2803), Lab::new(50.0, 0.0, -82.7485), 2.8615),
            (Lab::new(50.0, -1.3802, -84.2814), Lab::new(50.0, 0.0, -82.7485), 1.0000),
            (Lab::new(50.0, 0.0, 0.0), Lab::new(50.0, -1.0, 2.0), 2.3669),
            (Lab::new(50.0, 2.49, -0.001), Lab::new(50.0, -2.49, 0.0009), 7.1792),
            (Lab::new(60.2574, -34.0099, 36.2677), Lab::new(60.4626, -34.1751, 39.4387), 1.2644),
            (Lab::new(22.7233, 20.0904, -46.694), Lab::new(23.0331, 14.973, -42.5619), 2.0373),
            (Lab::new(90.8027, -2.0831, 1.441), Lab::new(91.1528, -1.6435, 0.0447), 1.4441),
            (Lab::new(2.0776, 0.0795, -1.135), Lab::new(0.9033, -0.0636, -0.5514), 0.9082),
        ];

        for (a, b, expected) in cases {
            let d = a.ciede2000(b);
            assert!(
                (d - expected).abs() < 1e-4,
                "ΔE00({a:?}, {b:?}) = {d}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_ciede2000_is_symmetric() {
        let samples = [
            lab_of(255, 0, 0),
            lab_of(0, 0, 255),
            lab_of(30, 200, 60),
            lab_of(128, 128, 128),
            lab_of(250, 240, 10),
            Lab::new(50.0, 2.49, -0.001),
            Lab::new(50.0, -2.49, 0.0009),
        ];
        for &a in &samples {
            for &b in &samples {
                let ab = a.ciede2000(b);
                let ba = b.ciede2000(a);
                assert!((ab - ba).abs() < 1e-9, "asymmetric: {ab} vs {ba}");
            }
            assert!(a.ciede2000(a) < 1e-9);
        }
    }

    #[test]
    fn test_cie76_and_hyab() {
        let a = Lab::new(50.0, 0.0, 0.0);
        let b = Lab::new(60.0, 3.0, 4.0);
        assert!((a.cie76(b) - (100.0_f64 + 25.0).sqrt()).abs() < 1e-12);
        assert!((a.hyab(b) - 15.0).abs() < 1e-12);
        assert_eq!(a.hyab(b), b.hyab(a));
        assert_eq!(a.cie76(a), 0.0);
        assert_eq!(a.hyab(a), 0.0);
    }
}
