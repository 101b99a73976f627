//! 8-bit sRGB color type
//!
//! Catalog colors and query targets are both expressed as 8-bit sRGB
//! (`#RRGGBB`). This is the coordinate space of the spatial index and of
//! the `rgb` distance metric.

use std::fmt;
use std::str::FromStr;

use super::linear_rgb::LinearRgb;
use super::lut::srgb8_to_linear;
use crate::error::ParseColorError;

/// A gamma-encoded sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Srgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Srgb {
    /// Create a new color from 8-bit channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels as floating point coordinates, for spatial indexing.
    #[inline]
    pub fn to_point(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// Uppercase `#RRGGBB` representation.
    ///
    /// ```
    /// use dye_color::Srgb;
    /// assert_eq!(Srgb::new(255, 128, 0).to_hex(), "#FF8000");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Euclidean distance over the raw 0..=255 channels.
    ///
    /// ```
    /// use dye_color::Srgb;
    /// let a = Srgb::new(255, 0, 0);
    /// let b = Srgb::new(254, 0, 0);
    /// assert_eq!(a.distance(b), 1.0);
    /// ```
    #[inline]
    pub fn distance(self, other: Srgb) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

impl From<Srgb> for LinearRgb {
    /// Gamma-decode through the 8-bit lookup table.
    fn from(srgb: Srgb) -> Self {
        LinearRgb::new(
            srgb8_to_linear(srgb.r),
            srgb8_to_linear(srgb.g),
            srgb8_to_linear(srgb.b),
        )
    }
}

impl fmt::Display for Srgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

fn hex_digit(c: char) -> Result<u8, ParseColorError> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or(ParseColorError::InvalidCharacter(c))
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse an sRGB color from a hex string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` / `RRGGBB` - standard 6-digit hex
    /// - `#RGB` / `RGB` - shorthand 3-digit hex (expands to RRGGBB)
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use dye_color::Srgb;
    ///
    /// let white: Srgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white, Srgb::new(255, 255, 255));
    ///
    /// let red: Srgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Srgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        let digits = s.chars().map(hex_digit).collect::<Result<Vec<u8>, _>>()?;

        match digits.as_slice() {
            // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
            &[r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            &[r1, r0, g1, g0, b1, b0] => Ok(Self::new(
                (r1 << 4) | r0,
                (g1 << 4) | g0,
                (b1 << 4) | b0,
            )),
            other => Err(ParseColorError::InvalidLength(other.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit() {
        assert_eq!("#FF8000".parse::<Srgb>(), Ok(Srgb::new(255, 128, 0)));
        assert_eq!("ff8000".parse::<Srgb>(), Ok(Srgb::new(255, 128, 0)));
        assert_eq!("  #0a0B0c ".parse::<Srgb>(), Ok(Srgb::new(10, 11, 12)));
    }

    #[test]
    fn test_parse_shorthand() {
        assert_eq!("#FFF".parse::<Srgb>(), Ok(Srgb::new(255, 255, 255)));
        assert_eq!("0a0".parse::<Srgb>(), Ok(Srgb::new(0, 170, 0)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("#FFFF".parse::<Srgb>(), Err(ParseColorError::InvalidLength(4)));
        assert_eq!("".parse::<Srgb>(), Err(ParseColorError::InvalidLength(0)));
        assert_eq!(
            "#GG0000".parse::<Srgb>(),
            Err(ParseColorError::InvalidCharacter('G'))
        );
        // Multi-byte characters must not panic on slicing
        assert_eq!(
            "#ééé".parse::<Srgb>(),
            Err(ParseColorError::InvalidCharacter('é'))
        );
    }

    #[test]
    fn test_hex_round_trip() {
        let color = Srgb::new(1, 35, 254);
        assert_eq!(color.to_hex(), "#0123FE");
        assert_eq!(color.to_hex().parse::<Srgb>(), Ok(color));
        assert_eq!(color.to_string(), "#0123FE");
    }

    #[test]
    fn test_distance() {
        let black = Srgb::new(0, 0, 0);
        let white = Srgb::new(255, 255, 255);
        assert!((black.distance(white) - (3.0_f64 * 255.0 * 255.0).sqrt()).abs() < 1e-9);
        assert_eq!(white.distance(white), 0.0);
        assert_eq!(black.distance(white), white.distance(black));
    }

    #[test]
    fn test_linear_decode_endpoints() {
        let linear = LinearRgb::from(Srgb::new(0, 128, 255));
        assert!(linear.r.abs() < 1e-12);
        assert!((linear.g - 0.2158605).abs() < 1e-6);
        assert!((linear.b - 1.0).abs() < 1e-12);
    }
}
