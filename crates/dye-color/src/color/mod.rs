//! Color types and conversion utilities
//!
//! # Color Spaces
//!
//! - **Srgb**: 8-bit gamma-encoded color. Input/output and the RGB metric.
//! - **LinearRgb**: Linear light intensity. Conversion hub only.
//! - **Lab**: CIELAB (D65). CIE76, CIEDE2000 and HyAB.
//! - **Oklab / Oklch**: Ottosson's perceptual space and its polar form.
//!
//! # Example
//!
//! ```
//! use dye_color::{Lab, LinearRgb, Srgb};
//!
//! let srgb = Srgb::new(255, 0, 0);
//! let lab = Lab::from(LinearRgb::from(srgb));
//! assert!((lab.l - 53.24).abs() < 0.05);
//! ```

mod lab;
mod linear_rgb;
mod lut;
mod oklab;
mod oklch;
mod srgb;

pub use lab::Lab;
pub use linear_rgb::LinearRgb;
pub use oklab::Oklab;
pub use oklch::Oklch;
pub use srgb::Srgb;
