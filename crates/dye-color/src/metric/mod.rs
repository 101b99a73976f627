//! Perceptual distance metrics
//!
//! [`DistanceMetric`] selects one of six color-difference formulas;
//! [`Swatch`] carries the precomputed color spaces they read from.

mod distance;
mod swatch;

pub use distance::{DistanceMetric, OklchWeights};
pub use swatch::Swatch;
