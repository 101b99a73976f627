// Color science constants are quoted at their published precision.
#![allow(clippy::excessive_precision, clippy::module_inception)]

//! dye-color: color conversions and perceptual distance metrics
//!
//! This crate is the color math underneath dye matching: it converts 8-bit
//! sRGB into the perceptual spaces the distance formulas need and exposes
//! those formulas behind a single [`DistanceMetric`] switch.
//!
//! # Quick Start
//!
//! ```
//! use dye_color::{DistanceMetric, Swatch};
//!
//! let target: Swatch = "#C83232".parse().unwrap();
//! let candidate: Swatch = "#FF0000".parse().unwrap();
//!
//! let d = DistanceMetric::Ciede2000.distance(&target, &candidate);
//! assert!(d > 0.0);
//! ```
//!
//! # Metrics
//!
//! | key | basis |
//! |-----|-------|
//! | `rgb` | Euclidean over raw 0..=255 channels |
//! | `cie76` | Euclidean in CIELAB |
//! | `ciede2000` | CIE TR 142-2001 ΔE00 |
//! | `oklab` | Euclidean in Oklab |
//! | `hyab` | `|ΔL| + sqrt(Δa² + Δb²)` in CIELAB |
//! | `oklch-weighted` | Oklch with custom L/C/H gains |
//!
//! ## Why RGB Is Special
//!
//! Only `rgb` is a Euclidean metric over the coordinates an RGB k-d tree is
//! built on, so only `rgb` can be answered by the tree alone. Every other
//! metric warps RGB space non-uniformly (CIELAB and Oklab compress bright
//! yellows and stretch dark blues), so a caller that gathers candidates by
//! RGB radius must re-rank them with the chosen metric.
//!
//! ## Reference White and Gamma
//!
//! CIELAB uses the D65 white point and the sRGB primaries. Gamma decode is
//! a 256-entry lookup table of the exact IEC 61966-2-1 curve generated by
//! build.rs, so every 8-bit channel decodes without interpolation error.

pub mod color;
pub mod error;
pub mod metric;

pub use color::{Lab, LinearRgb, Oklab, Oklch, Srgb};
pub use error::{ParseColorError, ParseMetricError};
pub use metric::{DistanceMetric, OklchWeights, Swatch};
