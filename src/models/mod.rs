pub mod config;
pub mod dye;

pub use config::{CatalogConfig, EngineConfig, MatcherConfig, WeightsConfig};
pub use dye::{Dye, Hsv, Rgb};
