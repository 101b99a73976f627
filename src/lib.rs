//! Dyematch - nearest-dye lookup over a named color catalog
//!
//! A [`Catalog`] validates raw dye records and builds its lookup indexes,
//! including an RGB k-d tree. A [`Matcher`] answers "closest dye" and
//! "dyes within distance" queries against it under any of the metrics in
//! [`dye_color::DistanceMetric`].
//!
//! ```
//! use std::sync::Arc;
//! use dyematch::{Catalog, MatchOptions, Matcher, MatcherConfig};
//!
//! let catalog = Arc::new(Catalog::new());
//! catalog
//!     .load(&serde_json::json!([
//!         {"itemID": 3, "name": "Ruby Red", "hex": "#FF0000"},
//!         {"itemID": 2, "name": "Jet Black", "hex": "#000000"},
//!     ]))
//!     .unwrap();
//!
//! let matcher = Matcher::new(catalog, MatcherConfig::default());
//! let hit = matcher.find_closest("#E00000", &MatchOptions::new()).unwrap().unwrap();
//! assert_eq!(hit.dye.name, "Ruby Red");
//! ```

pub mod error;
pub mod models;
pub mod services;
pub mod spatial;

pub use error::{CatalogError, RecordError, Severity};
pub use models::{CatalogConfig, Dye, EngineConfig, Hsv, MatcherConfig, Rgb};
pub use services::{
    load_catalog_file, Catalog, CatalogSnapshot, LoadReport, Match, MatchOptions, Matcher,
    SortOrder, WithinOptions,
};
