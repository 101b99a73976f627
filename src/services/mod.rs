pub mod catalog;
pub mod loader;
pub mod matcher;
pub mod normalize;
pub mod sanitize;

pub use catalog::{
    hue_bucket, hue_buckets_to_search, Catalog, CatalogSnapshot, DroppedRecord, LoadReport,
    SortOrder,
};
pub use loader::load_catalog_file;
pub use matcher::{Match, MatchOptions, Matcher, WithinOptions};
