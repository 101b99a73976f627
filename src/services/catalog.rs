//! The dye catalog and its derived indexes.
//!
//! A load builds a complete [`CatalogSnapshot`] off to the side and then
//! publishes it with a single swap under a short write lock. Readers clone
//! the current `Arc<CatalogSnapshot>` once and never see a half-built set
//! of indexes. A rejected load leaves the previous snapshot in place.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{CatalogError, RecordError};
use crate::models::{CatalogConfig, Dye};
use crate::services::normalize::normalize_record;
use crate::services::sanitize::strip_denied_keys;
use crate::spatial::KdTree;

/// Number of hue buckets around the color wheel.
pub const HUE_BUCKET_COUNT: usize = 36;

/// Width of one hue bucket in degrees.
pub const HUE_BUCKET_WIDTH: f64 = 10.0;

/// Bucket index for a hue in degrees. Any finite hue is accepted and
/// wrapped into `[0, 360)` first; NaN lands in bucket 0.
///
/// ```
/// use dyematch::services::catalog::hue_bucket;
/// assert_eq!(hue_bucket(359.0), 35);
/// assert_eq!(hue_bucket(-10.0), 35);
/// assert_eq!(hue_bucket(370.0), 1);
/// ```
pub fn hue_bucket(hue: f64) -> usize {
    if !hue.is_finite() {
        return 0;
    }
    let normalized = hue.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    (normalized / HUE_BUCKET_WIDTH).floor() as usize % HUE_BUCKET_COUNT
}

/// The target hue's bucket plus `ceil(tolerance / 10)` buckets either side,
/// wrapping around the wheel. Negative tolerance counts as zero. Each
/// bucket appears once.
pub fn hue_buckets_to_search(hue: f64, tolerance: f64) -> Vec<usize> {
    let center = hue_bucket(hue) as i64;
    let span = if tolerance.is_finite() && tolerance > 0.0 {
        ((tolerance / HUE_BUCKET_WIDTH).ceil() as i64).min(HUE_BUCKET_COUNT as i64 / 2)
    } else if tolerance == f64::INFINITY {
        HUE_BUCKET_COUNT as i64 / 2
    } else {
        0
    };

    let mut buckets = Vec::with_capacity((2 * span + 1) as usize);
    for offset in -span..=span {
        let bucket = (center + offset).rem_euclid(HUE_BUCKET_COUNT as i64) as usize;
        if !buckets.contains(&bucket) {
            buckets.push(bucket);
        }
    }
    buckets
}

/// Direction for the sorted accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// A record rejected during load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedRecord {
    /// Array index or object key of the record
    pub locator: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: RecordError,
}

fn serialize_display<S: Serializer>(error: &RecordError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub loaded: usize,
    pub dropped: Vec<DroppedRecord>,
    /// Denylisted keys removed across all records
    pub stripped_keys: usize,
    pub loaded_at: DateTime<Utc>,
}

/// One published generation of catalog data. Never mutated after publish.
#[derive(Debug)]
pub struct CatalogSnapshot {
    dyes: Vec<Arc<Dye>>,
    by_id: HashMap<i64, Arc<Dye>>,
    by_external_id: HashMap<i64, Arc<Dye>>,
    hue_buckets: Vec<Vec<Arc<Dye>>>,
    non_colorable: HashSet<i64>,
    index: KdTree<Arc<Dye>>,
    loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    fn build(dyes: Vec<Dye>, config: &CatalogConfig, loaded_at: DateTime<Utc>) -> Self {
        let dyes: Vec<Arc<Dye>> = dyes.into_iter().map(Arc::new).collect();

        let mut by_id = HashMap::with_capacity(dyes.len());
        let mut by_external_id = HashMap::new();
        let mut hue_buckets = vec![Vec::new(); HUE_BUCKET_COUNT];
        let mut non_colorable = HashSet::new();
        let mut points = Vec::with_capacity(dyes.len());

        for dye in &dyes {
            by_id.insert(dye.id, Arc::clone(dye));

            if let Some(external_id) = dye.external_id {
                by_external_id
                    .entry(external_id)
                    .or_insert_with(|| Arc::clone(dye));
            }

            if let Some(hsv) = dye.hsv {
                hue_buckets[hue_bucket(hsv.h)].push(Arc::clone(dye));
            }

            if config.is_non_colorable(&dye.category) {
                non_colorable.insert(dye.id);
            } else if let Some(swatch) = dye.swatch() {
                points.push((swatch.srgb().to_point(), Arc::clone(dye)));
            }
        }

        Self {
            dyes,
            by_id,
            by_external_id,
            hue_buckets,
            non_colorable,
            index: KdTree::build(points),
            loaded_at,
        }
    }

    /// Entries in load order.
    pub fn dyes(&self) -> &[Arc<Dye>] {
        &self.dyes
    }

    pub fn get_by_id(&self, id: i64) -> Option<&Arc<Dye>> {
        self.by_id.get(&id)
    }

    pub fn get_by_external_id(&self, external_id: i64) -> Option<&Arc<Dye>> {
        self.by_external_id.get(&external_id)
    }

    /// Entries whose HSV hue falls in `bucket`. Empty for out-of-range buckets.
    pub fn hue_bucket(&self, bucket: usize) -> &[Arc<Dye>] {
        self.hue_buckets
            .get(bucket)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// RGB k-d tree over colorable entries with color data.
    pub fn index(&self) -> &KdTree<Arc<Dye>> {
        &self.index
    }

    /// False for entries in a non-colorable category.
    pub fn is_colorable(&self, dye: &Dye) -> bool {
        !self.non_colorable.contains(&dye.id)
    }

    pub fn len(&self) -> usize {
        self.dyes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dyes.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// The dye catalog.
///
/// Created empty; every read accessor fails with [`CatalogError::NotLoaded`]
/// until the first successful [`Catalog::load`].
#[derive(Debug, Default)]
pub struct Catalog {
    config: CatalogConfig,
    current: RwLock<Option<Arc<CatalogSnapshot>>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CatalogConfig) -> Self {
        Self {
            config,
            current: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Validate `data` and atomically replace the catalog contents.
    ///
    /// `data` is an array of records or an object whose values are records.
    /// Invalid records are dropped and reported; only a non-collection top
    /// level rejects the load.
    pub fn load(&self, data: &Value) -> Result<LoadReport, CatalogError> {
        let records: Vec<(String, Value)> = match data {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v.clone()))
                .collect(),
            Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            other => {
                let error = CatalogError::InvalidShape {
                    found: value_kind(other),
                };
                tracing::error!(%error, severity = %error.severity(), "Rejected catalog load");
                return Err(error);
            }
        };

        let mut stripped_keys = 0;
        let mut dropped = Vec::new();
        let mut dyes: Vec<Dye> = Vec::with_capacity(records.len());
        let mut seen = HashSet::with_capacity(records.len());

        for (locator, mut record) in records {
            stripped_keys += strip_denied_keys(&mut record);

            let result = normalize_record(&record, &self.config).and_then(|dye| {
                if seen.insert(dye.id) {
                    Ok(dye)
                } else {
                    Err(RecordError::DuplicateId(dye.id))
                }
            });

            match result {
                Ok(dye) => dyes.push(dye),
                Err(error) => {
                    tracing::warn!(record = %locator, reason = %error, "Dropping catalog record");
                    dropped.push(DroppedRecord { locator, error });
                }
            }
        }

        let loaded_at = Utc::now();
        let snapshot = CatalogSnapshot::build(dyes, &self.config, loaded_at);
        let report = LoadReport {
            loaded: snapshot.len(),
            dropped,
            stripped_keys,
            loaded_at,
        };

        tracing::info!(
            loaded = report.loaded,
            dropped = report.dropped.len(),
            indexed = snapshot.index().len(),
            stripped_keys,
            "Loaded catalog"
        );

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(snapshot));
        Ok(report)
    }

    pub fn is_loaded(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(CatalogError::NotLoaded)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Arc<Dye>>, CatalogError> {
        Ok(self.snapshot()?.get_by_id(id).cloned())
    }

    pub fn get_by_external_id(&self, external_id: i64) -> Result<Option<Arc<Dye>>, CatalogError> {
        Ok(self.snapshot()?.get_by_external_id(external_id).cloned())
    }

    /// All entries in load order. The returned `Vec` is the caller's own.
    pub fn get_all(&self) -> Result<Vec<Arc<Dye>>, CatalogError> {
        Ok(self.snapshot()?.dyes().to_vec())
    }

    /// Distinct non-empty categories, sorted.
    pub fn get_categories(&self) -> Result<Vec<String>, CatalogError> {
        let snapshot = self.snapshot()?;
        let mut categories: Vec<String> = snapshot
            .dyes()
            .iter()
            .filter(|d| !d.category.is_empty())
            .map(|d| d.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    pub fn dyes_by_hue_bucket(&self, bucket: usize) -> Result<Vec<Arc<Dye>>, CatalogError> {
        Ok(self.snapshot()?.hue_bucket(bucket).to_vec())
    }

    pub fn len(&self) -> Result<usize, CatalogError> {
        Ok(self.snapshot()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CatalogError> {
        Ok(self.snapshot()?.is_empty())
    }

    pub fn loaded_at(&self) -> Result<DateTime<Utc>, CatalogError> {
        Ok(self.snapshot()?.loaded_at())
    }

    /// True unless the dye's category is configured as non-colorable.
    pub fn is_colorable(&self, dye: &Dye) -> bool {
        !self.config.is_non_colorable(&dye.category)
    }

    /// Sorted by HSV value. Entries without HSV sort as 0.
    pub fn sorted_by_brightness(&self, order: SortOrder) -> Result<Vec<Arc<Dye>>, CatalogError> {
        self.sorted_by(order, |d| d.hsv.map_or(0.0, |hsv| hsv.v))
    }

    /// Sorted by HSV saturation. Entries without HSV sort as 0.
    pub fn sorted_by_saturation(&self, order: SortOrder) -> Result<Vec<Arc<Dye>>, CatalogError> {
        self.sorted_by(order, |d| d.hsv.map_or(0.0, |hsv| hsv.s))
    }

    /// Sorted by HSV hue. Entries without HSV sort as 0.
    pub fn sorted_by_hue(&self, order: SortOrder) -> Result<Vec<Arc<Dye>>, CatalogError> {
        self.sorted_by(order, |d| d.hsv.map_or(0.0, |hsv| hsv.h))
    }

    fn sorted_by<F>(&self, order: SortOrder, key: F) -> Result<Vec<Arc<Dye>>, CatalogError>
    where
        F: Fn(&Dye) -> f64,
    {
        let mut dyes = self.get_all()?;
        match order {
            SortOrder::Ascending => dyes.sort_by(|a, b| key(a).total_cmp(&key(b))),
            SortOrder::Descending => dyes.sort_by(|a, b| key(b).total_cmp(&key(a))),
        }
        Ok(dyes)
    }

    /// Case-insensitive substring match on the name.
    pub fn search_by_name(&self, query: &str) -> Result<Vec<Arc<Dye>>, CatalogError> {
        let needle = query.trim().to_lowercase();
        let snapshot = self.snapshot()?;
        Ok(snapshot
            .dyes()
            .iter()
            .filter(|d| d.name_lower().contains(&needle))
            .cloned()
            .collect())
    }

    /// Case-insensitive exact category match.
    pub fn dyes_by_category(&self, category: &str) -> Result<Vec<Arc<Dye>>, CatalogError> {
        let wanted = category.to_lowercase();
        let snapshot = self.snapshot()?;
        Ok(snapshot
            .dyes()
            .iter()
            .filter(|d| d.category_lower() == wanted)
            .cloned()
            .collect())
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
