//! Closest-dye and within-distance queries.
//!
//! The catalog's k-d tree is built over raw RGB, so only the `rgb` metric is
//! answered by the tree alone. Every other metric gathers candidates inside
//! an RGB radius and re-ranks them with the chosen metric. That gathering
//! step is a heuristic: a dye that is perceptually close but far away in
//! RGB can be missed. The radii are configurable in [`MatcherConfig`].

use dye_color::{DistanceMetric, Swatch};
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::CatalogError;
use crate::models::{Dye, MatcherConfig};
use crate::services::catalog::{Catalog, CatalogSnapshot};

/// A catalog entry and its distance from the query color.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub dye: Arc<Dye>,
    pub distance: f64,
}

/// Options for [`Matcher::find_closest`].
///
/// ```
/// use dye_color::DistanceMetric;
/// use dyematch::services::MatchOptions;
///
/// let options = MatchOptions::new()
///     .exclude([5729, 5730])
///     .metric(DistanceMetric::Ciede2000);
/// assert!(options.exclude_ids.contains(&5729));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MatchOptions {
    pub exclude_ids: HashSet<i64>,
    /// `None` uses the matcher's configured default
    pub metric: Option<DistanceMetric>,
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add ids that must never be returned.
    pub fn exclude(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.exclude_ids.extend(ids);
        self
    }

    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = Some(metric);
        self
    }
}

/// Options for [`Matcher::find_within_distance`].
#[derive(Debug, Clone, Default)]
pub struct WithinOptions {
    /// Maximum number of results
    pub limit: Option<usize>,
    /// `None` uses the matcher's configured default
    pub metric: Option<DistanceMetric>,
}

impl WithinOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = Some(metric);
        self
    }
}

/// Query layer over a [`Catalog`].
///
/// Holds no per-query state. Each query takes the catalog's current snapshot
/// once, so a concurrent reload never changes the data mid-query.
#[derive(Debug, Clone)]
pub struct Matcher {
    catalog: Arc<Catalog>,
    config: MatcherConfig,
    default_metric: DistanceMetric,
}

impl Matcher {
    pub fn new(catalog: Arc<Catalog>, config: MatcherConfig) -> Self {
        let config = config.validated();
        let default_metric = config.default_metric();
        Self {
            catalog,
            config,
            default_metric,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn default_metric(&self) -> DistanceMetric {
        self.default_metric
    }

    /// The closest colorable, non-excluded dye to `hex`.
    ///
    /// An unparseable `hex` is logged and yields `Ok(None)`. The only error
    /// is [`CatalogError::NotLoaded`].
    pub fn find_closest(
        &self,
        hex: &str,
        options: &MatchOptions,
    ) -> Result<Option<Match>, CatalogError> {
        let snapshot = self.catalog.snapshot()?;
        let Some(target) = parse_target(hex) else {
            return Ok(None);
        };
        Ok(self.closest_in(&snapshot, &target, options))
    }

    /// Like [`find_closest`](Self::find_closest) for an already parsed color.
    pub fn find_closest_color(
        &self,
        target: Swatch,
        options: &MatchOptions,
    ) -> Result<Option<Match>, CatalogError> {
        let snapshot = self.catalog.snapshot()?;
        Ok(self.closest_in(&snapshot, &target, options))
    }

    /// Every colorable dye within `max_distance` of `hex` under the chosen
    /// metric, closest first, truncated to `options.limit`.
    pub fn find_within_distance(
        &self,
        hex: &str,
        max_distance: f64,
        options: &WithinOptions,
    ) -> Result<Vec<Match>, CatalogError> {
        let snapshot = self.catalog.snapshot()?;
        let Some(target) = parse_target(hex) else {
            return Ok(Vec::new());
        };
        Ok(self.within_in(&snapshot, &target, max_distance, options))
    }

    fn closest_in(
        &self,
        snapshot: &CatalogSnapshot,
        target: &Swatch,
        options: &MatchOptions,
    ) -> Option<Match> {
        let metric = options.metric.unwrap_or(self.default_metric);
        let excluded =
            |dye: &Arc<Dye>| options.exclude_ids.contains(&dye.id) || !snapshot.is_colorable(dye);

        let index = snapshot.index();
        if index.is_empty() {
            return closest_of(
                snapshot.dyes().iter().filter(|d| !excluded(*d)),
                target,
                metric,
            );
        }

        let point = target.srgb().to_point();

        if metric.is_rgb_euclidean() {
            return index.nearest(&point, &excluded).map(|n| Match {
                dye: Arc::clone(n.item),
                distance: n.distance,
            });
        }

        let candidates = index.within(&point, self.config.candidate_radius, &excluded);
        tracing::debug!(
            metric = %metric,
            candidates = candidates.len(),
            radius = self.config.candidate_radius,
            "Re-ranking RGB candidates"
        );

        if let Some(best) = closest_of(candidates.iter().map(|n| n.item), target, metric) {
            return Some(best);
        }

        // Nothing inside the radius: take the RGB nearest as a best effort
        let nearest = index.nearest(&point, &excluded)?;
        score(metric, target, nearest.item).map(|distance| Match {
            dye: Arc::clone(nearest.item),
            distance,
        })
    }

    fn within_in(
        &self,
        snapshot: &CatalogSnapshot,
        target: &Swatch,
        max_distance: f64,
        options: &WithinOptions,
    ) -> Vec<Match> {
        let metric = options.metric.unwrap_or(self.default_metric);
        let excluded = |dye: &Arc<Dye>| !snapshot.is_colorable(dye);

        let index = snapshot.index();
        let mut matches: Vec<Match> = if index.is_empty() {
            scored_within(
                snapshot.dyes().iter().filter(|d| !excluded(*d)),
                target,
                metric,
                max_distance,
            )
        } else if metric.is_rgb_euclidean() {
            index
                .within(&target.srgb().to_point(), max_distance, &excluded)
                .into_iter()
                .map(|n| Match {
                    dye: Arc::clone(n.item),
                    distance: n.distance,
                })
                .collect()
        } else {
            let radius =
                (max_distance * self.config.within_radius_factor).max(self.config.min_within_radius);
            let candidates = index.within(&target.srgb().to_point(), radius, &excluded);
            scored_within(candidates.iter().map(|n| n.item), target, metric, max_distance)
        };

        matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        if let Some(limit) = options.limit {
            matches.truncate(limit);
        }
        matches
    }
}

fn parse_target(hex: &str) -> Option<Swatch> {
    match hex.parse::<Swatch>() {
        Ok(swatch) => Some(swatch),
        Err(e) => {
            tracing::warn!(target_color = hex, error = %e, "Unparseable target color");
            None
        }
    }
}

/// Distance from `target` to a dye, or `None` when the dye cannot be scored.
fn score(metric: DistanceMetric, target: &Swatch, dye: &Dye) -> Option<f64> {
    let Some(swatch) = dye.swatch() else {
        tracing::debug!(id = dye.id, "Skipping dye without color data");
        return None;
    };

    let distance = metric.distance(target, swatch);
    if distance.is_finite() {
        Some(distance)
    } else {
        tracing::debug!(id = dye.id, metric = %metric, "Skipping non-finite distance");
        None
    }
}

/// Lowest-scoring dye; the first one wins ties.
fn closest_of<'a, I>(dyes: I, target: &Swatch, metric: DistanceMetric) -> Option<Match>
where
    I: IntoIterator<Item = &'a Arc<Dye>>,
{
    let mut best: Option<(&Arc<Dye>, f64)> = None;
    for dye in dyes {
        if let Some(d) = score(metric, target, dye) {
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((dye, d));
            }
        }
    }

    best.map(|(dye, distance)| Match {
        dye: Arc::clone(dye),
        distance,
    })
}

fn scored_within<'a, I>(
    dyes: I,
    target: &Swatch,
    metric: DistanceMetric,
    max_distance: f64,
) -> Vec<Match>
where
    I: IntoIterator<Item = &'a Arc<Dye>>,
{
    dyes.into_iter()
        .filter_map(|dye| {
            score(metric, target, dye)
                .filter(|d| *d <= max_distance)
                .map(|distance| Match {
                    dye: Arc::clone(dye),
                    distance,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn matcher(data: serde_json::Value) -> Matcher {
        let catalog = Arc::new(Catalog::new());
        catalog.load(&data).unwrap();
        Matcher::new(catalog, MatcherConfig::default())
    }

    fn primaries() -> Matcher {
        matcher(json!([
            {"itemID": 1, "name": "Snow White", "hex": "#FFFFFF"},
            {"itemID": 2, "name": "Jet Black", "hex": "#000000"},
            {"itemID": 3, "name": "Ruby Red", "hex": "#FF0000"},
        ]))
    }

    #[test]
    fn test_not_loaded() {
        let matcher = Matcher::new(Arc::new(Catalog::new()), MatcherConfig::default());
        assert!(matches!(
            matcher.find_closest("#FF0000", &MatchOptions::new()),
            Err(CatalogError::NotLoaded)
        ));
        assert!(matches!(
            matcher.find_within_distance("#FF0000", 5.0, &WithinOptions::new()),
            Err(CatalogError::NotLoaded)
        ));
    }

    #[test]
    fn test_unparseable_target() {
        let matcher = primaries();
        assert!(matcher
            .find_closest("not a color", &MatchOptions::new())
            .unwrap()
            .is_none());
        assert!(matcher
            .find_within_distance("#12", 50.0, &WithinOptions::new())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_rgb_exact_hit() {
        let hit = primaries()
            .find_closest("#FF0000", &MatchOptions::new())
            .unwrap()
            .unwrap();
        assert_eq!(hit.dye.id, 3);
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_exclude_ids() {
        let hit = primaries()
            .find_closest("#FF0000", &MatchOptions::new().exclude([3]))
            .unwrap()
            .unwrap();
        assert_ne!(hit.dye.id, 3);

        let none = primaries()
            .find_closest("#FF0000", &MatchOptions::new().exclude([1, 2, 3]))
            .unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_fallback_outside_candidate_radius() {
        // Black is ~441 RGB units from white, well past the candidate radius
        let matcher = matcher(json!([{"itemID": 2, "name": "Jet Black", "hex": "#000000"}]));
        let hit = matcher
            .find_closest("#FFFFFF", &MatchOptions::new().metric(DistanceMetric::Cie76))
            .unwrap()
            .unwrap();

        assert_eq!(hit.dye.id, 2);
        assert!((hit.distance - 100.0).abs() < 0.5);
    }

    #[test]
    fn test_within_limit() {
        let hits = primaries()
            .find_within_distance("#808080", 500.0, &WithinOptions::new().limit(2))
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits[0].distance <= hits[1].distance);
    }

    #[test]
    fn test_dye_without_color_never_matches() {
        let matcher = matcher(json!([
            {"itemID": 1, "name": "Mystery"},
            {"itemID": 2, "name": "Eyepatch", "category": "Facewear", "hex": "#00FF00"},
        ]));

        for metric in [DistanceMetric::Rgb, DistanceMetric::Oklab] {
            let options = MatchOptions::new().metric(metric);
            assert!(matcher.find_closest("#00FF00", &options).unwrap().is_none());
        }
    }

    #[test]
    fn test_linear_scan_when_index_empty() {
        let catalog = Arc::new(Catalog::with_config(crate::models::CatalogConfig {
            non_colorable_categories: vec![],
        }));
        catalog
            .load(&json!([{"itemID": 1, "name": "Mystery"}]))
            .unwrap();
        let matcher = Matcher::new(catalog, MatcherConfig::default());

        assert!(matcher
            .find_closest("#00FF00", &MatchOptions::new())
            .unwrap()
            .is_none());
        assert!(matcher
            .find_within_distance("#00FF00", 1000.0, &WithinOptions::new())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_configured_default_metric() {
        let catalog = Arc::new(Catalog::new());
        let config = MatcherConfig {
            default_metric: "oklab".to_string(),
            ..Default::default()
        };
        let matcher = Matcher::new(catalog, config);
        assert_eq!(matcher.default_metric(), DistanceMetric::Oklab);
    }
}
