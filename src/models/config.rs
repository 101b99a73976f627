use dye_color::{DistanceMetric, OklchWeights};
use serde::Deserialize;
use std::path::Path;

/// Engine configuration loaded from YAML
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub matcher: MatcherConfig,
}

/// Catalog build settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Categories whose entries cannot be dyed onto an item. They stay
    /// addressable by id but are excluded from spatial search.
    #[serde(default = "default_non_colorable_categories")]
    pub non_colorable_categories: Vec<String>,
}

fn default_non_colorable_categories() -> Vec<String> {
    vec!["Facewear".to_string()]
}

impl CatalogConfig {
    /// Case-insensitive check against the non-colorable category list
    pub fn is_non_colorable(&self, category: &str) -> bool {
        self.non_colorable_categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            non_colorable_categories: default_non_colorable_categories(),
        }
    }
}

/// Query tuning for the matcher
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MatcherConfig {
    /// Metric key used when a query does not name one
    #[serde(default = "default_metric_key")]
    pub default_metric: String,

    /// RGB radius gathered by `find_closest` before re-ranking
    #[serde(default = "default_candidate_radius")]
    pub candidate_radius: f64,

    /// `find_within_distance` gathers `max(max_distance * factor, min_within_radius)`
    #[serde(default = "default_within_radius_factor")]
    pub within_radius_factor: f64,

    #[serde(default = "default_min_within_radius")]
    pub min_within_radius: f64,

    /// Gains used when `oklch-weighted` is selected by key
    #[serde(default)]
    pub oklch_weights: WeightsConfig,
}

fn default_metric_key() -> String {
    "rgb".to_string()
}

fn default_candidate_radius() -> f64 {
    100.0
}

fn default_within_radius_factor() -> f64 {
    2.0
}

fn default_min_within_radius() -> f64 {
    150.0
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct WeightsConfig {
    #[serde(default = "unit")]
    pub l: f64,
    #[serde(default = "unit")]
    pub c: f64,
    #[serde(default = "unit")]
    pub h: f64,
}

fn unit() -> f64 {
    1.0
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            l: 1.0,
            c: 1.0,
            h: 1.0,
        }
    }
}

impl From<WeightsConfig> for OklchWeights {
    fn from(w: WeightsConfig) -> Self {
        OklchWeights::new(w.l, w.c, w.h)
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            default_metric: default_metric_key(),
            candidate_radius: default_candidate_radius(),
            within_radius_factor: default_within_radius_factor(),
            min_within_radius: default_min_within_radius(),
            oklch_weights: WeightsConfig::default(),
        }
    }
}

impl MatcherConfig {
    /// Resolve the configured default metric, falling back to `rgb`.
    pub fn default_metric(&self) -> DistanceMetric {
        match DistanceMetric::from_key(&self.default_metric, self.oklch_weights.into()) {
            Ok(metric) => metric,
            Err(e) => {
                tracing::warn!(%e, "Invalid default metric, using rgb");
                DistanceMetric::Rgb
            }
        }
    }

    /// Replace non-finite or negative radii with their defaults.
    pub fn validated(mut self) -> Self {
        fn check(name: &'static str, value: &mut f64, default: f64) {
            if !value.is_finite() || *value < 0.0 {
                tracing::warn!(setting = name, value = *value, default, "Invalid matcher setting, using default");
                *value = default;
            }
        }

        check("candidate_radius", &mut self.candidate_radius, default_candidate_radius());
        check(
            "within_radius_factor",
            &mut self.within_radius_factor,
            default_within_radius_factor(),
        );
        check(
            "min_within_radius",
            &mut self.min_within_radius,
            default_min_within_radius(),
        );
        self
    }
}

impl EngineConfig {
    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        let mut config: Self = serde_yaml::from_str(yaml)?;
        config.matcher = config.matcher.validated();
        Ok(config)
    }

    /// Load configuration from a YAML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml_str(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        non_colorable = config.catalog.non_colorable_categories.len(),
                        metric = %config.matcher.default_metric,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}
