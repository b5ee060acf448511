//! Configuration for skyline queries.
//!
//! Every field has a default, so an empty JSON object (or TOML document) is a
//! valid configuration.
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Maximum number of entries per R-tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FanOut {
    #[default]
    Four,
    Eight,
    Sixteen,
    ThirtyTwo,
}

impl FanOut {
    pub const fn max_entries(self) -> usize {
        match self {
            FanOut::Four => 4,
            FanOut::Eight => 8,
            FanOut::Sixteen => 16,
            FanOut::ThirtyTwo => 32,
        }
    }
}

/// How the data index is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IndexBuild {
    /// Sort-tile bulk loading (packed nodes)
    #[default]
    BulkLoad,
    /// One R* insertion per data point, in input order
    Sequential,
}

/// Which points define distances and dominance circles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DominanceBasis {
    /// Every reference point
    #[default]
    ReferencePoints,
    /// Only the convex hull vertices of the reference set. Dominance is the
    /// same, with fewer circles per region.
    HullVertices,
}

/// Test used to decide whether a whole rectangle is dominated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RectDominance {
    /// Corners plus the edge between the two corners nearest the anchor.
    #[default]
    NearestEdge,
    /// Minimum rectangle distance against every circle radius.
    Exact,
}

/// Query configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub fan_out: FanOut,

    #[serde(default)]
    pub index_build: IndexBuild,

    #[serde(default)]
    pub dominance_basis: DominanceBasis,

    #[serde(default)]
    pub rect_dominance: RectDominance,

    /// Allowed deviation from 360 degrees in the hull angle-sum test
    #[serde(default = "Config::default_hull_tolerance")]
    pub hull_tolerance_degrees: f64,
}

impl Config {
    const fn default_hull_tolerance() -> f64 {
        crate::compute::hull::DEFAULT_ANGLE_TOLERANCE
    }

    pub fn with_fan_out(mut self, fan_out: FanOut) -> Self {
        self.fan_out = fan_out;
        self
    }

    pub fn with_index_build(mut self, build: IndexBuild) -> Self {
        self.index_build = build;
        self
    }

    pub fn with_dominance_basis(mut self, basis: DominanceBasis) -> Self {
        self.dominance_basis = basis;
        self
    }

    pub fn with_rect_dominance(mut self, test: RectDominance) -> Self {
        self.rect_dominance = test;
        self
    }

    pub fn with_hull_tolerance(mut self, degrees: f64) -> Self {
        assert!(
            degrees.is_finite() && degrees > 0.0,
            "Hull tolerance must be finite and positive"
        );
        if degrees > 1.0 {
            log::warn!(
                "Hull tolerance of {} degrees is loose; points outside the hull may be accepted",
                degrees
            );
        }
        self.hull_tolerance_degrees = degrees;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.hull_tolerance_degrees.is_finite() {
            return Err("Hull tolerance must be finite (not NaN or infinity)".to_string());
        }
        if self.hull_tolerance_degrees <= 0.0 {
            return Err("Hull tolerance must be positive".to_string());
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fan_out: FanOut::default(),
            index_build: IndexBuild::default(),
            dominance_basis: DominanceBasis::default(),
            rect_dominance: RectDominance::default(),
            hull_tolerance_degrees: Self::default_hull_tolerance(),
        }
    }
}
