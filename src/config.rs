use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::geometry::ShapeKind;

/// Default number of segments used to approximate a circle.
pub const DEFAULT_CIRCLE_STEPS: usize = 64;

/// Default per-kind capacity of a feature store.
pub const DEFAULT_SHAPE_LIMIT: usize = 10;

/// How circle radii relate to shape coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircleMetric {
    /// Coordinates are `(lon, lat)` degrees and radii are meters on a
    /// spherical Earth. Accuracy drops near the poles and at large radii.
    #[default]
    Geodesic,
    /// Coordinates and radii share the same planar unit.
    Planar,
}

/// Parameters controlling circle approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleParams {
    /// Number of ring segments.
    pub steps: usize,
    /// Distance convention for the radius.
    pub metric: CircleMetric,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            steps: DEFAULT_CIRCLE_STEPS,
            metric: CircleMetric::Geodesic,
        }
    }
}

impl CircleParams {
    /// Planar parameters with the default step count.
    #[must_use]
    pub fn planar() -> Self {
        Self {
            metric: CircleMetric::Planar,
            ..Self::default()
        }
    }
}

/// Per-kind capacity limits applied by the feature store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeLimits {
    pub polygon: usize,
    pub rectangle: usize,
    pub circle: usize,
    pub line_string: usize,
}

impl Default for ShapeLimits {
    fn default() -> Self {
        Self {
            polygon: DEFAULT_SHAPE_LIMIT,
            rectangle: DEFAULT_SHAPE_LIMIT,
            circle: DEFAULT_SHAPE_LIMIT,
            line_string: DEFAULT_SHAPE_LIMIT,
        }
    }
}

impl ShapeLimits {
    /// Returns the limit for `kind`.
    #[must_use]
    pub fn get(&self, kind: ShapeKind) -> usize {
        match kind {
            ShapeKind::Polygon => self.polygon,
            ShapeKind::Rectangle => self.rectangle,
            ShapeKind::Circle => self.circle,
            ShapeKind::LineString => self.line_string,
        }
    }

    /// Sets the limit for `kind`.
    pub fn set(&mut self, kind: ShapeKind, limit: usize) {
        let slot = match kind {
            ShapeKind::Polygon => &mut self.polygon,
            ShapeKind::Rectangle => &mut self.rectangle,
            ShapeKind::Circle => &mut self.circle,
            ShapeKind::LineString => &mut self.line_string,
        };
        *slot = limit;
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub circle: CircleParams,
    pub limits: ShapeLimits,
}

impl EngineConfig {
    /// Parses and validates a JSON configuration. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` for malformed input and
    /// `ConfigError::InvalidParameters` if validation fails.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a usable engine.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameters` if fewer than 3 circle steps
    /// are requested.
    pub fn validate(&self) -> Result<()> {
        if self.circle.steps < 3 {
            return Err(ConfigError::InvalidParameters(format!(
                "circle steps must be at least 3, got {}",
                self.circle.steps
            ))
            .into());
        }
        Ok(())
    }
}
