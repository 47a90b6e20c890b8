use geo::{coord, Destination, Haversine, LineString, Point, Polygon};

use crate::config::{CircleMetric, CircleParams};
use crate::math::Coord;

/// Approximates a circle by a closed ring of `params.steps` vertices.
///
/// Vertex `i` sits at bearing `-360 * i / steps` degrees (clockwise from
/// north) at distance `radius` from the center, so the ring starts due north
/// and proceeds westward. The first vertex is repeated to close the ring.
///
/// The computation is a pure function of its inputs: the same center, radius
/// and parameters always produce bit-identical coordinates.
#[derive(Debug)]
pub struct CirclePolygon {
    center: Point<f64>,
    radius: f64,
    params: CircleParams,
}

impl CirclePolygon {
    /// Creates a new `CirclePolygon` operation with default parameters.
    #[must_use]
    pub fn new(center: Point<f64>, radius: f64) -> Self {
        Self {
            center,
            radius,
            params: CircleParams::default(),
        }
    }

    /// Sets custom approximation parameters.
    #[must_use]
    pub fn with_params(mut self, params: CircleParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the approximation.
    ///
    /// Step counts below 3 are raised to 3 so the result always encloses area.
    #[must_use]
    pub fn execute(&self) -> Polygon<f64> {
        let steps = self.params.steps.max(3);
        #[allow(clippy::cast_precision_loss)]
        let ring: Vec<Coord> = (0..steps)
            .map(|i| self.vertex(-360.0 * i as f64 / steps as f64))
            .collect();
        Polygon::new(LineString::from(ring), vec![])
    }

    fn vertex(&self, bearing: f64) -> Coord {
        match self.params.metric {
            CircleMetric::Geodesic => Haversine::destination(self.center, bearing, self.radius).0,
            CircleMetric::Planar => {
                let (sin, cos) = bearing.to_radians().sin_cos();
                coord! {
                    x: self.center.x() + self.radius * sin,
                    y: self.center.y() + self.radius * cos,
                }
            }
        }
    }
}
