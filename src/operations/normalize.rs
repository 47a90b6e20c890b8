use geo::{Geometry, MultiPolygon};
use tracing::debug;

use super::CirclePolygon;
use crate::config::CircleParams;
use crate::geometry::{Areal, Shape, ShapeKind};

/// Converts a shape into its canonical areal form.
///
/// | Kind | Geometry | Result |
/// |------|----------|--------|
/// | `LineString` | any | `NotAreal` |
/// | `Circle` | `Point` + positive radius | 64-gon (or `params.steps`) |
/// | `Circle` | anything else | `NotAreal` |
/// | `Polygon` / `Rectangle` | `Polygon` / `MultiPolygon` | rings as-is |
/// | `Polygon` / `Rectangle` | anything else | `NotAreal` |
///
/// Degenerate inputs are never errors; they opt out of overlap checking.
#[derive(Debug)]
pub struct Normalize<'a> {
    shape: &'a Shape,
    params: CircleParams,
}

impl<'a> Normalize<'a> {
    /// Creates a new `Normalize` operation with default circle parameters.
    #[must_use]
    pub fn new(shape: &'a Shape) -> Self {
        Self {
            shape,
            params: CircleParams::default(),
        }
    }

    /// Sets the circle approximation parameters.
    #[must_use]
    pub fn with_params(mut self, params: CircleParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the conversion.
    #[must_use]
    pub fn execute(&self) -> Areal {
        let shape = self.shape;
        match shape.kind {
            ShapeKind::LineString => Areal::NotAreal,
            ShapeKind::Circle => self.circle(),
            ShapeKind::Polygon | ShapeKind::Rectangle => match &shape.geometry {
                Geometry::Polygon(poly) => Areal::Polygonal(MultiPolygon::new(vec![poly.clone()])),
                Geometry::MultiPolygon(mp) => Areal::Polygonal(mp.clone()),
                _ => {
                    debug!(id = %shape.id, kind = %shape.kind, "non-polygonal geometry, skipping overlap checks");
                    Areal::NotAreal
                }
            },
        }
    }

    fn circle(&self) -> Areal {
        let shape = self.shape;
        let radius = match shape.radius {
            Some(r) if r.is_finite() && r > 0.0 => r,
            _ => {
                debug!(id = %shape.id, radius = ?shape.radius, "circle without usable radius, skipping overlap checks");
                return Areal::NotAreal;
            }
        };
        let Geometry::Point(center) = &shape.geometry else {
            debug!(id = %shape.id, "circle center is not a point, skipping overlap checks");
            return Areal::NotAreal;
        };
        let poly = CirclePolygon::new(*center, radius)
            .with_params(self.params)
            .execute();
        Areal::Polygonal(MultiPolygon::new(vec![poly]))
    }
}
