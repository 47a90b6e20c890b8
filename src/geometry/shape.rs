use std::fmt;

use geo::{Geometry, LineString, Point, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ShapeKind;
use crate::math::Coord;

/// Opaque, caller-assigned identifier of a shape.
///
/// The engine never generates identifiers; it only carries them through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    /// Creates an identifier from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ShapeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ShapeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A drawn shape: the unit of input and output of the engine.
///
/// `geometry` holds a `Polygon`/`MultiPolygon` for areal kinds, the center
/// `Point` for circles and a `LineString` for lines. `radius` is only
/// meaningful for [`ShapeKind::Circle`].
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub geometry: Geometry<f64>,
    pub radius: Option<f64>,
    /// Opaque payload passed through unchanged.
    pub properties: Map<String, Value>,
}

impl Shape {
    /// Creates a shape from its raw parts with an empty property bag.
    #[must_use]
    pub fn new(
        id: impl Into<ShapeId>,
        kind: ShapeKind,
        geometry: Geometry<f64>,
        radius: Option<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            geometry,
            radius,
            properties: Map::new(),
        }
    }

    /// Creates a free-form polygon shape.
    #[must_use]
    pub fn polygon(id: impl Into<ShapeId>, polygon: Polygon<f64>) -> Self {
        Self::new(id, ShapeKind::Polygon, Geometry::Polygon(polygon), None)
    }

    /// Creates an axis-aligned rectangle spanning `min` to `max`.
    ///
    /// The ring runs `min`, `(min.x, max.y)`, `max`, `(max.x, min.y)` and back
    /// to `min`, the order drawing surfaces emit rectangles in.
    #[must_use]
    pub fn rectangle(id: impl Into<ShapeId>, min: Coord, max: Coord) -> Self {
        let ring = LineString::from(vec![
            min,
            Coord { x: min.x, y: max.y },
            max,
            Coord { x: max.x, y: min.y },
            min,
        ]);
        Self::new(
            id,
            ShapeKind::Rectangle,
            Geometry::Polygon(Polygon::new(ring, vec![])),
            None,
        )
    }

    /// Creates a circle from its center point and radius.
    #[must_use]
    pub fn circle(id: impl Into<ShapeId>, center: Point<f64>, radius: f64) -> Self {
        Self::new(id, ShapeKind::Circle, Geometry::Point(center), Some(radius))
    }

    /// Creates an open polyline shape.
    #[must_use]
    pub fn line_string(id: impl Into<ShapeId>, line: LineString<f64>) -> Self {
        Self::new(id, ShapeKind::LineString, Geometry::LineString(line), None)
    }

    /// Replaces the opaque property bag.
    #[must_use]
    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = properties;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{coord, Area};

    #[test]
    fn rectangle_ring_order() {
        let shape = Shape::rectangle("r", coord! { x: 0.0, y: 0.0 }, coord! { x: 2.0, y: 3.0 });
        let Geometry::Polygon(poly) = &shape.geometry else {
            panic!("rectangle must be a polygon");
        };
        let coords: Vec<(f64, f64)> = poly.exterior().coords().map(|c| (c.x, c.y)).collect();
        assert_eq!(
            coords,
            vec![(0.0, 0.0), (0.0, 3.0), (2.0, 3.0), (2.0, 0.0), (0.0, 0.0)]
        );
        assert!((poly.unsigned_area() - 6.0).abs() < 1e-12);
        assert_eq!(shape.kind, ShapeKind::Rectangle);
    }

    #[test]
    fn circle_keeps_radius() {
        let shape = Shape::circle("c", Point::new(78.9, 20.5), 1500.0);
        assert_eq!(shape.kind, ShapeKind::Circle);
        assert_eq!(shape.radius, Some(1500.0));
        assert!(matches!(shape.geometry, Geometry::Point(_)));
    }

    #[test]
    fn id_conversions() {
        let id: ShapeId = "abc".into();
        assert_eq!(id.as_str(), "abc");
        assert_eq!(id.to_string(), "abc");
        assert_eq!(ShapeId::from(String::from("abc")), id);
    }
}
