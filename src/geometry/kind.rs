use std::fmt;

use serde::{Deserialize, Serialize};

/// The drawing primitive a shape was created as.
///
/// `Polygon` and `Rectangle` are geometrically identical closed rings; the
/// distinction is a caller-supplied label that trimming overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Polygon,
    Rectangle,
    Circle,
    LineString,
}

impl ShapeKind {
    /// Every kind, in the order limits and statistics are reported.
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Polygon,
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::LineString,
    ];

    /// Returns the name used for this kind in GeoJSON `shapeType` properties.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Polygon => "Polygon",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::LineString => "LineString",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
