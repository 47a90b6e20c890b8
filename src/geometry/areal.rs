use geo::{Area, MultiPolygon};

/// Canonical form of a shape for boolean geometry operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Areal {
    /// The shape covers area; every areal kind is widened to a multipolygon.
    Polygonal(MultiPolygon<f64>),
    /// Lines and degenerate inputs: exempt from all overlap logic.
    NotAreal,
}

impl Areal {
    /// Returns the polygonal form, or `None` for non-areal shapes.
    #[must_use]
    pub fn as_polygonal(&self) -> Option<&MultiPolygon<f64>> {
        match self {
            Areal::Polygonal(mp) => Some(mp),
            Areal::NotAreal => None,
        }
    }

    /// Consumes `self`, returning the polygonal form if any.
    #[must_use]
    pub fn into_polygonal(self) -> Option<MultiPolygon<f64>> {
        match self {
            Areal::Polygonal(mp) => Some(mp),
            Areal::NotAreal => None,
        }
    }

    /// Returns the planar area, `0.0` for non-areal shapes.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.as_polygonal().map_or(0.0, |mp| mp.unsigned_area())
    }
}
