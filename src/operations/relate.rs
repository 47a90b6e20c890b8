use geo::{MultiPolygon, Relate};

/// How the running candidate stands relative to one existing polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRelation {
    /// The candidate properly contains the existing polygon.
    Encloses,
    /// The two share area without proper containment of the existing one.
    Overlaps,
    /// No shared area; touching boundaries count as disjoint.
    Disjoint,
}

/// Classifies `current` against `existing` from a single DE-9IM matrix.
///
/// Containment takes priority over overlap. Topologically equal polygons
/// are not a proper containment and classify as `Overlaps`.
#[must_use]
pub fn relate_pair(current: &MultiPolygon<f64>, existing: &MultiPolygon<f64>) -> PairRelation {
    let im = current.relate(existing);
    if im.is_contains() && !im.is_within() {
        PairRelation::Encloses
    } else if im.is_intersects() && !im.is_touches() {
        PairRelation::Overlaps
    } else {
        PairRelation::Disjoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, Polygon};

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
        let poly: Polygon<f64> = polygon![
            (x: x0, y: y0),
            (x: x0, y: y1),
            (x: x1, y: y1),
            (x: x1, y: y0),
            (x: x0, y: y0),
        ];
        MultiPolygon::new(vec![poly])
    }

    #[test]
    fn enclosing() {
        let existing = square(0.0, 0.0, 10.0, 10.0);
        let candidate = square(-5.0, -5.0, 15.0, 15.0);
        assert_eq!(relate_pair(&candidate, &existing), PairRelation::Encloses);
    }

    #[test]
    fn enclosing_with_shared_edge() {
        let existing = square(0.0, 0.0, 10.0, 10.0);
        let candidate = square(0.0, -5.0, 15.0, 15.0);
        assert_eq!(relate_pair(&candidate, &existing), PairRelation::Encloses);
    }

    #[test]
    fn partial_overlap() {
        let existing = square(0.0, 0.0, 10.0, 10.0);
        let candidate = square(5.0, 5.0, 15.0, 15.0);
        assert_eq!(relate_pair(&candidate, &existing), PairRelation::Overlaps);
    }

    #[test]
    fn inside_is_overlap_not_enclosure() {
        let existing = square(0.0, 0.0, 10.0, 10.0);
        let candidate = square(2.0, 2.0, 4.0, 4.0);
        assert_eq!(relate_pair(&candidate, &existing), PairRelation::Overlaps);
    }

    #[test]
    fn equal_is_overlap() {
        let a = square(0.0, 0.0, 10.0, 10.0);
        assert_eq!(relate_pair(&a, &a), PairRelation::Overlaps);
    }

    #[test]
    fn touching_edges_are_disjoint() {
        let existing = square(0.0, 0.0, 10.0, 10.0);
        let candidate = square(10.0, 0.0, 20.0, 10.0);
        assert_eq!(relate_pair(&candidate, &existing), PairRelation::Disjoint);
    }

    #[test]
    fn far_apart() {
        let existing = square(0.0, 0.0, 1.0, 1.0);
        let candidate = square(5.0, 5.0, 6.0, 6.0);
        assert_eq!(relate_pair(&candidate, &existing), PairRelation::Disjoint);
    }
}
