use geo::{Area, BooleanOps, Geometry, MultiPolygon};
use thiserror::Error;
use tracing::debug;

use super::{relate_pair, Normalize, PairRelation};
use crate::config::CircleParams;
use crate::geometry::{Shape, ShapeId, ShapeKind};
use crate::math::TOLERANCE;

/// Why a candidate was refused. Rejections are outcomes, not faults: the
/// caller reports the message and leaves its collection untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Cannot fully enclose an existing shape.")]
    EnclosesExisting { existing: ShapeId },

    #[error("Shape is fully inside an existing shape.")]
    InsideExisting { existing: ShapeId },
}

impl Rejection {
    /// Returns the id of the existing shape that caused the rejection.
    #[must_use]
    pub fn existing_id(&self) -> &ShapeId {
        match self {
            Rejection::EnclosesExisting { existing } | Rejection::InsideExisting { existing } => {
                existing
            }
        }
    }
}

/// The decision for one candidate shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The shape to store: the candidate itself, or its trimmed remainder.
    Accepted(Shape),
    Rejected(Rejection),
}

impl Resolution {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Resolution::Accepted(_))
    }

    /// Returns the accepted shape, if any.
    #[must_use]
    pub fn accepted(&self) -> Option<&Shape> {
        match self {
            Resolution::Accepted(shape) => Some(shape),
            Resolution::Rejected(_) => None,
        }
    }

    /// Returns the rejection, if any.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Resolution::Accepted(_) => None,
            Resolution::Rejected(rejection) => Some(rejection),
        }
    }
}

/// Accumulator threaded through the fold over existing shapes.
#[derive(Debug)]
enum Fold {
    /// No difference has been applied; the candidate polygon stands.
    Unchanged,
    /// The remainder after subtracting every overlap seen so far.
    Trimmed(MultiPolygon<f64>),
}

impl Fold {
    fn current<'a>(&'a self, original: &'a MultiPolygon<f64>) -> &'a MultiPolygon<f64> {
        match self {
            Fold::Unchanged => original,
            Fold::Trimmed(remainder) => remainder,
        }
    }
}

/// Decides whether a candidate shape may join an existing collection.
///
/// # Algorithm
///
/// 1. Non-areal candidates (lines, degenerate circles) are accepted as-is.
/// 2. Fold over `existing` in collection order, skipping non-areal members:
///    - if the running remainder properly contains the existing polygon,
///      reject (`EnclosesExisting`);
///    - if they share area, subtract the existing polygon; an empty
///      remainder rejects (`InsideExisting`);
///    - otherwise continue unchanged.
/// 3. An untouched candidate is returned exactly as given. A trimmed one is
///    returned as a `Polygon` kind carrying the remainder (a `MultiPolygon`
///    when the pieces are disjoint) with the same id and properties.
///
/// Containment is evaluated against the remainder at each step, not against
/// the pristine candidate, so the result depends on collection order.
#[derive(Debug)]
pub struct Resolve<'a> {
    candidate: &'a Shape,
    existing: &'a [Shape],
    params: CircleParams,
}

impl<'a> Resolve<'a> {
    /// Creates a new `Resolve` operation with default circle parameters.
    #[must_use]
    pub fn new(candidate: &'a Shape, existing: &'a [Shape]) -> Self {
        Self {
            candidate,
            existing,
            params: CircleParams::default(),
        }
    }

    /// Sets the circle approximation parameters used for every shape.
    #[must_use]
    pub fn with_params(mut self, params: CircleParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the resolution.
    #[must_use]
    pub fn execute(&self) -> Resolution {
        let candidate = self.candidate;
        let Some(original) = Normalize::new(candidate)
            .with_params(self.params)
            .execute()
            .into_polygonal()
        else {
            debug!(id = %candidate.id, kind = %candidate.kind, "not areal, accepted unchanged");
            return Resolution::Accepted(candidate.clone());
        };

        let fold = self
            .existing
            .iter()
            .try_fold(Fold::Unchanged, |fold, existing| {
                self.step(&original, fold, existing)
            });

        match fold {
            Err(rejection) => {
                debug!(id = %candidate.id, existing = %rejection.existing_id(), %rejection, "rejected");
                Resolution::Rejected(rejection)
            }
            Ok(Fold::Trimmed(remainder)) if remainder != original => {
                debug!(id = %candidate.id, pieces = remainder.0.len(), "accepted trimmed");
                Resolution::Accepted(self.trimmed(remainder))
            }
            Ok(_) => {
                debug!(id = %candidate.id, "accepted unchanged");
                Resolution::Accepted(candidate.clone())
            }
        }
    }

    fn step(
        &self,
        original: &MultiPolygon<f64>,
        fold: Fold,
        existing: &Shape,
    ) -> Result<Fold, Rejection> {
        let Some(other) = Normalize::new(existing)
            .with_params(self.params)
            .execute()
            .into_polygonal()
        else {
            return Ok(fold);
        };

        let current = fold.current(original);
        match relate_pair(current, &other) {
            PairRelation::Encloses => Err(Rejection::EnclosesExisting {
                existing: existing.id.clone(),
            }),
            PairRelation::Overlaps => {
                let remainder = current.difference(&other);
                if remainder.0.is_empty()
                    || remainder.unsigned_area() <= original.unsigned_area() * TOLERANCE
                {
                    return Err(Rejection::InsideExisting {
                        existing: existing.id.clone(),
                    });
                }
                debug!(
                    id = %self.candidate.id,
                    existing = %existing.id,
                    area = remainder.unsigned_area(),
                    "trimmed overlap"
                );
                Ok(Fold::Trimmed(remainder))
            }
            PairRelation::Disjoint => Ok(fold),
        }
    }

    fn trimmed(&self, mut remainder: MultiPolygon<f64>) -> Shape {
        let geometry = if remainder.0.len() == 1 {
            Geometry::Polygon(remainder.0.remove(0))
        } else {
            Geometry::MultiPolygon(remainder)
        };
        Shape {
            id: self.candidate.id.clone(),
            kind: ShapeKind::Polygon,
            geometry,
            radius: None,
            properties: self.candidate.properties.clone(),
        }
    }
}
