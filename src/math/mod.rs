/// 2D coordinate type shared with the clipping backend.
pub type Coord = geo::Coord<f64>;

/// Global geometric tolerance for floating-point comparisons.
///
/// Relative to the candidate's area: a trimmed remainder smaller than
/// `candidate_area * TOLERANCE` is treated as empty.
pub const TOLERANCE: f64 = 1e-10;
