mod circle;
mod normalize;
mod relate;
mod resolve;

pub use circle::CirclePolygon;
pub use normalize::Normalize;
pub use relate::{relate_pair, PairRelation};
pub use resolve::{Rejection, Resolution, Resolve};
