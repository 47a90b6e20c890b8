mod areal;
mod kind;
mod shape;

pub use areal::Areal;
pub use kind::ShapeKind;
pub use shape::{Shape, ShapeId};
