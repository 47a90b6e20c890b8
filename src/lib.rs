//! Admission engine for non-overlapping planar shapes.
//!
//! A candidate shape is checked against an ordered collection of accepted
//! shapes with [`operations::Resolve`]: enclosing an existing shape rejects
//! it, overlapping ones are subtracted from it ("auto-trim"), and a candidate
//! with nothing left is rejected. [`store::FeatureStore`] wraps the engine
//! with per-kind capacity limits and GeoJSON export.

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod math;
pub mod operations;
pub mod store;

pub use config::{CircleMetric, CircleParams, EngineConfig, ShapeLimits};
pub use error::{ShapefenceError, Result};
pub use geometry::{Areal, Shape, ShapeId, ShapeKind};
pub use operations::{Rejection, Resolution, Resolve};
pub use store::FeatureStore;
