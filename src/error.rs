use thiserror::Error;

use crate::geometry::{ShapeId, ShapeKind};

/// Top-level error type for the shapefence engine.
///
/// Geometric rejections are not errors; see [`crate::operations::Rejection`].
#[derive(Debug, Error)]
pub enum ShapefenceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by the feature store before the engine is consulted.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Limit reached for {kind} ({limit})")]
    LimitReached { kind: ShapeKind, limit: usize },

    #[error("shape id already present: {0}")]
    DuplicateId(ShapeId),
}

/// Errors related to GeoJSON import and export.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("malformed GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometry(String),

    #[error("feature is missing the `{0}` property")]
    MissingProperty(&'static str),

    #[error("position needs at least two ordinates, got {0}")]
    ShortPosition(usize),

    #[error("invalid `{key}` property: {reason}")]
    InvalidProperty { key: &'static str, reason: String },
}

/// Errors related to engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidParameters(String),

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`ShapefenceError`].
pub type Result<T> = std::result::Result<T, ShapefenceError>;
