//! Error types for scene construction and render configuration.

use thiserror::Error;

/// Invalid parameters passed to a geometry, light or camera constructor.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstructionError {
    #[error("attenuation coefficients must be non-negative and not all zero")]
    InvalidAttenuation,

    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("height must be positive, got {0}")]
    NonPositiveHeight(f64),

    #[error("{0} vector must be non-zero")]
    ZeroVector(&'static str),

    #[error("vertices are degenerate (collinear or repeated)")]
    DegenerateVertices,

    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("polygon vertices are not coplanar")]
    NonCoplanarVertices,

    #[error("polygon is not convex")]
    NonConvexPolygon,

    #[error("camera forward and up vectors are not orthogonal")]
    NotOrthogonal,
}

/// A render was requested with missing or invalid settings.
///
/// Always reported before the first ray is cast.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("camera viewport size is not set")]
    MissingViewportSize,

    #[error("camera viewport distance is not set")]
    MissingViewportDistance,

    #[error("output target has no pixels ({width}x{height})")]
    EmptyTarget { width: u32, height: u32 },

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("max recursion depth must be at least 1")]
    ZeroDepth,

    #[error("color tolerance must be a non-negative number, got {0}")]
    InvalidTolerance(f64),

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
