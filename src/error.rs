use thiserror::Error;

/// Top-level error type for the gfxmath crate.
#[derive(Debug, Error)]
pub enum GfxError {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

/// Errors raised by vector and matrix operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MathError {
    #[error("expected {expected} matrix coefficients, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("matrix index ({row}, {column}) is out of bounds for a 4x4 matrix")]
    IndexOutOfBounds { row: usize, column: usize },

    #[error("degenerate projection volume: {axis} span is zero or non-finite")]
    DegenerateVolume { axis: &'static str },

    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

/// Errors raised by the particle simulation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("integration duration must be positive, got {0}")]
    InvalidDuration(f64),

    #[error("invalid {parameter}: {value}")]
    InvalidParameter { parameter: &'static str, value: f64 },

    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

/// Convenience type alias for results using [`GfxError`].
pub type Result<T> = std::result::Result<T, GfxError>;
