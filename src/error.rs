//! Unified error handling for the thinning optimizer.

use thiserror::Error;

use crate::model::SolveStatus;

/// Errors that can occur during thinning optimization.
#[derive(Debug, Error)]
pub enum ThinningError {
    /// Spacing threshold must be a positive, finite number of meters.
    #[error("spacing threshold must be positive, got {0} m")]
    NonPositiveSpacing(f64),

    /// A candidate tree has non-finite or out-of-range coordinates.
    #[error("tree {index} has invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinate {
        index: usize,
        latitude: f64,
        longitude: f64,
    },

    /// A candidate tree has a non-finite optimization weight.
    #[error("tree {index} has non-finite weight {weight}")]
    InvalidWeight { index: usize, weight: f64 },

    /// The number of weights does not match the number of points.
    #[error("weight count {weights} does not match point count {points}")]
    WeightCountMismatch { points: usize, weights: usize },

    /// The solver finished without a usable solution.
    #[error("solver found no usable solution (status: {status:?})")]
    NoSolution { status: SolveStatus },

    /// The solver backend reported an internal failure.
    #[error("solver backend failed: {0}")]
    SolverFailure(String),

    /// The solver returned a wrong number of variable values.
    #[error("solver returned {got} variable values, expected {expected}")]
    AssignmentLengthMismatch { expected: usize, got: usize },
}

/// Result type alias using [`ThinningError`].
pub type Result<T> = std::result::Result<T, ThinningError>;
