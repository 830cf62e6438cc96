//! Error types for trajectory validation.

/// Errors from trajectory construction and DTW input validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DtwError {
    /// Returned when an empty slice of points is provided as a trajectory.
    #[error("trajectory must contain at least one point")]
    EmptyTrajectory,

    /// Returned when a point has a NaN or infinite coordinate.
    #[error("trajectory contains non-finite coordinate at point {index}")]
    NonFiniteCoordinate {
        /// Position of the first offending point.
        index: usize,
    },
}
