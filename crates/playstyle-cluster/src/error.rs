/// Errors from medoid assignment and k-medoids selection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClusterError {
    /// Returned when k is zero.
    #[error("k must be at least 1, got {k}")]
    InvalidK {
        /// The invalid k value provided.
        k: usize,
    },

    /// Returned when fewer trajectories are provided than the requested k.
    #[error("need at least {k} trajectories to select {k} medoids, got {n_trajectories}")]
    TooFewTrajectories {
        /// Number of trajectories provided.
        n_trajectories: usize,
        /// Requested number of medoids.
        k: usize,
    },

    /// Returned when medoid ids and medoid trajectories are not index-aligned.
    #[error("got {indices} medoid indices but {trajectories} medoid trajectories")]
    MedoidLengthMismatch {
        /// Number of medoid ids.
        indices: usize,
        /// Number of medoid trajectories.
        trajectories: usize,
    },

    /// Returned when an assignment pass is attempted with no medoids.
    #[error("medoid set must contain at least one medoid")]
    EmptyMedoidSet,

    /// Returned when a medoid index does not address the trajectory collection.
    #[error("medoid index {index} out of range for {n_trajectories} trajectories")]
    MedoidOutOfRange {
        /// The offending global index.
        index: usize,
        /// Size of the trajectory collection.
        n_trajectories: usize,
    },
}
