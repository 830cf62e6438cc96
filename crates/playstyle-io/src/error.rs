//! I/O error types for playstyle-io.

use std::path::PathBuf;

use playstyle_cluster::ClusterError;
use playstyle_dtw::DtwError;
use playstyle_stability::StabilityError;

/// Errors from file I/O, JSON parsing, and result serialization.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the input is not valid JSON of the expected shape.
    #[error("JSON parse error in {path} at line {line}, column {column}")]
    JsonParse {
        /// Path to the JSON file.
        path: PathBuf,
        /// One-based line of the error.
        line: usize,
        /// One-based column of the error.
        column: usize,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Returned when the input contains no entries.
    #[error("empty dataset (no entries) in {path}")]
    EmptyDataset {
        /// Path to the JSON file.
        path: PathBuf,
    },

    /// Returned when a trajectory in the input fails validation.
    #[error("invalid trajectory {index} of \"{key}\" in {path}")]
    InvalidTrajectory {
        /// Path to the JSON file.
        path: PathBuf,
        /// Entry key holding the trajectory.
        key: String,
        /// Position of the trajectory within its entry.
        index: usize,
        /// Underlying validation error.
        source: DtwError,
    },

    /// Returned when the experiment name contains characters outside `[a-zA-Z0-9_-]`.
    #[error("invalid experiment name \"{name}\": must match [a-zA-Z0-9_-]+")]
    InvalidExperimentName {
        /// The invalid name.
        name: String,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a result cannot be serialized.
    #[error("cannot serialize result for {path}")]
    Serialize {
        /// Destination path.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Returned when a result file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Wraps a trajectory validation error.
    #[error(transparent)]
    Dtw(#[from] DtwError),

    /// Wraps a medoid set error.
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// Wraps a session key error.
    #[error(transparent)]
    Stability(#[from] StabilityError),
}
