//! DTW distance computation for 2-D movement trajectories.
//!
//! Pure math library with zero I/O. Provides classic Dynamic Time Warping with a
//! Euclidean local cost, warping path extraction, early-abandoning distances for
//! nearest-neighbour search, and parallel pairwise distance matrices.

mod distance;
mod dtw;
mod error;
mod matrix;
mod path;
mod trajectory;

pub use distance::DtwDistance;
pub use dtw::{Dtw, PROGRESS_INTERVAL, distance_matrix, pairwise_distance};
pub use error::DtwError;
pub use matrix::DistanceMatrix;
pub use path::{WarpingPath, WarpingStep};
pub use trajectory::{Point, Trajectory, TrajectoryView};
