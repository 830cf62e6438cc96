//! Medoid-based clustering of trajectories under the DTW distance.
//!
//! Assigns trajectories grouped by owner to their nearest medoid, and selects
//! medoid sets with seeded k-medoids over a precomputed distance matrix.

mod assign;
mod config;
mod error;
mod init;
mod kmedoids;
mod label;
mod medoid;
mod result;

pub use assign::{AssignmentMap, assign_to_nearest_medoid};
pub use config::KMedoidsConfig;
pub use error::ClusterError;
pub use label::MedoidId;
pub use medoid::MedoidSet;
pub use result::KMedoidsResult;
