//! JSON input/output for the playstyle pipeline.

mod domain;
mod error;
mod reader;
mod writer;

pub use domain::{ExperimentName, TrajectoryDataset};
pub use error::IoError;
pub use reader::{AssignmentReader, MedoidReader, TrajectoryReader};
pub use writer::ResultWriter;
