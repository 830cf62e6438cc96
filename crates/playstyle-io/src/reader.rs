//! JSON readers for trajectories, medoid sets and label assignments.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use playstyle_cluster::{MedoidId, MedoidSet};
use playstyle_dtw::Trajectory;
use playstyle_stability::SessionKey;

use crate::IoError;
use crate::domain::TrajectoryDataset;

/// Raw trajectory coordinates as stored on disk.
type RawTrajectory = Vec<[f64; 2]>;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, IoError> {
    let file = File::open(path).map_err(|e| IoError::FileNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| IoError::JsonParse {
        path: path.to_path_buf(),
        line: e.line(),
        column: e.column(),
        source: e,
    })
}

/// Reads session-keyed trajectories from a JSON object.
///
/// Expected format:
///
/// ```json
/// { "<session>_<owner>": [ [[x, y], [x, y], ...], ... ], ... }
/// ```
///
/// Keys keep their file order. A key may map to an empty list.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::JsonParse`] | Not a JSON object of coordinate lists |
/// | [`IoError::EmptyDataset`] | The object has no keys |
/// | [`IoError::Stability`] | A key is not `<session>_<owner>` |
/// | [`IoError::InvalidTrajectory`] | A trajectory is empty or non-finite |
pub struct TrajectoryReader {
    path: PathBuf,
}

impl TrajectoryReader {
    /// Create a new reader for the given JSON file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the file, returning a [`TrajectoryDataset`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<TrajectoryDataset, IoError> {
        let raw: IndexMap<String, Vec<RawTrajectory>> = read_json(&self.path)?;
        if raw.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        let mut sessions = IndexMap::with_capacity(raw.len());
        for (key, runs) in raw {
            let session: SessionKey = key.parse()?;
            let trajectories = runs
                .iter()
                .enumerate()
                .map(|(index, coords)| {
                    Trajectory::from_xy(coords).map_err(|source| IoError::InvalidTrajectory {
                        path: self.path.clone(),
                        key: key.clone(),
                        index,
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            debug!(%session, n = trajectories.len(), "session parsed");
            sessions.insert(session, trajectories);
        }

        let dataset = TrajectoryDataset::new(sessions);
        info!(
            sessions = dataset.n_sessions(),
            trajectories = dataset.n_trajectories(),
            "dataset loaded"
        );
        Ok(dataset)
    }
}

#[derive(Deserialize)]
struct MedoidFile {
    indices: Vec<usize>,
    trajectories: Vec<RawTrajectory>,
}

/// Reads a medoid set from a JSON object with index-aligned arrays.
///
/// Expected format:
///
/// ```json
/// { "indices": [12, 99], "trajectories": [ [[x, y], ...], [[x, y], ...] ] }
/// ```
///
/// Extra fields are ignored, so a medoid artifact written by
/// [`ResultWriter::write_medoids`](crate::ResultWriter::write_medoids) reads back directly.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::JsonParse`] | Missing fields or wrong shape |
/// | [`IoError::Dtw`] | A medoid trajectory is empty or non-finite |
/// | [`IoError::Cluster`] | The arrays differ in length or are empty |
pub struct MedoidReader {
    path: PathBuf,
}

impl MedoidReader {
    /// Create a new reader for the given JSON file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the file, returning a [`MedoidSet`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<MedoidSet, IoError> {
        let raw: MedoidFile = read_json(&self.path)?;
        let trajectories = raw
            .trajectories
            .iter()
            .map(|coords| Trajectory::from_xy(coords))
            .collect::<Result<Vec<_>, _>>()?;
        let ids = raw.indices.into_iter().map(MedoidId::new).collect();
        let medoids = MedoidSet::new(ids, trajectories)?;
        info!(k = medoids.len(), "medoids loaded");
        Ok(medoids)
    }
}

/// Reads per-session label sequences from a JSON object.
///
/// Expected format:
///
/// ```json
/// { "<session>_<owner>": [label, label, ...], ... }
/// ```
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::JsonParse`] | Not a JSON object of integer lists |
/// | [`IoError::Stability`] | A key is not `<session>_<owner>` |
pub struct AssignmentReader {
    path: PathBuf,
}

impl AssignmentReader {
    /// Create a new reader for the given JSON file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read the file into an ordered session-key to labels map.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<IndexMap<SessionKey, Vec<MedoidId>>, IoError> {
        let raw: IndexMap<String, Vec<MedoidId>> = read_json(&self.path)?;
        let labels = raw
            .into_iter()
            .map(|(key, labels)| Ok((key.parse::<SessionKey>()?, labels)))
            .collect::<Result<IndexMap<_, _>, IoError>>()?;
        info!(sessions = labels.len(), "assignments loaded");
        Ok(labels)
    }
}
