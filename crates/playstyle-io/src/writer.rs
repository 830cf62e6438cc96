//! JSON result writer for matrix, medoid, assignment and stability outputs.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, instrument};

use playstyle_cluster::{AssignmentMap, KMedoidsResult, MedoidId, MedoidSet};
use playstyle_dtw::{DistanceMatrix, Trajectory};
use playstyle_stability::{SessionKey, StabilityReport};

use crate::IoError;
use crate::domain::{ExperimentName, TrajectoryDataset};

/// Writes pipeline results to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{experiment}_matrix.json`, `{experiment}_medoids.json`,
/// `{experiment}_assignments.json` and `{experiment}_stability.json`.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    fn path_for(&self, artifact: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{artifact}.json", self.experiment.as_str()))
    }

    fn write_json<T: Serialize>(&self, artifact: &str, value: &T) -> Result<PathBuf, IoError> {
        let path = self.path_for(artifact);
        let json = serde_json::to_string_pretty(value).map_err(|e| IoError::Serialize {
            path: path.clone(),
            source: e,
        })?;
        fs::write(&path, json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;
        info!(path = %path.display(), "{artifact} result written");
        Ok(path)
    }

    /// Write the pairwise distance matrix to `{experiment}_matrix.json`.
    ///
    /// Row `i` of the square matrix is the `i`-th trajectory of
    /// [`TrajectoryDataset::flatten`].
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all, fields(n = matrix.len()))]
    pub fn write_matrix(
        &self,
        dataset: &TrajectoryDataset,
        matrix: &DistanceMatrix,
    ) -> Result<PathBuf, IoError> {
        let artifact = MatrixArtifact {
            experiment: self.experiment.as_str(),
            n: matrix.len(),
            keys: dataset.flatten().iter().map(|(k, _)| k.to_string()).collect(),
            distances: matrix.to_square(),
        };
        self.write_json("matrix", &artifact)
    }

    /// Write a k-medoids selection to `{experiment}_medoids.json`.
    ///
    /// The file carries `indices` and `trajectories`, so it can be read back as
    /// a medoid set.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::Cluster`] | a medoid index does not address `dataset` |
    /// | [`IoError::WriteFile`] | the file cannot be written |
    #[instrument(skip_all, fields(k = result.medoids.len()))]
    pub fn write_medoids(
        &self,
        dataset: &TrajectoryDataset,
        result: &KMedoidsResult,
    ) -> Result<PathBuf, IoError> {
        let medoids = MedoidSet::from_collection(&result.medoids, &dataset.trajectories())?;
        let flat = dataset.flatten();
        // Indices were bounds-checked against the same flattened order above.
        let keys = result.medoids.iter().map(|&i| flat[i].0.to_string()).collect();
        let trajectories = medoids.trajectories().iter().map(coords).collect();

        let artifact = MedoidArtifact {
            experiment: self.experiment.as_str(),
            k: medoids.len(),
            cost: result.cost,
            converged: result.converged,
            iterations: result.iterations,
            n_init_used: result.n_init_used,
            indices: &result.medoids,
            keys,
            cluster_sizes: result.cluster_sizes(),
            trajectories,
        };
        self.write_json("medoids", &artifact)
    }

    /// Write per-session labels to `{experiment}_assignments.json`.
    ///
    /// The file is a flat `{ "<session>_<owner>": [label, ...] }` object in
    /// input order.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all, fields(sessions = assignments.len()))]
    pub fn write_assignments(
        &self,
        assignments: &AssignmentMap<SessionKey>,
    ) -> Result<PathBuf, IoError> {
        let artifact: IndexMap<String, &[MedoidId]> = assignments
            .iter()
            .map(|(key, labels)| (key.to_string(), labels.as_slice()))
            .collect();
        self.write_json("assignments", &artifact)
    }

    /// Write a stability evaluation to `{experiment}_stability.json`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_stability(&self, report: &StabilityReport) -> Result<PathBuf, IoError> {
        let artifact = StabilityArtifact {
            experiment: self.experiment.as_str(),
            report,
        };
        self.write_json("stability", &artifact)
    }
}

fn coords(t: &Trajectory) -> Vec<[f64; 2]> {
    t.points().iter().map(|p| [p.x, p.y]).collect()
}

// --- Shadow structs for JSON serialization ---

#[derive(Serialize)]
struct MatrixArtifact<'a> {
    experiment: &'a str,
    n: usize,
    keys: Vec<String>,
    distances: Vec<Vec<f64>>,
}

#[derive(Serialize)]
struct MedoidArtifact<'a> {
    experiment: &'a str,
    k: usize,
    cost: f64,
    converged: bool,
    iterations: usize,
    n_init_used: usize,
    indices: &'a [usize],
    keys: Vec<String>,
    cluster_sizes: Vec<usize>,
    trajectories: Vec<Vec<[f64; 2]>>,
}

#[derive(Serialize)]
struct StabilityArtifact<'a> {
    experiment: &'a str,
    #[serde(flatten)]
    report: &'a StabilityReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use playstyle_cluster::{ClusterError, KMedoidsConfig};
    use playstyle_dtw::Dtw;
    use tempfile::TempDir;

    fn dataset() -> TrajectoryDataset {
        let mut sessions = IndexMap::new();
        for (key, xs) in [("1_Derby", [0.0, 0.5]), ("1_Luton", [20.0, 20.5])] {
            let runs = xs
                .iter()
                .map(|&x| Trajectory::from_xy(&[[x, 0.0], [x + 1.0, 1.0]]).unwrap())
                .collect();
            sessions.insert(key.parse().unwrap(), runs);
        }
        TrajectoryDataset::new(sessions)
    }

    fn writer(dir: &TempDir, name: &str) -> ResultWriter {
        ResultWriter::new(dir.path(), ExperimentName::new(name.into()).unwrap()).unwrap()
    }

    fn read(path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn creates_nested_output_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        ResultWriter::new(&nested, ExperimentName::new("x".into()).unwrap()).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn matrix_is_square_with_keys() {
        let dir = TempDir::new().unwrap();
        let ds = dataset();
        let matrix = Dtw::new().pairwise(&ds.trajectories());
        let path = writer(&dir, "m").write_matrix(&ds, &matrix).unwrap();

        assert_eq!(path, dir.path().join("m_matrix.json"));
        let v = read(&path);
        assert_eq!(v["n"], 4);
        assert_eq!(v["keys"][2], "1_Luton");
        let rows = v["distances"].as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1][1], 0.0);
        assert_eq!(rows[0][1], rows[1][0]);
    }

    #[test]
    fn medoids_carry_indices_and_trajectories() {
        let dir = TempDir::new().unwrap();
        let ds = dataset();
        let matrix = Dtw::new().pairwise(&ds.trajectories());
        let result = KMedoidsConfig::new(2).unwrap().fit(&matrix).unwrap();
        let path = writer(&dir, "sel").write_medoids(&ds, &result).unwrap();

        let v = read(&path);
        assert_eq!(v["k"], 2);
        assert_eq!(v["indices"].as_array().unwrap().len(), 2);
        assert_eq!(v["trajectories"].as_array().unwrap().len(), 2);
        assert_eq!(v["keys"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn medoid_index_outside_dataset_is_an_error() {
        let dir = TempDir::new().unwrap();
        let ds = dataset();
        let result = KMedoidsResult {
            medoids: vec![1, 9],
            assignments: vec![0, 0, 1, 1],
            cost: 0.0,
            converged: true,
            iterations: 1,
            n_init_used: 1,
        };
        let err = writer(&dir, "bad").write_medoids(&ds, &result).unwrap_err();
        assert!(matches!(
            err,
            IoError::Cluster(ClusterError::MedoidOutOfRange { index: 9, n_trajectories: 4 })
        ));
        assert!(!dir.path().join("bad_medoids.json").exists());
    }

    #[test]
    fn assignments_are_a_flat_ordered_object() {
        let dir = TempDir::new().unwrap();
        let mut map: AssignmentMap<SessionKey> = IndexMap::new();
        map.insert("5_Wigan".parse().unwrap(), vec![MedoidId::new(4), MedoidId::new(0)]);
        map.insert("2_Bolton".parse().unwrap(), vec![]);
        let path = writer(&dir, "a").write_assignments(&map).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.find("5_Wigan").unwrap() < content.find("2_Bolton").unwrap());
        let v: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(v["5_Wigan"], serde_json::json!([4, 0]));
    }
}
