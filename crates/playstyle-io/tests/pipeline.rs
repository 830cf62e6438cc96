//! End-to-end integration tests: JSON -> matrix/select/assign/stability -> JSON -> read back.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use playstyle_cluster::{KMedoidsConfig, MedoidId};
use playstyle_dtw::Dtw;
use playstyle_io::{
    AssignmentReader, ExperimentName, IoError, MedoidReader, ResultWriter, TrajectoryReader,
};
use playstyle_stability::{OwnerId, StabilityConfig};
use tempfile::TempDir;

/// Path to the test fixture directory.
fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read_value(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn full_pipeline_round_trip() {
    // 1. Read trajectories: 3 owners x 4 sessions x 2 runs.
    let dataset = TrajectoryReader::new(&fixture_path("runs_3x4.json"))
        .read()
        .expect("fixture should parse");
    assert_eq!(dataset.n_sessions(), 12);
    assert_eq!(dataset.n_trajectories(), 24);

    let dir = TempDir::new().unwrap();
    let writer =
        ResultWriter::new(dir.path(), ExperimentName::new("league".into()).unwrap()).unwrap();

    // 2. Pairwise matrix.
    let trajectories = dataset.trajectories();
    let matrix = Dtw::new().pairwise(&trajectories);
    let matrix_path = writer.write_matrix(&dataset, &matrix).unwrap();
    let content = read_value(&matrix_path);
    assert_eq!(content["experiment"], "league");
    assert_eq!(content["n"], 24);
    assert_eq!(content["keys"][0], "101_Arsenal");

    // 3. Medoid selection; each owner's runs form one cluster.
    let result = KMedoidsConfig::new(3).unwrap().with_seed(42).fit(&matrix).unwrap();
    assert_eq!(result.cluster_sizes(), vec![8, 8, 8]);
    let medoid_path = writer.write_medoids(&dataset, &result).unwrap();

    // 4. Medoids read back and drive assignment.
    let medoids = MedoidReader::new(&medoid_path).read().unwrap();
    assert_eq!(medoids.ids(), result.medoid_ids().as_slice());
    let assignments = medoids.assign(dataset.sessions());
    assert_eq!(assignments.len(), 12);

    let flat: Vec<MedoidId> = assignments.values().flatten().copied().collect();
    assert_eq!(flat, result.labels());

    // Every session of one owner carries the same single label.
    for (key, labels) in &assignments {
        let distinct: HashSet<_> = labels.iter().collect();
        assert_eq!(distinct.len(), 1, "session {key} mixes labels");
    }

    // 5. Assignments read back in file order.
    let assignment_path = writer.write_assignments(&assignments).unwrap();
    let labels = AssignmentReader::new(&assignment_path).read().unwrap();
    assert_eq!(labels, assignments);

    // 6. Stability: owners with one label each are always re-identified.
    let report = StabilityConfig::new()
        .with_n_trials(5)
        .with_seed(42)
        .evaluate(&labels);
    assert_eq!(report.n_owners, 3);
    assert_eq!(report.mean_top1_rate, 1.0);

    let stability_path = writer.write_stability(&report).unwrap();
    let content = read_value(&stability_path);
    assert_eq!(content["experiment"], "league");
    assert_eq!(content["mean_top1_rate"], 1.0);
    assert_eq!(content["trials"].as_array().unwrap().len(), 5);
    assert!(labels.keys().any(|k| k.owner == OwnerId::new("Everton")));
}

#[test]
fn reader_fixture_files_match_expected_errors() {
    let result = TrajectoryReader::new(&fixture_path("empty.json")).read();
    assert!(
        matches!(result, Err(IoError::EmptyDataset { .. })),
        "expected EmptyDataset, got {result:?}"
    );

    let result = TrajectoryReader::new(&fixture_path("malformed.json")).read();
    assert!(
        matches!(result, Err(IoError::JsonParse { .. })),
        "expected JsonParse, got {result:?}"
    );

    let result = TrajectoryReader::new(&fixture_path("bad_key.json")).read();
    assert!(
        matches!(result, Err(IoError::Stability(_))),
        "expected Stability, got {result:?}"
    );

    let result = TrajectoryReader::new(&fixture_path("empty_trajectory.json")).read();
    assert!(
        matches!(result, Err(IoError::InvalidTrajectory { index: 1, .. })),
        "expected InvalidTrajectory, got {result:?}"
    );

    let result = MedoidReader::new(&fixture_path("runs_3x4.json")).read();
    assert!(
        matches!(result, Err(IoError::JsonParse { .. })),
        "expected JsonParse for a trajectory file read as medoids, got {result:?}"
    );
}

#[test]
fn invalid_experiment_name_is_rejected() {
    let result = ExperimentName::new("bad name".into());
    assert!(matches!(result, Err(IoError::InvalidExperimentName { .. })));
}
