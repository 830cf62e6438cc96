//! Domain types for playstyle-io.

use indexmap::IndexMap;

use playstyle_dtw::Trajectory;
use playstyle_stability::SessionKey;

use crate::IoError;

/// A validated experiment name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trajectories grouped by session key, in file order.
///
/// Produced by [`TrajectoryReader`](crate::TrajectoryReader). The global index
/// of a trajectory is its position in [`TrajectoryDataset::flatten`].
#[derive(Debug, Clone, Default)]
pub struct TrajectoryDataset {
    sessions: IndexMap<SessionKey, Vec<Trajectory>>,
}

impl TrajectoryDataset {
    pub(crate) fn new(sessions: IndexMap<SessionKey, Vec<Trajectory>>) -> Self {
        Self { sessions }
    }

    /// Number of session keys.
    #[must_use]
    pub fn n_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Total number of trajectories over all sessions.
    #[must_use]
    pub fn n_trajectories(&self) -> usize {
        self.sessions.values().map(Vec::len).sum()
    }

    /// Session-keyed trajectories, ready for nearest-medoid assignment.
    #[must_use]
    pub fn sessions(&self) -> &IndexMap<SessionKey, Vec<Trajectory>> {
        &self.sessions
    }

    /// Every trajectory with its session key, in global index order.
    #[must_use]
    pub fn flatten(&self) -> Vec<(&SessionKey, &Trajectory)> {
        self.sessions
            .iter()
            .flat_map(|(key, runs)| runs.iter().map(move |t| (key, t)))
            .collect()
    }

    /// Owned copies of every trajectory, in global index order.
    #[must_use]
    pub fn trajectories(&self) -> Vec<Trajectory> {
        self.sessions.values().flatten().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traj(x: f64) -> Trajectory {
        Trajectory::from_xy(&[[x, 0.0], [x, 1.0]]).unwrap()
    }

    #[test]
    fn experiment_name_valid() {
        let name = ExperimentName::new("wingers-2023_v2".to_string());
        assert!(name.is_ok());
        assert_eq!(name.unwrap().as_str(), "wingers-2023_v2");
    }

    #[test]
    fn experiment_name_rejects_empty() {
        let name = ExperimentName::new(String::new());
        assert!(matches!(name, Err(IoError::InvalidExperimentName { .. })));
    }

    #[test]
    fn experiment_name_rejects_special_chars() {
        let name = ExperimentName::new("../escape".to_string());
        assert!(matches!(name, Err(IoError::InvalidExperimentName { .. })));
    }

    #[test]
    fn flatten_follows_file_order() {
        let mut sessions = IndexMap::new();
        sessions.insert("2_Hull".parse::<SessionKey>().unwrap(), vec![traj(0.0), traj(1.0)]);
        sessions.insert("1_Hull".parse::<SessionKey>().unwrap(), vec![]);
        sessions.insert("1_Bury".parse::<SessionKey>().unwrap(), vec![traj(2.0)]);
        let ds = TrajectoryDataset::new(sessions);

        assert_eq!(ds.n_sessions(), 3);
        assert_eq!(ds.n_trajectories(), 3);

        let flat = ds.flatten();
        let keys: Vec<String> = flat.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["2_Hull", "2_Hull", "1_Bury"]);
        assert_eq!(*flat[2].1, traj(2.0));
        assert_eq!(ds.trajectories()[1], traj(1.0));
    }
}
