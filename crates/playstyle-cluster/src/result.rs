//! Result type for k-medoids selection.

use crate::label::MedoidId;

/// Result of the best k-medoids restart.
#[derive(Debug, Clone)]
pub struct KMedoidsResult {
    /// Selected medoids as indices into the clustered collection, in cluster order.
    pub medoids: Vec<usize>,
    /// Cluster position (into `medoids`) for each trajectory.
    pub assignments: Vec<usize>,
    /// Sum of distances from each trajectory to its medoid.
    pub cost: f64,
    /// Whether the medoids stopped changing before `max_iter`.
    pub converged: bool,
    /// Number of rounds performed in the best run.
    pub iterations: usize,
    /// Number of restarts executed.
    pub n_init_used: usize,
}

impl KMedoidsResult {
    /// Medoids as global ids, ready to build a [`MedoidSet`](crate::MedoidSet).
    #[must_use]
    pub fn medoid_ids(&self) -> Vec<MedoidId> {
        self.medoids.iter().copied().map(MedoidId::new).collect()
    }

    /// Global medoid id assigned to each trajectory.
    #[must_use]
    pub fn labels(&self) -> Vec<MedoidId> {
        self.assignments
            .iter()
            .map(|&c| MedoidId::new(self.medoids[c]))
            .collect()
    }

    /// Number of trajectories in each cluster.
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.medoids.len()];
        for &c in &self.assignments {
            sizes[c] += 1;
        }
        sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result() -> KMedoidsResult {
        KMedoidsResult {
            medoids: vec![4, 1],
            assignments: vec![1, 1, 0, 0, 0],
            cost: 2.5,
            converged: true,
            iterations: 2,
            n_init_used: 1,
        }
    }

    #[test]
    fn cluster_sizes_basic() {
        assert_eq!(make_result().cluster_sizes(), vec![3, 2]);
    }

    #[test]
    fn labels_use_global_ids() {
        let labels: Vec<usize> = make_result().labels().iter().map(|m| m.index()).collect();
        assert_eq!(labels, vec![1, 1, 4, 4, 4]);
    }
}
