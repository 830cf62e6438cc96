//! Nearest-medoid assignment for trajectories grouped by owner.

use std::hash::Hash;

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{info, instrument};

use playstyle_dtw::{Dtw, Trajectory};

use crate::error::ClusterError;
use crate::label::MedoidId;
use crate::medoid::MedoidSet;

/// Owner key to one medoid id per trajectory, in input order.
pub type AssignmentMap<K> = IndexMap<K, Vec<MedoidId>>;

impl MedoidSet {
    /// Assign every trajectory of every owner to its nearest medoid.
    ///
    /// Output keys and their order match `grouped`; each owner's sequence has
    /// one entry per input trajectory. Nearest-medoid searches are independent
    /// and run in parallel across all trajectories of all owners.
    #[must_use]
    #[instrument(skip(self, grouped), fields(k = self.len(), owners = grouped.len()))]
    pub fn assign<K>(&self, grouped: &IndexMap<K, Vec<Trajectory>>) -> AssignmentMap<K>
    where
        K: Hash + Eq + Clone,
    {
        let dtw = Dtw::new();

        let jobs: Vec<&Trajectory> = grouped.values().flatten().collect();
        let labels: Vec<MedoidId> = jobs
            .par_iter()
            .map(|t| self.nearest(t.as_view(), &dtw).0)
            .collect();

        let mut out = IndexMap::with_capacity(grouped.len());
        let mut rest = labels.as_slice();
        for (owner, trajectories) in grouped {
            let (mine, tail) = rest.split_at(trajectories.len());
            out.insert(owner.clone(), mine.to_vec());
            rest = tail;
        }

        info!(trajectories = jobs.len(), "assignment complete");
        out
    }
}

/// Assign each owner's trajectories to the nearest of the given medoids.
///
/// `medoid_indices[i]` is the global id recorded for `medoid_trajectories[i]`.
/// Ties resolve to the lowest position in the medoid sequence.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ClusterError::MedoidLengthMismatch`] | the two medoid slices differ in length |
/// | [`ClusterError::EmptyMedoidSet`] | no medoids were given |
pub fn assign_to_nearest_medoid<K>(
    medoid_indices: &[usize],
    medoid_trajectories: &[Trajectory],
    grouped: &IndexMap<K, Vec<Trajectory>>,
) -> Result<AssignmentMap<K>, ClusterError>
where
    K: Hash + Eq + Clone,
{
    let medoids = MedoidSet::new(
        medoid_indices.iter().copied().map(MedoidId::new).collect(),
        medoid_trajectories.to_vec(),
    )?;
    Ok(medoids.assign(grouped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traj(coords: &[[f64; 2]]) -> Trajectory {
        Trajectory::from_xy(coords).unwrap()
    }

    fn m0() -> Trajectory {
        traj(&[[0.0, 0.0], [1.0, 1.0]])
    }

    fn m1() -> Trajectory {
        traj(&[[10.0, 10.0], [11.0, 11.0]])
    }

    #[test]
    fn identical_trajectory_gets_its_medoid_global_index() {
        let mut grouped = IndexMap::new();
        grouped.insert("club", vec![m0()]);
        let out = assign_to_nearest_medoid(&[12, 99], &[m0(), m1()], &grouped).unwrap();
        assert_eq!(out["club"], vec![MedoidId::new(12)]);
    }

    #[test]
    fn preserves_owner_order_and_lengths() {
        let mut grouped = IndexMap::new();
        grouped.insert("b", vec![m1(), m0(), traj(&[[9.0, 9.0]])]);
        grouped.insert("a", vec![]);
        grouped.insert("c", vec![traj(&[[0.5, 0.5], [1.0, 1.0], [1.5, 1.5]])]);

        let out = assign_to_nearest_medoid(&[3, 8], &[m0(), m1()], &grouped).unwrap();

        let keys: Vec<&str> = out.keys().copied().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(
            out["b"],
            vec![MedoidId::new(8), MedoidId::new(3), MedoidId::new(8)]
        );
        assert!(out["a"].is_empty());
        assert_eq!(out["c"], vec![MedoidId::new(3)]);
    }

    #[test]
    fn mismatched_medoid_slices_fail() {
        let grouped: IndexMap<&str, Vec<Trajectory>> = IndexMap::new();
        let err = assign_to_nearest_medoid(&[1, 2], &[m0()], &grouped).unwrap_err();
        assert_eq!(
            err,
            ClusterError::MedoidLengthMismatch { indices: 2, trajectories: 1 }
        );
    }

    #[test]
    fn no_medoids_fails() {
        let grouped: IndexMap<&str, Vec<Trajectory>> = IndexMap::new();
        let err = assign_to_nearest_medoid(&[], &[], &grouped).unwrap_err();
        assert_eq!(err, ClusterError::EmptyMedoidSet);
    }

    #[test]
    fn deterministic_across_runs() {
        let mut grouped = IndexMap::new();
        for owner in 0..5u32 {
            let runs: Vec<Trajectory> = (0..20)
                .map(|i| {
                    let v = f64::from(owner) * 2.0 + f64::from(i) * 0.37;
                    traj(&[[v, 0.0], [v + 1.0, v.sin()]])
                })
                .collect();
            grouped.insert(owner, runs);
        }
        let set = MedoidSet::new(
            vec![MedoidId::new(0), MedoidId::new(1), MedoidId::new(2)],
            vec![traj(&[[0.0, 0.0]]), traj(&[[5.0, 0.0]]), traj(&[[10.0, 0.0]])],
        )
        .unwrap();
        assert_eq!(set.assign(&grouped), set.assign(&grouped));
    }
}
