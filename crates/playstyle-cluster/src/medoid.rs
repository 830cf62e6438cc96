//! Fixed medoid sets used as cluster representatives.

use playstyle_dtw::{Dtw, DtwDistance, Trajectory, TrajectoryView};

use crate::error::ClusterError;
use crate::label::MedoidId;

/// Ordered, non-empty sequence of `(global id, trajectory)` medoids.
///
/// Position within the set decides ties: when two medoids are equally close,
/// the one that appears first wins.
#[derive(Debug, Clone)]
pub struct MedoidSet {
    ids: Vec<MedoidId>,
    trajectories: Vec<Trajectory>,
}

impl MedoidSet {
    /// Pair index-aligned medoid ids and trajectories.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ClusterError::MedoidLengthMismatch`] | `ids.len() != trajectories.len()` |
    /// | [`ClusterError::EmptyMedoidSet`] | both are empty |
    pub fn new(ids: Vec<MedoidId>, trajectories: Vec<Trajectory>) -> Result<Self, ClusterError> {
        if ids.len() != trajectories.len() {
            return Err(ClusterError::MedoidLengthMismatch {
                indices: ids.len(),
                trajectories: trajectories.len(),
            });
        }
        if ids.is_empty() {
            return Err(ClusterError::EmptyMedoidSet);
        }
        Ok(Self { ids, trajectories })
    }

    /// Pick medoids out of the collection they were selected from.
    ///
    /// `indices` address `collection`; each becomes the medoid's global id.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ClusterError::MedoidOutOfRange`] | an index is `>= collection.len()` |
    /// | [`ClusterError::EmptyMedoidSet`] | `indices` is empty |
    pub fn from_collection(indices: &[usize], collection: &[Trajectory]) -> Result<Self, ClusterError> {
        let trajectories = indices
            .iter()
            .map(|&index| {
                collection
                    .get(index)
                    .cloned()
                    .ok_or(ClusterError::MedoidOutOfRange {
                        index,
                        n_trajectories: collection.len(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(indices.iter().copied().map(MedoidId::new).collect(), trajectories)
    }

    /// Number of medoids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always `false` for a constructed set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Medoid ids in set order.
    #[must_use]
    pub fn ids(&self) -> &[MedoidId] {
        &self.ids
    }

    /// Medoid trajectories in set order.
    #[must_use]
    pub fn trajectories(&self) -> &[Trajectory] {
        &self.trajectories
    }

    /// Iterate `(id, trajectory)` pairs in set order.
    pub fn iter(&self) -> impl Iterator<Item = (MedoidId, &Trajectory)> + '_ {
        self.ids.iter().copied().zip(self.trajectories.iter())
    }

    /// Nearest medoid to `query` and its distance.
    ///
    /// Linear scan that only moves on strict improvement, so ties go to the
    /// earliest medoid. Each candidate is evaluated with the current best as an
    /// early-abandoning cutoff.
    #[must_use]
    pub fn nearest(&self, query: TrajectoryView<'_>, dtw: &Dtw) -> (MedoidId, DtwDistance) {
        let mut best_pos = 0usize;
        let mut best = DtwDistance::INFINITY;

        for (pos, medoid) in self.trajectories.iter().enumerate() {
            let d = dtw.distance_with_cutoff(query, medoid.as_view(), best.value());
            if d.value() < best.value() {
                best = d;
                best_pos = pos;
            }
        }

        (self.ids[best_pos], best)
    }
}
