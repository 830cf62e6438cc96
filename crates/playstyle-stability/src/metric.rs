//! Split-half re-identification rates.

use std::borrow::Cow;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, instrument};

use crate::histogram::{LabelHistogram, manhattan_distance};
use crate::split::OwnerProfiles;

/// Fraction of owners whose half A finds their own half B among all profiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StabilityScore {
    /// Own half B ranked nearest.
    pub top1_rate: f64,
    /// Own half B ranked within the three nearest.
    pub top3_rate: f64,
    /// Number of owners evaluated.
    pub n_owners: usize,
}

impl StabilityScore {
    /// Score of an empty evaluation.
    pub const EMPTY: Self = Self {
        top1_rate: 0.0,
        top3_rate: 0.0,
        n_owners: 0,
    };
}

/// Rank of owner `owner`'s half B among every registry profile except its own
/// half A, ordered by distance to that half A.
///
/// Registry slots are `2 * owner` for half A and `2 * owner + 1` for half B.
/// The sort is stable, so equal distances keep registry order.
fn rank_of_own_half(registry: &[Cow<'_, LabelHistogram>], owner: usize) -> usize {
    let query_slot = 2 * owner;
    let target_slot = query_slot + 1;
    let query = &registry[query_slot];

    let mut ranked: Vec<(usize, f64)> = registry
        .iter()
        .enumerate()
        .filter(|&(slot, _)| slot != query_slot)
        .map(|(slot, profile)| (slot, manhattan_distance(query, profile)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    ranked
        .iter()
        .position(|&(slot, _)| slot == target_slot)
        .unwrap_or(ranked.len())
}

/// Top-1 and top-3 re-identification rates over all owners.
///
/// With `normalize` each half is first rescaled to label frequencies, so owners
/// with many sessions are compared on style rather than volume. Zero owners
/// yield rates of `0.0`.
#[instrument(skip(profiles), fields(owners = profiles.len()))]
pub fn stability_metric(profiles: &OwnerProfiles, normalize: bool) -> StabilityScore {
    let n_owners = profiles.len();
    if n_owners == 0 {
        return StabilityScore::EMPTY;
    }

    let registry: Vec<Cow<'_, LabelHistogram>> = profiles
        .values()
        .flat_map(|pair| [&pair.half_a, &pair.half_b])
        .map(|h| {
            if normalize {
                Cow::Owned(h.normalized())
            } else {
                Cow::Borrowed(h)
            }
        })
        .collect();

    let ranks: Vec<usize> = (0..n_owners)
        .into_par_iter()
        .map(|owner| rank_of_own_half(&registry, owner))
        .collect();

    let top1 = ranks.iter().filter(|&&r| r == 0).count();
    let top3 = ranks.iter().filter(|&&r| r < 3).count();
    let score = StabilityScore {
        top1_rate: top1 as f64 / n_owners as f64,
        top3_rate: top3 as f64 / n_owners as f64,
        n_owners,
    };

    info!(
        top1_rate = score.top1_rate,
        top3_rate = score.top3_rate,
        n_owners,
        "stability computed"
    );
    score
}
