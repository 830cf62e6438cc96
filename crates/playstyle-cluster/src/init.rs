//! D² seeding of initial medoids (private module).
//!
//! Selects initial medoid indices with probability proportional to the squared
//! distance from each candidate to the nearest already-chosen medoid, reading
//! distances from a precomputed matrix.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use playstyle_dtw::DistanceMatrix;

/// Select `k` distinct initial medoid indices from the `matrix.len()` candidates.
///
/// The first medoid is uniform; each later one is drawn with weight equal to
/// the squared distance to its nearest chosen medoid. Weighting is parallel;
/// the draw is sequential because it needs the mutable `rng`.
///
/// # Panics
///
/// Panics in debug mode if `k == 0` or `k > matrix.len()`.
#[must_use]
pub(crate) fn d2_seeding(matrix: &DistanceMatrix, k: usize, rng: &mut ChaCha8Rng) -> Vec<usize> {
    let n = matrix.len();
    debug_assert!(k > 0, "k must be at least 1");
    debug_assert!(k <= n, "k must not exceed the number of trajectories");

    let mut chosen: Vec<usize> = Vec::with_capacity(k);
    chosen.push(rng.gen_range(0..n));

    for _ in 1..k {
        let weights: Vec<f64> = (0..n)
            .into_par_iter()
            .map(|i| {
                if chosen.contains(&i) {
                    return 0.0;
                }
                let nearest = chosen
                    .iter()
                    .map(|&c| matrix.get(i, c).value())
                    .fold(f64::INFINITY, f64::min);
                nearest.powi(2)
            })
            .collect();

        let total_weight: f64 = weights.iter().sum();

        if total_weight == 0.0 {
            // Every remaining candidate duplicates a chosen medoid.
            let fallback = (0..n)
                .find(|i| !chosen.contains(i))
                .unwrap_or(n - 1);
            chosen.push(fallback);
            continue;
        }

        if !total_weight.is_finite() {
            // Squared distances overflowed; draw uniformly among the farthest candidates.
            let farthest: Vec<usize> = (0..n).filter(|&i| weights[i].is_infinite()).collect();
            chosen.push(farthest[rng.gen_range(0..farthest.len())]);
            continue;
        }

        let threshold: f64 = rng.gen_range(0.0..total_weight);
        let mut cumsum = 0.0;
        let mut selected = None;
        for (i, &w) in weights.iter().enumerate() {
            cumsum += w;
            if cumsum > threshold {
                selected = Some(i);
                break;
            }
        }
        // Rounding can leave the threshold past the last cumulative sum.
        let selected = selected.unwrap_or_else(|| {
            weights.iter().rposition(|&w| w > 0.0).unwrap_or(n - 1)
        });
        chosen.push(selected);
    }

    chosen
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use playstyle_dtw::{DistanceMatrix, Dtw, Trajectory};

    use super::d2_seeding;

    /// Nine short runs in three tight groups near x = 0, 50 and 100.
    fn grouped_matrix() -> DistanceMatrix {
        let runs: Vec<Trajectory> = [0.0, 50.0, 100.0]
            .iter()
            .flat_map(|&base| {
                (0..3).map(move |k| {
                    let x = base + f64::from(k) * 0.1;
                    Trajectory::from_xy(&[[x, 0.0], [x + 1.0, 1.0]]).unwrap()
                })
            })
            .collect();
        Dtw::new().pairwise(&runs)
    }

    #[test]
    fn returns_k_distinct_indices() {
        let m = grouped_matrix();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut idx = d2_seeding(&m, 3, &mut rng);
        assert_eq!(idx.len(), 3);
        assert!(idx.iter().all(|&i| i < 9));
        idx.sort_unstable();
        idx.dedup();
        assert_eq!(idx.len(), 3);
    }

    #[test]
    fn deterministic_with_same_seed() {
        let m = grouped_matrix();
        let a = d2_seeding(&m, 3, &mut ChaCha8Rng::seed_from_u64(42));
        let b = d2_seeding(&m, 3, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn prefers_distant_groups() {
        let m = grouped_matrix();
        let idx = d2_seeding(&m, 3, &mut ChaCha8Rng::seed_from_u64(42));
        let mut groups: Vec<usize> = idx.iter().map(|&i| i / 3).collect();
        groups.sort_unstable();
        assert_eq!(groups, vec![0, 1, 2], "indices {idx:?}");
    }

    #[test]
    fn duplicates_fall_back_to_unchosen() {
        let m = DistanceMatrix::from_fn(3, |_, _| 0.0);
        let mut idx = d2_seeding(&m, 3, &mut ChaCha8Rng::seed_from_u64(5));
        idx.sort_unstable();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn overflowing_weights_pick_farthest_candidate() {
        // Point 1 sits 1e200 away from the others; its squared distance is infinite.
        let xs = [0.0_f64, 1e200, 1.0];
        let m = DistanceMatrix::from_fn(3, |i, j| (xs[i] - xs[j]).abs());
        for seed in 0..8 {
            let idx = d2_seeding(&m, 2, &mut ChaCha8Rng::seed_from_u64(seed));
            assert_eq!(idx.len(), 2);
            assert_ne!(idx[0], idx[1]);
            if idx[0] != 1 {
                assert_eq!(idx[1], 1, "seed {seed}: {idx:?}");
            }
        }
    }

    #[test]
    fn infinite_distances_do_not_panic() {
        let m = DistanceMatrix::from_fn(4, |i, j| if i % 2 == j % 2 { 1.0 } else { f64::INFINITY });
        let idx = d2_seeding(&m, 3, &mut ChaCha8Rng::seed_from_u64(1));
        let mut sorted = idx.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
    }
}
