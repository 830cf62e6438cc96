//! Alternating k-medoids over a precomputed distance matrix.
//!
//! Provides the assign/update loop and multi-restart orchestration used by
//! [`KMedoidsConfig::fit`](crate::KMedoidsConfig::fit).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use playstyle_dtw::DistanceMatrix;

use crate::config::KMedoidsConfig;
use crate::init::d2_seeding;
use crate::result::KMedoidsResult;

// ── Internal run result ───────────────────────────────────────────────────────

struct SingleRun {
    medoids: Vec<usize>,
    assignments: Vec<usize>,
    cost: f64,
    converged: bool,
    iterations: usize,
}

// ── assign ────────────────────────────────────────────────────────────────────

/// Assign each trajectory to its nearest medoid and return the total cost.
///
/// Ties resolve to the lowest position in `medoids`.
pub(crate) fn assign(matrix: &DistanceMatrix, medoids: &[usize]) -> (Vec<usize>, f64) {
    let results: Vec<(usize, f64)> = (0..matrix.len())
        .into_par_iter()
        .map(|i| {
            let mut best = 0usize;
            let mut best_dist = f64::INFINITY;
            for (c, &m) in medoids.iter().enumerate() {
                let d = matrix.get(i, m).value();
                if d < best_dist {
                    best_dist = d;
                    best = c;
                }
            }
            (best, best_dist)
        })
        .collect();

    let cost = results.iter().map(|(_, d)| d).sum();
    (results.into_iter().map(|(c, _)| c).collect(), cost)
}

// ── update ────────────────────────────────────────────────────────────────────

/// Move each medoid to the member minimizing the summed distance to its cluster.
///
/// The current medoid is kept unless another member is strictly better, so the
/// loop terminates. An empty cluster keeps its previous medoid.
pub(crate) fn update(matrix: &DistanceMatrix, assignments: &[usize], medoids: &[usize]) -> Vec<usize> {
    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); medoids.len()];
    for (i, &c) in assignments.iter().enumerate() {
        groups[c].push(i);
    }

    groups
        .par_iter()
        .zip(medoids.par_iter())
        .enumerate()
        .map(|(c, (members, &current))| {
            if members.is_empty() {
                warn!(cluster = c, medoid = current, "empty cluster keeps its medoid");
                return current;
            }
            let within = |candidate: usize| -> f64 {
                members.iter().map(|&j| matrix.get(candidate, j).value()).sum()
            };
            let mut best = current;
            let mut best_cost = within(current);
            for &candidate in members {
                let cost = within(candidate);
                if cost < best_cost {
                    best_cost = cost;
                    best = candidate;
                }
            }
            best
        })
        .collect()
}

// ── run_once ──────────────────────────────────────────────────────────────────

#[instrument(skip(matrix, config), fields(k = config.k))]
fn run_once(matrix: &DistanceMatrix, config: &KMedoidsConfig, seed: u64) -> SingleRun {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut medoids = d2_seeding(matrix, config.k, &mut rng);
    let (mut assignments, mut cost) = assign(matrix, &medoids);

    let mut converged = false;
    let mut iterations = 0usize;

    for iteration in 0..config.max_iter {
        iterations = iteration + 1;

        let next = update(matrix, &assignments, &medoids);
        if next == medoids {
            converged = true;
            debug!(iteration, "medoids stable");
            break;
        }
        medoids = next;
        (assignments, cost) = assign(matrix, &medoids);

        debug!(iteration, cost, "iteration complete");
    }

    info!(seed, iterations, cost, converged, "single restart complete");

    SingleRun {
        medoids,
        assignments,
        cost,
        converged,
        iterations,
    }
}

// ── multi_restart ─────────────────────────────────────────────────────────────

/// Run `config.n_init` restarts in parallel and keep the lowest-cost one.
///
/// Sub-seeds are drawn from a generator seeded with `config.seed`, so the result
/// is reproducible. Equal costs keep the earlier restart.
#[instrument(skip(matrix, config), fields(n = matrix.len(), k = config.k, n_init = config.n_init))]
pub(crate) fn multi_restart(matrix: &DistanceMatrix, config: &KMedoidsConfig) -> KMedoidsResult {
    let mut master_rng = ChaCha8Rng::seed_from_u64(config.seed);
    let seeds: Vec<u64> = (0..config.n_init).map(|_| master_rng.r#gen()).collect();
    let n_init = seeds.len();

    let runs: Vec<SingleRun> = seeds
        .into_par_iter()
        .map(|seed| run_once(matrix, config, seed))
        .collect();

    // min_by keeps the first of equally cheap restarts.
    let best = runs
        .into_iter()
        .min_by(|a, b| a.cost.total_cmp(&b.cost))
        .expect("n_init >= 1 is enforced by the config builder");

    info!(k = config.k, n_init, best_cost = best.cost, "multi-restart complete");

    KMedoidsResult {
        medoids: best.medoids,
        assignments: best.assignments,
        cost: best.cost,
        converged: best.converged,
        iterations: best.iterations,
        n_init_used: n_init,
    }
}
