//! Configuration builder for repeated split-half evaluation.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, instrument};

use playstyle_cluster::MedoidId;

use crate::domain::SessionKey;
use crate::metric::{StabilityScore, stability_metric};
use crate::split::split;

/// Configuration for split-half stability evaluation.
///
/// # Defaults
///
/// | Parameter   | Default |
/// |-------------|---------|
/// | `normalize` | `true`  |
/// | `n_trials`  | 1       |
/// | `seed`      | 42      |
#[derive(Debug, Clone)]
pub struct StabilityConfig {
    normalize: bool,
    n_trials: usize,
    seed: u64,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            normalize: true,
            n_trials: 1,
            seed: 42,
        }
    }
}

/// Outcome of [`StabilityConfig::evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StabilityReport {
    /// Mean top-1 rate over all trials.
    pub mean_top1_rate: f64,
    /// Mean top-3 rate over all trials.
    pub mean_top3_rate: f64,
    /// Number of owners in each trial.
    pub n_owners: usize,
    /// Whether halves were compared as frequencies.
    pub normalize: bool,
    /// Seed of the first trial; trial `t` used `seed + t`.
    pub seed: u64,
    /// Per-trial scores in trial order.
    pub trials: Vec<StabilityScore>,
}

impl StabilityConfig {
    /// Create a configuration with the defaults above.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare label frequencies (`true`) or raw counts (`false`).
    #[must_use]
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set the number of independently seeded splits. Zero is treated as one.
    #[must_use]
    pub fn with_n_trials(mut self, n_trials: usize) -> Self {
        self.n_trials = n_trials.max(1);
        self
    }

    /// Set the seed of the first trial.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Return whether halves are compared as frequencies.
    #[must_use]
    pub fn normalize(&self) -> bool {
        self.normalize
    }

    /// Return the number of trials.
    #[must_use]
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// Return the seed of the first trial.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run `n_trials` seeded splits and average their scores.
    #[instrument(skip(self, labels), fields(sessions = labels.len(), n_trials = self.n_trials))]
    pub fn evaluate(&self, labels: &IndexMap<SessionKey, Vec<MedoidId>>) -> StabilityReport {
        let trials: Vec<StabilityScore> = (0..self.n_trials as u64)
            .into_par_iter()
            .map(|t| {
                let profiles = split(labels, Some(self.seed.wrapping_add(t)));
                stability_metric(&profiles, self.normalize)
            })
            .collect();

        let n = trials.len() as f64;
        let report = StabilityReport {
            mean_top1_rate: trials.iter().map(|s| s.top1_rate).sum::<f64>() / n,
            mean_top3_rate: trials.iter().map(|s| s.top3_rate).sum::<f64>() / n,
            n_owners: trials.first().map_or(0, |s| s.n_owners),
            normalize: self.normalize,
            seed: self.seed,
            trials,
        };

        info!(
            mean_top1_rate = report.mean_top1_rate,
            mean_top3_rate = report.mean_top3_rate,
            "stability evaluation complete"
        );
        report
    }
}
