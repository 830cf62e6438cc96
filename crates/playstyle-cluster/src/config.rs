//! Configuration builder for k-medoids medoid selection.

use playstyle_dtw::DistanceMatrix;

use crate::error::ClusterError;
use crate::result::KMedoidsResult;

/// Configuration for k-medoids selection over a precomputed distance matrix.
///
/// Construct via [`KMedoidsConfig::new`], then chain `with_*` methods to override defaults.
///
/// # Defaults
///
/// | Parameter  | Default |
/// |------------|---------|
/// | `n_init`   | 4       |
/// | `max_iter` | 50      |
/// | `seed`     | 42      |
#[derive(Debug, Clone)]
pub struct KMedoidsConfig {
    pub(crate) k: usize,
    pub(crate) n_init: usize,
    pub(crate) max_iter: usize,
    pub(crate) seed: u64,
}

impl KMedoidsConfig {
    /// Create a new configuration selecting `k` medoids.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ClusterError::InvalidK`] | `k` is zero |
    pub fn new(k: usize) -> Result<Self, ClusterError> {
        if k == 0 {
            return Err(ClusterError::InvalidK { k });
        }
        Ok(Self {
            k,
            n_init: 4,
            max_iter: 50,
            seed: 42,
        })
    }

    /// Set the number of independently seeded restarts; the lowest-cost run wins.
    /// Zero is treated as one.
    #[must_use]
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init.max(1);
        self
    }

    /// Set the maximum number of assign/update rounds per restart.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the master seed from which restart seeds are derived.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Return the number of medoids.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Return the number of restarts.
    #[must_use]
    pub fn n_init(&self) -> usize {
        self.n_init
    }

    /// Return the maximum number of rounds per restart.
    #[must_use]
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Return the master seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Select medoids for the trajectories described by `matrix`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ClusterError::TooFewTrajectories`] | `matrix.len() < k` |
    pub fn fit(&self, matrix: &DistanceMatrix) -> Result<KMedoidsResult, ClusterError> {
        let n = matrix.len();
        if n < self.k {
            return Err(ClusterError::TooFewTrajectories {
                n_trajectories: n,
                k: self.k,
            });
        }
        Ok(crate::kmedoids::multi_restart(matrix, self))
    }
}
