//! DTW distance computation.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{info, instrument};

use crate::distance::DtwDistance;
use crate::error::DtwError;
use crate::matrix::{DistanceMatrix, pair_count};
use crate::path::{WarpingPath, WarpingStep};
use crate::trajectory::{Point, Trajectory, TrajectoryView};

/// Completed matrix rows between two progress log events.
pub const PROGRESS_INTERVAL: usize = 5000;

/// Immutable DTW calculator. Thread-safe and copyable.
///
/// Local cost is the Euclidean distance between aligned points; the result is
/// the accumulated cost along the optimal warping path with no normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dtw {
    progress_interval: usize,
}

impl Default for Dtw {
    fn default() -> Self {
        Self::new()
    }
}

impl Dtw {
    /// Create a DTW calculator with the default progress interval.
    #[must_use]
    pub fn new() -> Self {
        Self {
            progress_interval: PROGRESS_INTERVAL,
        }
    }

    /// Set how many completed rows separate progress notifications during
    /// [`pairwise`][Dtw::pairwise]. Zero is treated as one.
    #[must_use]
    pub fn with_progress_interval(mut self, rows: usize) -> Self {
        self.progress_interval = rows.max(1);
        self
    }

    /// Return the progress interval in rows.
    #[must_use]
    pub fn progress_interval(&self) -> usize {
        self.progress_interval
    }

    /// Compute the DTW distance between two trajectories.
    ///
    /// Uses a rolling two-row buffer sized to the shorter trajectory: O(n * m)
    /// time and O(min(n, m)) space.
    #[must_use]
    pub fn distance(&self, a: TrajectoryView<'_>, b: TrajectoryView<'_>) -> DtwDistance {
        DtwDistance::new(rolling_cost(a.as_slice(), b.as_slice(), None))
    }

    /// Compute DTW distance with early abandoning.
    ///
    /// Returns [`DtwDistance::INFINITY`] as soon as the accumulated cost is known
    /// to exceed `cutoff`. Exact: a finite result always equals
    /// [`distance`][Dtw::distance], and a distance equal to `cutoff` is returned
    /// rather than abandoned.
    #[must_use]
    pub fn distance_with_cutoff(
        &self,
        a: TrajectoryView<'_>,
        b: TrajectoryView<'_>,
        cutoff: f64,
    ) -> DtwDistance {
        DtwDistance::new(rolling_cost(a.as_slice(), b.as_slice(), Some(cutoff)))
    }

    /// Compute the DTW distance and the optimal warping path.
    ///
    /// Allocates the full `(n+1) x (m+1)` cost table as one contiguous arena.
    /// Use [`distance`][Dtw::distance] when only the scalar is needed.
    #[must_use]
    pub fn distance_and_path(
        &self,
        a: TrajectoryView<'_>,
        b: TrajectoryView<'_>,
    ) -> (DtwDistance, WarpingPath) {
        let table = CostTable::fill(a.as_slice(), b.as_slice());
        let steps = table.traceback();
        (DtwDistance::new(table.total()), WarpingPath::new(steps))
    }

    /// Compute pairwise DTW distances for a collection of trajectories.
    ///
    /// Each unordered pair is evaluated once; rows are computed in parallel with
    /// rayon. Emits an `info!` event every `progress_interval` completed rows.
    #[must_use]
    #[instrument(skip(self, trajectories), fields(n = trajectories.len()))]
    pub fn pairwise(&self, trajectories: &[Trajectory]) -> DistanceMatrix {
        self.pairwise_with_progress(trajectories, |_, _| {})
    }

    /// Like [`pairwise`][Dtw::pairwise], also calling `on_progress(rows_done, rows_total)`
    /// every `progress_interval` completed rows and once when the last row finishes.
    ///
    /// Rows complete in no particular order; `rows_done` is a count, not an index.
    #[must_use]
    pub fn pairwise_with_progress<F>(&self, trajectories: &[Trajectory], on_progress: F) -> DistanceMatrix
    where
        F: Fn(usize, usize) + Sync,
    {
        let n = trajectories.len();
        let views: Vec<TrajectoryView<'_>> = trajectories.iter().map(|t| t.as_view()).collect();
        let done = AtomicUsize::new(0);

        // Row i holds (i, 0..i), which is exactly the packed lower-triangular layout.
        let rows: Vec<Vec<DtwDistance>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let row: Vec<DtwDistance> =
                    (0..i).map(|j| self.distance(views[i], views[j])).collect();
                let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                if finished % self.progress_interval == 0 || finished == n {
                    info!(rows_done = finished, rows_total = n, "pairwise progress");
                    on_progress(finished, n);
                }
                row
            })
            .collect();

        let mut data = Vec::with_capacity(pair_count(n));
        for row in rows {
            data.extend(row);
        }
        DistanceMatrix::from_raw(n, data)
    }
}

/// DTW distance between two raw point slices.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`DtwError::EmptyTrajectory`] | Either slice is empty |
/// | [`DtwError::NonFiniteCoordinate`] | Either slice holds a NaN or infinite coordinate |
pub fn pairwise_distance(a: &[Point], b: &[Point]) -> Result<f64, DtwError> {
    let a = TrajectoryView::new(a)?;
    let b = TrajectoryView::new(b)?;
    Ok(Dtw::new().distance(a, b).value())
}

/// Symmetric DTW distance matrix with zero diagonal for `trajectories`.
#[must_use]
pub fn distance_matrix(trajectories: &[Trajectory]) -> DistanceMatrix {
    Dtw::new().pairwise(trajectories)
}

/// Rolling two-row DTW over the shorter trajectory.
///
/// Transposing the lattice evaluates the same `cost + min(..)` for every cell,
/// so the result is bit-identical to the untransposed recurrence.
///
/// `prev[j]` holds `T[i-1][j]`, `curr[j]` holds `T[i][j]`; column 0 is the
/// `+inf` boundary except `T[0][0] = 0`.
fn rolling_cost(a: &[Point], b: &[Point], cutoff: Option<f64>) -> f64 {
    let (rows, cols) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let n = rows.len();
    let m = cols.len();

    let mut prev = vec![f64::INFINITY; m + 1];
    let mut curr = vec![f64::INFINITY; m + 1];
    prev[0] = 0.0;

    for (i, &p) in rows.iter().enumerate() {
        curr[0] = f64::INFINITY;
        let mut row_min = f64::INFINITY;

        for (j, &q) in cols.iter().enumerate() {
            let cost = p.distance(q);
            let val = cost + prev[j + 1].min(curr[j]).min(prev[j]);
            curr[j + 1] = val;
            row_min = row_min.min(val);
        }

        // Every warping path crosses each row and local costs are non-negative,
        // so the row minimum bounds the final cost from below.
        if let Some(c) = cutoff
            && i + 1 < n
            && row_min > c
        {
            return f64::INFINITY;
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    let total = prev[m];
    if let Some(c) = cutoff
        && total > c
    {
        return f64::INFINITY;
    }
    total
}

/// Full `(n+1) x (m+1)` DTW cost table in a flat row-major buffer.
struct CostTable {
    width: usize,
    n: usize,
    m: usize,
    cells: Vec<f64>,
}

impl CostTable {
    fn fill(a: &[Point], b: &[Point]) -> Self {
        let n = a.len();
        let m = b.len();
        let width = m + 1;
        let mut cells = vec![f64::INFINITY; (n + 1) * width];
        cells[0] = 0.0;

        for i in 1..=n {
            for j in 1..=m {
                let cost = a[i - 1].distance(b[j - 1]);
                let insertion = cells[(i - 1) * width + j];
                let deletion = cells[i * width + j - 1];
                let matched = cells[(i - 1) * width + j - 1];
                cells[i * width + j] = cost + insertion.min(deletion).min(matched);
            }
        }

        Self { width, n, m, cells }
    }

    fn at(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.width + j]
    }

    fn total(&self) -> f64 {
        self.at(self.n, self.m)
    }

    /// Walk back from `(n, m)` preferring match, then insertion, then deletion.
    fn traceback(&self) -> Vec<WarpingStep> {
        let mut path = Vec::with_capacity(self.n + self.m);
        let (mut i, mut j) = (self.n, self.m);

        loop {
            path.push(WarpingStep { a: i - 1, b: j - 1 });
            if i == 1 && j == 1 {
                break;
            }
            // On the first row or column only one move stays inside the table.
            if i == 1 {
                j -= 1;
                continue;
            }
            if j == 1 {
                i -= 1;
                continue;
            }

            let diag = self.at(i - 1, j - 1);
            let above = self.at(i - 1, j);
            let left = self.at(i, j - 1);

            if diag <= above && diag <= left {
                i -= 1;
                j -= 1;
            } else if above <= left {
                i -= 1;
            } else {
                j -= 1;
            }
        }

        path.reverse();
        path
    }
}
