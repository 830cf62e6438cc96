//! Packed symmetric distance matrix for pairwise DTW distances.

use std::ops::Index;

use crate::distance::DtwDistance;

/// Number of unique unordered pairs among `n` items.
pub(crate) fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Symmetric distance matrix stored as a lower-triangular flat vector.
///
/// For `n` trajectories, stores `n*(n-1)/2` distances. Access is symmetric:
/// `get(i, j) == get(j, i)`. Diagonal is always zero.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<DtwDistance>,
}

impl DistanceMatrix {
    /// `data` holds `data[row*(row-1)/2 + col]` for every `row > col`.
    pub(crate) fn from_raw(n: usize, data: Vec<DtwDistance>) -> Self {
        debug_assert_eq!(data.len(), pair_count(n));
        Self { n, data }
    }

    /// Build a matrix from a precomputed symmetric distance function.
    ///
    /// `f(i, j)` is called once per unordered pair with `i > j`.
    #[must_use]
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(pair_count(n));
        for i in 1..n {
            for j in 0..i {
                data.push(DtwDistance::new(f(i, j)));
            }
        }
        Self { n, data }
    }

    /// Return the number of trajectories in the matrix.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Return true if the matrix is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Return the distance between trajectory `i` and trajectory `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n` or `j >= n`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> DtwDistance {
        assert!(i < self.n, "row index {i} out of bounds for matrix of size {}", self.n);
        assert!(j < self.n, "column index {j} out of bounds for matrix of size {}", self.n);
        if i == j {
            return DtwDistance::ZERO;
        }
        let (row, col) = if i > j { (i, j) } else { (j, i) };
        self.data[row * (row - 1) / 2 + col]
    }

    /// Iterate over all unique pairs `(i, j, distance)` where `i > j`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, DtwDistance)> + '_ {
        (1..self.n).flat_map(move |i| {
            (0..i).map(move |j| (i, j, self.data[i * (i - 1) / 2 + j]))
        })
    }

    /// Distances from trajectory `i` to every trajectory, including itself.
    #[must_use]
    pub fn row(&self, i: usize) -> Vec<DtwDistance> {
        (0..self.n).map(|j| self.get(i, j)).collect()
    }

    /// Expand into a dense `n x n` table of raw values.
    #[must_use]
    pub fn to_square(&self) -> Vec<Vec<f64>> {
        (0..self.n)
            .map(|i| (0..self.n).map(|j| self.get(i, j).value()).collect())
            .collect()
    }
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = DtwDistance;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        if i == j {
            assert!(i < self.n, "index {i} out of bounds for matrix of size {}", self.n);
            return &DtwDistance::ZERO;
        }
        let (row, col) = if i > j { (i, j) } else { (j, i) };
        &self.data[row * (row - 1) / 2 + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_matrix() -> DistanceMatrix {
        // Layout: (1,0), (2,0), (2,1), (3,0), (3,1), (3,2)
        let data = (1..=6).map(|v| DtwDistance::new(v as f64)).collect();
        DistanceMatrix::from_raw(4, data)
    }

    #[test]
    fn diagonal_is_zero() {
        let m = make_matrix();
        for i in 0..4 {
            assert_eq!(m.get(i, i).value(), 0.0);
            assert_eq!(m[(i, i)].value(), 0.0);
        }
    }

    #[test]
    fn symmetric_access() {
        let m = make_matrix();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn specific_values() {
        let m = make_matrix();
        assert_eq!(m.get(1, 0).value(), 1.0);
        assert_eq!(m.get(2, 1).value(), 3.0);
        assert_eq!(m.get(0, 3).value(), 4.0);
        assert_eq!(m[(2, 3)].value(), 6.0);
    }

    #[test]
    fn iter_yields_lower_triangle() {
        let m = make_matrix();
        let pairs: Vec<_> = m.iter().collect();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], (1, 0, DtwDistance::new(1.0)));
        assert_eq!(pairs[5], (3, 2, DtwDistance::new(6.0)));
    }

    #[test]
    fn row_and_square() {
        let m = make_matrix();
        let row0: Vec<f64> = m.row(0).iter().map(|d| d.value()).collect();
        assert_eq!(row0, vec![0.0, 1.0, 2.0, 4.0]);
        let sq = m.to_square();
        assert_eq!(sq[3], vec![4.0, 5.0, 6.0, 0.0]);
    }

    #[test]
    fn from_fn_matches_layout() {
        let m = DistanceMatrix::from_fn(3, |i, j| (i * 10 + j) as f64);
        assert_eq!(m.get(1, 0).value(), 10.0);
        assert_eq!(m.get(0, 2).value(), 20.0);
        assert_eq!(m.get(2, 1).value(), 21.0);
    }

    #[test]
    fn empty_and_single() {
        let empty = DistanceMatrix::from_raw(0, Vec::new());
        assert!(empty.is_empty());
        assert!(empty.to_square().is_empty());
        let one = DistanceMatrix::from_raw(1, Vec::new());
        assert_eq!(one.len(), 1);
        assert_eq!(one.get(0, 0).value(), 0.0);
    }
}
