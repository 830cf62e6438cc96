//! Warping path types for DTW alignment.

/// One aligned pair: point `a` of the first trajectory matched to point `b` of the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarpingStep {
    /// Point index in the first trajectory.
    pub a: usize,
    /// Point index in the second trajectory.
    pub b: usize,
}

/// Optimal alignment from `(0, 0)` to `(n-1, m-1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WarpingPath(Vec<WarpingStep>);

impl WarpingPath {
    pub(crate) fn new(steps: Vec<WarpingStep>) -> Self {
        Self(steps)
    }

    /// Return the warping steps as a slice.
    #[must_use]
    pub fn steps(&self) -> &[WarpingStep] {
        &self.0
    }

    /// Return the number of steps in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the path contains no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of steps that advance only one trajectory (insertions plus deletions).
    #[must_use]
    pub fn warp_count(&self) -> usize {
        self.0
            .windows(2)
            .filter(|w| (w[1].a == w[0].a) != (w[1].b == w[0].b))
            .count()
    }
}

impl<'a> IntoIterator for &'a WarpingPath {
    type Item = &'a WarpingStep;
    type IntoIter = std::slice::Iter<'a, WarpingStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
