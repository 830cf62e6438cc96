//! DTW distance newtype wrapper.

use std::cmp::Ordering;
use std::fmt;

/// Accumulated DTW alignment cost between two trajectories.
///
/// The sum of Euclidean point distances along the optimal warping path, without
/// path-length normalization. Always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DtwDistance(f64);

impl DtwDistance {
    /// Infinite distance, returned when early abandoning.
    pub const INFINITY: Self = Self(f64::INFINITY);

    /// Zero distance (identical trajectories, matrix diagonal).
    pub const ZERO: Self = Self(0.0);

    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// Return the raw distance value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// True unless this is the abandoned-search sentinel.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Total ordering comparison using [`f64::total_cmp`].
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<DtwDistance> for f64 {
    fn from(d: DtwDistance) -> Self {
        d.0
    }
}

impl fmt::Display for DtwDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let d = DtwDistance::new(1.234567);
        assert_eq!(format!("{d}"), "1.234567");
    }

    #[test]
    fn total_cmp_ordering() {
        let a = DtwDistance::new(1.0);
        let b = DtwDistance::new(2.0);
        assert_eq!(a.total_cmp(&b), Ordering::Less);
        assert_eq!(b.total_cmp(&a), Ordering::Greater);
        assert_eq!(DtwDistance::INFINITY.total_cmp(&b), Ordering::Greater);
    }

    #[test]
    fn sentinel_is_not_finite() {
        assert!(!DtwDistance::INFINITY.is_finite());
        assert!(DtwDistance::ZERO.is_finite());
    }
}
