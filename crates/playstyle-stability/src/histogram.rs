//! Label histograms and the Manhattan distance between them.

use std::collections::BTreeMap;

use serde::Serialize;

use playstyle_cluster::MedoidId;

/// Weight per cluster label, iterated in ascending label order.
///
/// Weights are raw counts after [`LabelHistogram::from_labels`] and
/// frequencies summing to one after [`LabelHistogram::normalized`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LabelHistogram(BTreeMap<MedoidId, f64>);

impl LabelHistogram {
    /// Empty histogram.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count occurrences of each label.
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a MedoidId>,
    {
        let mut counts = BTreeMap::new();
        for &label in labels {
            *counts.entry(label).or_insert(0.0) += 1.0;
        }
        Self(counts)
    }

    /// Add `weight` to `label`.
    pub fn add(&mut self, label: MedoidId, weight: f64) {
        *self.0.entry(label).or_insert(0.0) += weight;
    }

    /// Weight of `label`, zero when absent.
    #[must_use]
    pub fn get(&self, label: MedoidId) -> f64 {
        self.0.get(&label).copied().unwrap_or(0.0)
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no label has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(label, weight)` in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (MedoidId, f64)> + '_ {
        self.0.iter().map(|(&k, &v)| (k, v))
    }

    /// Rescale weights to frequencies. A histogram with zero total weight
    /// becomes empty.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total <= 0.0 {
            return Self::new();
        }
        Self(self.0.iter().map(|(&k, &v)| (k, v / total)).collect())
    }
}

impl FromIterator<(MedoidId, f64)> for LabelHistogram {
    fn from_iter<T: IntoIterator<Item = (MedoidId, f64)>>(iter: T) -> Self {
        let mut hist = Self::new();
        for (label, weight) in iter {
            hist.add(label, weight);
        }
        hist
    }
}

/// L1 distance between two histograms over the union of their labels.
///
/// A label missing from one side counts as zero there.
#[must_use]
pub fn manhattan_distance(a: &LabelHistogram, b: &LabelHistogram) -> f64 {
    let mut left = a.0.iter().peekable();
    let mut right = b.0.iter().peekable();
    let mut total = 0.0;

    // Merge walk over both sorted key sets.
    loop {
        match (left.peek(), right.peek()) {
            (Some(&(ka, &va)), Some(&(kb, &vb))) => {
                if ka < kb {
                    total += va.abs();
                    left.next();
                } else if kb < ka {
                    total += vb.abs();
                    right.next();
                } else {
                    total += (va - vb).abs();
                    left.next();
                    right.next();
                }
            }
            (Some(&(_, &va)), None) => {
                total += va.abs();
                left.next();
            }
            (None, Some(&(_, &vb))) => {
                total += vb.abs();
                right.next();
            }
            (None, None) => break,
        }
    }

    total
}
