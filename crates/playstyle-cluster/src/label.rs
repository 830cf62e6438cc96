use std::fmt;

use serde::{Deserialize, Serialize};

/// Global index of a medoid trajectory, used as the cluster label.
///
/// This is the medoid's position in the full trajectory collection it was
/// selected from, not its position within a [`MedoidSet`](crate::MedoidSet).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MedoidId(usize);

impl MedoidId {
    /// Wrap a global trajectory index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the global trajectory index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for MedoidId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for MedoidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::MedoidId;

    #[test]
    fn roundtrip() {
        assert_eq!(MedoidId::new(7).index(), 7);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", MedoidId::new(1204)), "1204");
    }

    #[test]
    fn ordering() {
        assert!(MedoidId::new(1) < MedoidId::new(5));
    }
}
