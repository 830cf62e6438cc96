//! Trajectory types with validation guarantees.

use std::ops::Index;

use crate::error::DtwError;

/// A single on-field position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

fn validate(points: &[Point]) -> Result<(), DtwError> {
    if points.is_empty() {
        return Err(DtwError::EmptyTrajectory);
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(DtwError::NonFiniteCoordinate { index });
    }
    Ok(())
}

/// Owned, validated trajectory. Guaranteed non-empty with all coordinates finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory(Vec<Point>);

impl Trajectory {
    /// Create a new trajectory, validating that it is non-empty and all coordinates are finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptyTrajectory`] | `points` is empty |
    /// | [`DtwError::NonFiniteCoordinate`] | Any coordinate is NaN or infinite |
    pub fn new(points: Vec<Point>) -> Result<Self, DtwError> {
        validate(&points)?;
        Ok(Self(points))
    }

    /// Build a trajectory from `[x, y]` pairs.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Trajectory::new`].
    pub fn from_xy(coords: &[[f64; 2]]) -> Result<Self, DtwError> {
        Self::new(coords.iter().copied().map(Point::from).collect())
    }

    /// Borrow this trajectory as a zero-copy view.
    #[must_use]
    pub fn as_view(&self) -> TrajectoryView<'_> {
        TrajectoryView::new_unchecked(&self.0)
    }

    /// Return the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a constructed trajectory; present for `len_without_is_empty`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the points as a slice.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consume and return the inner vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<Point> {
        self.0
    }
}

impl AsRef<[Point]> for Trajectory {
    fn as_ref(&self) -> &[Point] {
        &self.0
    }
}

impl TryFrom<Vec<Point>> for Trajectory {
    type Error = DtwError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

/// Borrowed, validated view into a trajectory.
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryView<'a>(&'a [Point]);

impl<'a> TrajectoryView<'a> {
    /// Create a new view, validating that the slice is non-empty and all coordinates are finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptyTrajectory`] | `points` is empty |
    /// | [`DtwError::NonFiniteCoordinate`] | Any coordinate is NaN or infinite |
    pub fn new(points: &'a [Point]) -> Result<Self, DtwError> {
        validate(points)?;
        Ok(Self(points))
    }

    pub(crate) fn new_unchecked(points: &'a [Point]) -> Self {
        Self(points)
    }

    /// Return the underlying slice.
    #[must_use]
    pub fn as_slice(&self) -> &'a [Point] {
        self.0
    }

    /// Return the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a validated view.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<usize> for TrajectoryView<'_> {
    type Output = Point;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl AsRef<[Point]> for TrajectoryView<'_> {
    fn as_ref(&self) -> &[Point] {
        self.0
    }
}
