// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Dimension extents in row-major rank order.

use std::fmt;

use crate::error::{Error, Result};

/// Ordered list of dimension extents.
///
/// Equality is element-wise and length-sensitive: `[6]`, `[1, 6]` and `[6, 1]`
/// are three different shapes even though they hold the same number of elements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Shape(Vec<usize>);

impl Shape {
    /// Wrap the given extents.
    pub fn new(dims: Vec<usize>) -> Self {
        Self(dims)
    }

    /// The scalar shape `[1]`.
    pub fn scalar() -> Self {
        Self(vec![1])
    }

    /// One-dimensional shape `[len]`.
    pub fn vector(len: usize) -> Self {
        Self(vec![len])
    }

    /// Two-dimensional shape `[rows, cols]`.
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self(vec![rows, cols])
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Extents as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Product of the extents; 1 for the empty shape.
    pub fn num_elements(&self) -> Result<usize> {
        num_elements(&self.0)
    }

    /// Consume and return the extents.
    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

/// Checked product of `dims`. Any zero extent makes the product 0, whatever
/// the other extents are.
pub(crate) fn num_elements(dims: &[usize]) -> Result<usize> {
    if dims.contains(&0) {
        return Ok(0);
    }
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or(Error::ShapeOverflow)
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self(dims.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self(dims.to_vec())
    }
}

impl PartialEq<[usize]> for Shape {
    fn eq(&self, other: &[usize]) -> bool {
        self.0 == other
    }
}

impl<const N: usize> PartialEq<[usize; N]> for Shape {
    fn eq(&self, other: &[usize; N]) -> bool {
        self.0 == other
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{d}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_shape_holds_one_element() {
        assert_eq!(Shape::default().num_elements(), Ok(1));
        assert_eq!(Shape::default().rank(), 0);
    }

    #[test]
    fn zero_extent_holds_nothing() {
        assert_eq!(Shape::from([3, 0, 7]).num_elements(), Ok(0));
    }

    #[test]
    fn zero_extent_wins_in_any_position() {
        let huge = 1usize << 40;
        assert_eq!(Shape::from([0, huge, huge]).num_elements(), Ok(0));
        assert_eq!(Shape::from([huge, huge, 0]).num_elements(), Ok(0));
        assert_eq!(Shape::from([huge, 0, huge]).num_elements(), Ok(0));
    }

    #[test]
    fn equality_is_length_sensitive() {
        assert_ne!(Shape::from([6]), Shape::from([1, 6]));
        assert_ne!(Shape::from([1, 6]), Shape::from([6, 1]));
        assert_eq!(Shape::matrix(2, 3), [2, 3]);
    }

    #[test]
    fn overflow_is_reported() {
        let shape = Shape::from([usize::MAX, 2]);
        assert_eq!(shape.num_elements(), Err(Error::ShapeOverflow));
    }

    #[test]
    fn display_lists_extents() {
        assert_eq!(Shape::matrix(2, 3).to_string(), "[2, 3]");
        assert_eq!(Shape::default().to_string(), "[]");
    }
}
