// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Statically typed shaped values.
//!
//! [`Variable<T>`] owns the construction rules; [`Variant`] delegates to it, so
//! the typed and the type-erased forms validate identically.

use std::fmt;

use crate::error::{Error, Result};
use crate::primitive::Primitive;
use crate::shape::Shape;
use crate::variant::Variant;

/// Shaped, homogeneous array of `T`, laid out row-major.
///
/// Invariant: `data.len() == shape.num_elements()`.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable<T> {
    shape: Shape,
    data: Vec<T>,
}

impl<T: Primitive> Variable<T> {
    /// Single value with shape `[1]`.
    pub fn scalar(value: T) -> Self {
        Self {
            shape: Shape::scalar(),
            data: vec![value],
        }
    }

    /// One-dimensional value with shape `[data.len()]`.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            shape: Shape::vector(data.len()),
            data,
        }
    }

    /// Flat data with an explicit shape.
    ///
    /// Fails with [`Error::ShapeMismatch`] when `product(shape) != data.len()`.
    pub fn with_shape(data: Vec<T>, shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        let expected = shape.num_elements()?;
        if expected != data.len() {
            return Err(Error::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Rectangular rows flattened row-major into shape `[rows, cols]`.
    ///
    /// Fails with [`Error::IrregularShape`] if any row's length differs from the
    /// first row's. Zero rows yield shape `[0, 0]`.
    pub fn from_matrix(rows: Vec<Vec<T>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(Error::IrregularShape {
                row,
                expected: cols,
                actual: r.len(),
            });
        }
        let shape = Shape::matrix(rows.len(), cols);
        let data = rows.into_iter().flatten().collect();
        Ok(Self { shape, data })
    }

    /// Shape of the value.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Elements in row-major order.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the value holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The single element, if there is exactly one.
    pub fn as_scalar(&self) -> Option<&T> {
        match self.data.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Split into shape and row-major data.
    pub fn into_parts(self) -> (Shape, Vec<T>) {
        (self.shape, self.data)
    }

    /// Erase the element type.
    pub fn into_variant(self) -> Variant {
        Variant::from(self)
    }
}

impl<T: Primitive> From<T> for Variable<T> {
    fn from(value: T) -> Self {
        Self::scalar(value)
    }
}

impl<T: Primitive> From<Vec<T>> for Variable<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: Primitive> TryFrom<Variant> for Variable<T> {
    type Error = Error;

    fn try_from(variant: Variant) -> Result<Self> {
        let tag = variant.tag();
        let (shape, elements) = variant.into_parts();
        let data = T::take(elements).map_err(|_| Error::TypeMismatch {
            expected: T::TAG,
            actual: tag,
        })?;
        Ok(Self { shape, data })
    }
}

impl<T: Primitive> fmt::Display for Variable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {:?}", T::TAG, self.shape, self.data)
    }
}
