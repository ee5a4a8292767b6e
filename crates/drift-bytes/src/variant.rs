// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Type-erased shaped values.

use std::fmt;

use crate::codec::{Reader, Writer};
use crate::error::{Error, Result};
use crate::limits::DecodeLimits;
use crate::primitive::{decode_all, encode_all, Primitive};
use crate::shape::Shape;
use crate::tag::TypeTag;
use crate::variable::Variable;

/// Homogeneous run of values of one supported primitive type.
///
/// One arm per [`TypeTag`]; every encode and decode dispatch is an exhaustive
/// `match` over this enum.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Elements {
    /// `bool` values.
    Bool(Vec<bool>),
    /// `i8` values.
    Int8(Vec<i8>),
    /// `i16` values.
    Int16(Vec<i16>),
    /// `i32` values.
    Int32(Vec<i32>),
    /// `i64` values.
    Int64(Vec<i64>),
    /// `u8` values.
    Uint8(Vec<u8>),
    /// `u16` values.
    Uint16(Vec<u16>),
    /// `u32` values.
    Uint32(Vec<u32>),
    /// `u64` values.
    Uint64(Vec<u64>),
    /// `f32` values.
    Float32(Vec<f32>),
    /// `f64` values.
    Float64(Vec<f64>),
    /// UTF-8 strings.
    #[cfg_attr(feature = "serde", serde(rename = "string"))]
    Utf8(Vec<String>),
}

impl Elements {
    /// Tag of the held type.
    pub const fn tag(&self) -> TypeTag {
        match self {
            Self::Bool(_) => TypeTag::Bool,
            Self::Int8(_) => TypeTag::Int8,
            Self::Int16(_) => TypeTag::Int16,
            Self::Int32(_) => TypeTag::Int32,
            Self::Int64(_) => TypeTag::Int64,
            Self::Uint8(_) => TypeTag::Uint8,
            Self::Uint16(_) => TypeTag::Uint16,
            Self::Uint32(_) => TypeTag::Uint32,
            Self::Uint64(_) => TypeTag::Uint64,
            Self::Float32(_) => TypeTag::Float32,
            Self::Float64(_) => TypeTag::Float64,
            Self::Utf8(_) => TypeTag::Utf8,
        }
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        match self {
            Self::Bool(v) => v.len(),
            Self::Int8(v) => v.len(),
            Self::Int16(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Int64(v) => v.len(),
            Self::Uint8(v) => v.len(),
            Self::Uint16(v) => v.len(),
            Self::Uint32(v) => v.len(),
            Self::Uint64(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::Float64(v) => v.len(),
            Self::Utf8(v) => v.len(),
        }
    }

    /// Returns `true` if there are no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn encode(&self, writer: &mut Writer) {
        match self {
            Self::Bool(v) => encode_all(v, writer),
            Self::Int8(v) => encode_all(v, writer),
            Self::Int16(v) => encode_all(v, writer),
            Self::Int32(v) => encode_all(v, writer),
            Self::Int64(v) => encode_all(v, writer),
            Self::Uint8(v) => encode_all(v, writer),
            Self::Uint16(v) => encode_all(v, writer),
            Self::Uint32(v) => encode_all(v, writer),
            Self::Uint64(v) => encode_all(v, writer),
            Self::Float32(v) => encode_all(v, writer),
            Self::Float64(v) => encode_all(v, writer),
            Self::Utf8(v) => encode_all(v, writer),
        }
    }

    pub(crate) fn decode(
        tag: TypeTag,
        count: usize,
        reader: &mut Reader<'_>,
        limits: &DecodeLimits,
    ) -> Result<Self> {
        Ok(match tag {
            TypeTag::Bool => Self::Bool(decode_all(count, reader, limits)?),
            TypeTag::Int8 => Self::Int8(decode_all(count, reader, limits)?),
            TypeTag::Int16 => Self::Int16(decode_all(count, reader, limits)?),
            TypeTag::Int32 => Self::Int32(decode_all(count, reader, limits)?),
            TypeTag::Int64 => Self::Int64(decode_all(count, reader, limits)?),
            TypeTag::Uint8 => Self::Uint8(decode_all(count, reader, limits)?),
            TypeTag::Uint16 => Self::Uint16(decode_all(count, reader, limits)?),
            TypeTag::Uint32 => Self::Uint32(decode_all(count, reader, limits)?),
            TypeTag::Uint64 => Self::Uint64(decode_all(count, reader, limits)?),
            TypeTag::Float32 => Self::Float32(decode_all(count, reader, limits)?),
            TypeTag::Float64 => Self::Float64(decode_all(count, reader, limits)?),
            TypeTag::Utf8 => Self::Utf8(decode_all(count, reader, limits)?),
        })
    }
}

impl fmt::Display for Elements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v:?}"),
            Self::Int8(v) => write!(f, "{v:?}"),
            Self::Int16(v) => write!(f, "{v:?}"),
            Self::Int32(v) => write!(f, "{v:?}"),
            Self::Int64(v) => write!(f, "{v:?}"),
            Self::Uint8(v) => write!(f, "{v:?}"),
            Self::Uint16(v) => write!(f, "{v:?}"),
            Self::Uint32(v) => write!(f, "{v:?}"),
            Self::Uint64(v) => write!(f, "{v:?}"),
            Self::Float32(v) => write!(f, "{v:?}"),
            Self::Float64(v) => write!(f, "{v:?}"),
            Self::Utf8(v) => write!(f, "{v:?}"),
        }
    }
}

/// Type-erased, shape-tagged homogeneous array.
///
/// This is what [`OutputBuffer`](crate::OutputBuffer) encodes and
/// [`InputBuffer`](crate::InputBuffer) yields. Variants are immutable value
/// data: clones are independent and nothing is shared.
///
/// Invariant: `elements.len() == shape.num_elements()`. Every constructor
/// checks it, so an inconsistent `Variant` cannot exist.
///
/// ```
/// use drift_bytes::{TypeTag, Variant};
///
/// let m = Variant::from_matrix(vec![vec![1i32, 2, 3], vec![4, 5, 6]]).unwrap();
/// assert_eq!(m.tag(), TypeTag::Int32);
/// assert_eq!(m.shape(), &[2, 3]);
/// assert_eq!(m.values::<i32>().unwrap(), &[1, 2, 3, 4, 5, 6]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawVariant"))]
pub struct Variant {
    shape: Shape,
    elements: Elements,
}

impl Variant {
    /// Single value with shape `[1]`.
    pub fn scalar<T: Primitive>(value: T) -> Self {
        Variable::scalar(value).into()
    }

    /// One-dimensional value with shape `[data.len()]`.
    pub fn from_vec<T: Primitive>(data: Vec<T>) -> Self {
        Variable::from_vec(data).into()
    }

    /// Flat data with an explicit shape; see [`Variable::with_shape`].
    pub fn with_shape<T: Primitive>(data: Vec<T>, shape: impl Into<Shape>) -> Result<Self> {
        Variable::with_shape(data, shape).map(Into::into)
    }

    /// Rectangular rows flattened row-major; see [`Variable::from_matrix`].
    pub fn from_matrix<T: Primitive>(rows: Vec<Vec<T>>) -> Result<Self> {
        Variable::from_matrix(rows).map(Into::into)
    }

    /// Pair already type-erased elements with a shape.
    ///
    /// Fails with [`Error::ShapeMismatch`] when the counts disagree.
    pub fn from_parts(shape: impl Into<Shape>, elements: Elements) -> Result<Self> {
        let shape = shape.into();
        let expected = shape.num_elements()?;
        if expected != elements.len() {
            return Err(Error::ShapeMismatch {
                expected,
                actual: elements.len(),
            });
        }
        Ok(Self { shape, elements })
    }

    /// Tag of the element type.
    pub fn tag(&self) -> TypeTag {
        self.elements.tag()
    }

    /// Shape of the value.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Type-erased elements in row-major order.
    pub fn elements(&self) -> &Elements {
        &self.elements
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the value holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns `true` if the value holds exactly one element.
    pub fn is_scalar(&self) -> bool {
        self.len() == 1
    }

    /// Borrow the elements as `T`.
    ///
    /// Fails with [`Error::TypeMismatch`] unless the stored tag is `T::TAG`.
    pub fn values<T: Primitive>(&self) -> Result<&[T]> {
        T::view(&self.elements).ok_or(Error::TypeMismatch {
            expected: T::TAG,
            actual: self.tag(),
        })
    }

    /// The single element as `T`.
    ///
    /// Fails with [`Error::TypeMismatch`] unless the stored tag is `T::TAG`
    /// (there is no numeric coercion between tags) and with
    /// [`Error::NotScalar`] unless exactly one element is held.
    pub fn as_scalar<T: Primitive>(&self) -> Result<T> {
        match self.values::<T>()? {
            [only] => Ok(only.clone()),
            values => Err(Error::NotScalar { len: values.len() }),
        }
    }

    /// Take the elements out as `Vec<T>`.
    pub fn into_values<T: Primitive>(self) -> Result<Vec<T>> {
        Variable::<T>::try_from(self).map(|v| v.into_parts().1)
    }

    /// Split into shape and elements.
    pub fn into_parts(self) -> (Shape, Elements) {
        (self.shape, self.elements)
    }
}

impl<T: Primitive> From<Variable<T>> for Variant {
    fn from(variable: Variable<T>) -> Self {
        let (shape, data) = variable.into_parts();
        Self {
            shape,
            elements: T::wrap(data),
        }
    }
}

impl<T: Primitive> From<T> for Variant {
    fn from(value: T) -> Self {
        Self::scalar(value)
    }
}

impl<T: Primitive> From<Vec<T>> for Variant {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Self::scalar(value.to_owned())
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}", self.tag(), self.shape, self.elements)
    }
}

/// Unchecked serde form; validated into a [`Variant`] on deserialize.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawVariant {
    shape: Shape,
    elements: Elements,
}

#[cfg(feature = "serde")]
impl TryFrom<RawVariant> for Variant {
    type Error = Error;

    fn try_from(raw: RawVariant) -> Result<Self> {
        Self::from_parts(raw.shape, raw.elements)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn scalar_view_requires_matching_tag() {
        let v = Variant::from(7i32);
        assert_eq!(v.as_scalar::<i32>(), Ok(7));
        assert_eq!(
            v.as_scalar::<i64>(),
            Err(Error::TypeMismatch {
                expected: TypeTag::Int64,
                actual: TypeTag::Int32,
            })
        );
        assert_eq!(
            v.as_scalar::<u32>(),
            Err(Error::TypeMismatch {
                expected: TypeTag::Uint32,
                actual: TypeTag::Int32,
            })
        );
    }

    #[test]
    fn scalar_view_requires_one_element() {
        let v = Variant::from(vec![1.0f64, 2.0]);
        assert_eq!(v.as_scalar::<f64>(), Err(Error::NotScalar { len: 2 }));
        assert!(!v.is_scalar());
    }

    #[test]
    fn equality_covers_tag_shape_and_elements() {
        let a = Variant::with_shape(vec![1u8, 2, 3, 4], [2, 2]).unwrap();
        let b = Variant::with_shape(vec![1u8, 2, 3, 4], [4]).unwrap();
        let c = Variant::with_shape(vec![1i8, 2, 3, 4], [2, 2]).unwrap();
        let d = Variant::with_shape(vec![1u8, 2, 3, 5], [2, 2]).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn from_parts_validates_count() {
        let err = Variant::from_parts([3], Elements::Bool(vec![true])).unwrap_err();
        assert_eq!(
            err,
            Error::ShapeMismatch {
                expected: 3,
                actual: 1
            }
        );
    }

    #[test]
    fn typed_round_trip() {
        let v: Variant = Variable::from_vec(vec!["a".to_owned(), "b".to_owned()]).into();
        assert_eq!(v.tag(), TypeTag::Utf8);
        let back = Variable::<String>::try_from(v.clone()).unwrap();
        assert_eq!(back.data(), &["a", "b"]);
        assert!(Variable::<bool>::try_from(v).is_err());
    }

    #[test]
    fn display_shows_header_and_values() {
        assert_eq!(Variant::from(true).to_string(), "bool[1] [true]");
        assert_eq!(Variant::from("hi").to_string(), "string[1] [\"hi\"]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_rejects_inconsistent_shape() {
        let ok: Variant =
            serde_json::from_str(r#"{"shape":[2],"elements":{"int32":[1,2]}}"#).unwrap();
        assert_eq!(ok, Variant::from(vec![1i32, 2]));

        let bad = serde_json::from_str::<Variant>(r#"{"shape":[3],"elements":{"int32":[1,2]}}"#);
        assert!(bad.is_err());
    }
}
