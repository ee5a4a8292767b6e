// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The closed set of element types and their per-element wire encoding.
//!
//! [`Primitive`] is sealed: exactly `bool`, the eight fixed-width integers,
//! `f32`, `f64` and `String` implement it. Each implementation binds the Rust
//! type to its [`TypeTag`], to its arm of [`Elements`], and to its element
//! encoding:
//!
//! | type            | wire                                   |
//! |-----------------|----------------------------------------|
//! | `bool`          | 1 byte, `0` or `1`                     |
//! | `i8`..`u64`     | little-endian two's complement         |
//! | `f32`, `f64`    | IEEE-754, little-endian                |
//! | `String`        | u64 LE byte length, then UTF-8 bytes   |

use std::fmt;

use crate::codec::{Reader, Writer};
use crate::error::{Error, Result};
use crate::limits::DecodeLimits;
use crate::tag::TypeTag;
use crate::variant::Elements;

mod sealed {
    pub trait Sealed {}
}

/// Element type storable in a [`Variant`](crate::Variant) or [`Variable`](crate::Variable).
pub trait Primitive: sealed::Sealed + Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Tag written for records holding this type.
    const TAG: TypeTag;

    /// Move a run of values into the matching [`Elements`] arm.
    fn wrap(values: Vec<Self>) -> Elements;

    /// Borrow the values if `elements` holds this type.
    fn view(elements: &Elements) -> Option<&[Self]>;

    /// Take the values back out, or return `elements` untouched on a tag mismatch.
    fn take(elements: Elements) -> std::result::Result<Vec<Self>, Elements>;

    /// Append one element's wire encoding.
    fn encode(&self, writer: &mut Writer);

    /// Read one element.
    fn decode(reader: &mut Reader<'_>, limits: &DecodeLimits) -> Result<Self>;
}

macro_rules! impl_primitive_numeric {
    ($ty:ty, $arm:ident) => {
        impl sealed::Sealed for $ty {}

        impl Primitive for $ty {
            const TAG: TypeTag = TypeTag::$arm;

            fn wrap(values: Vec<Self>) -> Elements {
                Elements::$arm(values)
            }

            fn view(elements: &Elements) -> Option<&[Self]> {
                match elements {
                    Elements::$arm(values) => Some(values.as_slice()),
                    _ => None,
                }
            }

            fn take(elements: Elements) -> std::result::Result<Vec<Self>, Elements> {
                match elements {
                    Elements::$arm(values) => Ok(values),
                    other => Err(other),
                }
            }

            #[inline]
            fn encode(&self, writer: &mut Writer) {
                writer.write_bytes(&self.to_le_bytes());
            }

            #[inline]
            fn decode(reader: &mut Reader<'_>, _limits: &DecodeLimits) -> Result<Self> {
                Ok(<$ty>::from_le_bytes(reader.read_array()?))
            }
        }
    };
}

impl_primitive_numeric!(i8, Int8);
impl_primitive_numeric!(i16, Int16);
impl_primitive_numeric!(i32, Int32);
impl_primitive_numeric!(i64, Int64);
impl_primitive_numeric!(u8, Uint8);
impl_primitive_numeric!(u16, Uint16);
impl_primitive_numeric!(u32, Uint32);
impl_primitive_numeric!(u64, Uint64);
impl_primitive_numeric!(f32, Float32);
impl_primitive_numeric!(f64, Float64);

impl sealed::Sealed for bool {}

impl Primitive for bool {
    const TAG: TypeTag = TypeTag::Bool;

    fn wrap(values: Vec<Self>) -> Elements {
        Elements::Bool(values)
    }

    fn view(elements: &Elements) -> Option<&[Self]> {
        match elements {
            Elements::Bool(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    fn take(elements: Elements) -> std::result::Result<Vec<Self>, Elements> {
        match elements {
            Elements::Bool(values) => Ok(values),
            other => Err(other),
        }
    }

    fn encode(&self, writer: &mut Writer) {
        writer.write_u8(u8::from(*self));
    }

    fn decode(reader: &mut Reader<'_>, _limits: &DecodeLimits) -> Result<Self> {
        let offset = reader.position();
        match reader.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(Error::InvalidBool { offset, value }),
        }
    }
}

impl sealed::Sealed for String {}

impl Primitive for String {
    const TAG: TypeTag = TypeTag::Utf8;

    fn wrap(values: Vec<Self>) -> Elements {
        Elements::Utf8(values)
    }

    fn view(elements: &Elements) -> Option<&[Self]> {
        match elements {
            Elements::Utf8(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    fn take(elements: Elements) -> std::result::Result<Vec<Self>, Elements> {
        match elements {
            Elements::Utf8(values) => Ok(values),
            other => Err(other),
        }
    }

    fn encode(&self, writer: &mut Writer) {
        writer.write_len_prefixed_bytes(self.as_bytes());
    }

    fn decode(reader: &mut Reader<'_>, limits: &DecodeLimits) -> Result<Self> {
        reader.read_string(limits.max_string_len)
    }
}

/// Encode every value in order.
pub(crate) fn encode_all<T: Primitive>(values: &[T], writer: &mut Writer) {
    for value in values {
        value.encode(writer);
    }
}

/// Decode `count` values in order.
pub(crate) fn decode_all<T: Primitive>(
    count: usize,
    reader: &mut Reader<'_>,
    limits: &DecodeLimits,
) -> Result<Vec<T>> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(T::decode(reader, limits)?);
    }
    Ok(out)
}
