// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy shared by construction, access and decoding.

use thiserror::Error;

use crate::tag::TypeTag;

/// Errors produced by `drift-bytes`.
///
/// Variants fall into three groups:
///
/// - construction: [`ShapeMismatch`](Error::ShapeMismatch),
///   [`IrregularShape`](Error::IrregularShape), [`ShapeOverflow`](Error::ShapeOverflow);
/// - access: [`TypeMismatch`](Error::TypeMismatch), [`NotScalar`](Error::NotScalar);
/// - decoding: everything else. Decode errors carry the absolute byte offset of
///   the field that failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Flat data length differs from the product of the shape's extents.
    #[error("shape expects {expected} elements, data has {actual}")]
    ShapeMismatch {
        /// Element count implied by the shape.
        expected: usize,
        /// Number of elements supplied.
        actual: usize,
    },
    /// A matrix row has a different length than the first row.
    #[error("matrix row {row} has {actual} columns, expected {expected}")]
    IrregularShape {
        /// Index of the offending row.
        row: usize,
        /// Column count of row 0.
        expected: usize,
        /// Column count of the offending row.
        actual: usize,
    },
    /// `product(shape)` overflowed `usize`.
    #[error("shape element count overflow")]
    ShapeOverflow,
    /// The stored element type cannot be viewed as the requested type.
    #[error("type mismatch: variant holds {actual}, requested {expected}")]
    TypeMismatch {
        /// Tag of the requested type.
        expected: TypeTag,
        /// Tag stored in the variant.
        actual: TypeTag,
    },
    /// A scalar view was requested on a variant that does not hold exactly one element.
    #[error("scalar view requires exactly one element, variant has {len}")]
    NotScalar {
        /// Number of elements held.
        len: usize,
    },
    /// Fewer bytes remain than the record declares it needs.
    #[error("buffer underflow at offset {offset}: need {needed} bytes, {remaining} remain")]
    BufferUnderflow {
        /// Absolute offset of the field being read.
        offset: usize,
        /// Bytes required by the field.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },
    /// The tag byte does not name a supported primitive type.
    #[error("unknown type tag {tag:#04x} at offset {offset}")]
    UnknownTypeTag {
        /// Absolute offset of the tag byte.
        offset: usize,
        /// The tag byte read.
        tag: u8,
    },
    /// A string payload is truncated or not valid UTF-8.
    #[error("malformed string at offset {offset}: {reason}")]
    MalformedString {
        /// Absolute offset of the string's length prefix.
        offset: usize,
        /// What was wrong with it.
        reason: StringFault,
    },
    /// A boolean payload byte was neither 0 nor 1.
    #[error("invalid bool byte {value:#04x} at offset {offset}")]
    InvalidBool {
        /// Absolute offset of the byte.
        offset: usize,
        /// The byte read.
        value: u8,
    },
    /// A record exceeds a configured [`DecodeLimits`](crate::DecodeLimits) bound.
    #[error("{what} limit exceeded: {actual} > {limit}")]
    LimitExceeded {
        /// Which limit tripped.
        what: Limit,
        /// Configured bound.
        limit: usize,
        /// Value found in the record.
        actual: usize,
    },
}

/// Reason attached to [`Error::MalformedString`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StringFault {
    /// Declared byte length runs past the end of the buffer.
    #[error("declared length {declared} exceeds {remaining} remaining bytes")]
    Truncated {
        /// Length from the prefix.
        declared: u64,
        /// Bytes left after the prefix.
        remaining: usize,
    },
    /// Payload bytes are not valid UTF-8.
    #[error("invalid utf-8")]
    InvalidUtf8,
}

/// Names the bound reported by [`Error::LimitExceeded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Number of dimensions.
    Rank,
    /// Number of elements in one record.
    Elements,
    /// Byte length of a single string element.
    StringLen,
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Rank => "rank",
            Self::Elements => "element count",
            Self::StringLen => "string length",
        })
    }
}

/// Convenience alias used throughout `drift-bytes`.
pub type Result<T> = std::result::Result<T, Error>;
