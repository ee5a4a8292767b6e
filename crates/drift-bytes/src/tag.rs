// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Closed set of element type tags and their wire byte values.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Discriminant identifying the primitive type held by a [`Variant`](crate::Variant).
///
/// The `u8` representation is the tag byte written at the start of every record.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TypeTag {
    /// `bool`, one byte on the wire.
    Bool = 0,
    /// `i8`.
    Int8 = 1,
    /// `i16`.
    Int16 = 2,
    /// `i32`.
    Int32 = 3,
    /// `i64`.
    Int64 = 4,
    /// `u8`.
    Uint8 = 5,
    /// `u16`.
    Uint16 = 6,
    /// `u32`.
    Uint32 = 7,
    /// `u64`.
    Uint64 = 8,
    /// IEEE-754 binary32.
    Float32 = 9,
    /// IEEE-754 binary64.
    Float64 = 10,
    /// Length-prefixed UTF-8 string.
    #[cfg_attr(feature = "serde", serde(rename = "string"))]
    Utf8 = 11,
}

impl TypeTag {
    /// Every supported tag, in wire-value order.
    pub const ALL: [TypeTag; 12] = [
        Self::Bool,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Float32,
        Self::Float64,
        Self::Utf8,
    ];

    /// Wire byte for this tag.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a wire byte; `None` for bytes outside the supported set.
    pub const fn from_u8(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => Self::Bool,
            1 => Self::Int8,
            2 => Self::Int16,
            3 => Self::Int32,
            4 => Self::Int64,
            5 => Self::Uint8,
            6 => Self::Uint16,
            7 => Self::Uint32,
            8 => Self::Uint64,
            9 => Self::Float32,
            10 => Self::Float64,
            11 => Self::Utf8,
            _ => return None,
        })
    }

    /// Canonical lowercase name (`"int32"`, `"string"`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Utf8 => "string",
        }
    }

    /// Fixed element width in bytes. `None` for variable-width strings.
    pub const fn byte_width(self) -> Option<usize> {
        match self {
            Self::Bool | Self::Int8 | Self::Uint8 => Some(1),
            Self::Int16 | Self::Uint16 => Some(2),
            Self::Int32 | Self::Uint32 | Self::Float32 => Some(4),
            Self::Int64 | Self::Uint64 | Self::Float64 => Some(8),
            Self::Utf8 => None,
        }
    }

    /// Smallest number of bytes a single element can occupy on the wire.
    ///
    /// An empty string still carries its 8-byte length prefix.
    pub const fn min_wire_size(self) -> usize {
        match self.byte_width() {
            Some(width) => width,
            None => 8,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<TypeTag> for u8 {
    fn from(tag: TypeTag) -> Self {
        tag.as_u8()
    }
}

/// Returned when parsing a type name that is not one of [`TypeTag::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported type name {0:?}")]
pub struct ParseTypeTagError(pub String);

impl FromStr for TypeTag {
    type Err = ParseTypeTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.name() == s)
            .ok_or_else(|| ParseTypeTagError(s.to_owned()))
    }
}
