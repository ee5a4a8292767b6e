// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Compact, self-describing binary codec for typed, shaped values.
//!
//! A [`Variant`] is a homogeneous array of one of twelve primitive types
//! (`bool`, `i8`..`i64`, `u8`..`u64`, `f32`, `f64`, `String`) tagged with a
//! [`Shape`]. Scalars have shape `[1]`, vectors `[len]`, matrices
//! `[rows, cols]` in row-major order. [`Variable<T>`] is the statically typed
//! form with the same construction rules.
//!
//! [`OutputBuffer`] appends variants as self-delimiting records;
//! [`InputBuffer`] pops them back in push order:
//!
//! ```
//! use drift_bytes::{InputBuffer, OutputBuffer, Variant};
//!
//! let mut out = OutputBuffer::new();
//! out.push_back(&Variant::from(7i32));
//! out.push_back(&Variant::from_matrix(vec![vec![1.0f64, 2.0], vec![3.0, 4.0]]).unwrap());
//!
//! let mut input = InputBuffer::new(out.into_bytes());
//! assert_eq!(input.pop().unwrap(), Variant::from(7i32));
//! assert_eq!(input.pop().unwrap().shape(), &[2, 2]);
//! assert!(input.empty());
//! ```
//!
//! # Wire format
//!
//! Records are concatenated with no framing beyond their own fields:
//!
//! ```text
//! TAG(u8) || RANK(u64 LE) || EXTENT(u64 LE) * RANK || ELEMENTS
//! ```
//!
//! The element count is not written; it is the product of the extents. See
//! [`TypeTag`] for tag values and [`primitive`] for per-element encodings.
//!
//! # Errors
//!
//! Construction, scalar access and decoding all report [`Error`]. Decoding
//! never panics on malformed input and never returns a partial value.
//!
//! # Logging
//!
//! Pushes and pops emit `tracing` events at `TRACE`; decode failures at
//! `DEBUG`. No subscriber is installed by this crate.

pub mod codec;
mod error;
mod input;
mod limits;
mod output;
pub mod primitive;
mod shape;
mod tag;
mod variable;
mod variant;

pub use error::{Error, Limit, Result, StringFault};
pub use input::InputBuffer;
pub use limits::DecodeLimits;
pub use output::OutputBuffer;
pub use primitive::Primitive;
pub use shape::Shape;
pub use tag::{ParseTypeTagError, TypeTag};
pub use variable::Variable;
pub use variant::{Elements, Variant};
