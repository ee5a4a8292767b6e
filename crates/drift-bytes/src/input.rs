// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Decoder side of the FIFO buffer.

use bytes::Bytes;
use tracing::{debug, trace};

use crate::codec::Reader;
use crate::error::{Error, Limit, Result};
use crate::limits::DecodeLimits;
use crate::output::OutputBuffer;
use crate::primitive::Primitive;
use crate::shape::Shape;
use crate::tag::TypeTag;
use crate::variable::Variable;
use crate::variant::{Elements, Variant};

/// Reads [`Variant`] records back in the order they were pushed.
///
/// Construction never fails; every check happens in [`pop`](InputBuffer::pop).
/// A failed `pop` leaves the cursor where it was, and no partially decoded
/// value is ever returned. After an error the remaining bytes should be treated
/// as untrustworthy.
///
/// ```
/// use drift_bytes::{InputBuffer, OutputBuffer, Variant};
///
/// let mut out = OutputBuffer::new();
/// out.push_back(&Variant::from(42i32));
/// out.push_back(&Variant::from("done"));
///
/// let mut input = InputBuffer::new(out.into_bytes());
/// assert_eq!(input.pop().unwrap().as_scalar::<i32>().unwrap(), 42);
/// assert_eq!(input.pop().unwrap().as_scalar::<String>().unwrap(), "done");
/// assert!(input.empty());
/// ```
#[derive(Debug, Clone)]
pub struct InputBuffer {
    bytes: Bytes,
    offset: usize,
    limits: DecodeLimits,
    failed: bool,
}

impl InputBuffer {
    /// Wrap `bytes` with the cursor at 0 and default limits.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self::with_limits(bytes, DecodeLimits::default())
    }

    /// Wrap `bytes` with the cursor at 0 and the given limits.
    pub fn with_limits(bytes: impl Into<Bytes>, limits: DecodeLimits) -> Self {
        Self {
            bytes: bytes.into(),
            offset: 0,
            limits,
            failed: false,
        }
    }

    /// Decode the next record and advance past it.
    pub fn pop(&mut self) -> Result<Variant> {
        let (variant, end) = self.decode_next()?;
        self.advance(&variant, end);
        Ok(variant)
    }

    /// Decode the next record as a typed value.
    ///
    /// On [`Error::TypeMismatch`] the record is left unconsumed.
    pub fn pop_as<T: Primitive>(&mut self) -> Result<Variable<T>> {
        let (variant, end) = self.decode_next()?;
        let tag = variant.tag();
        let shape = variant.shape().clone();
        let variable = Variable::try_from(variant)?;
        self.offset = end;
        trace!(%tag, %shape, offset = self.offset, "popped record");
        Ok(variable)
    }

    /// Returns `true` once every byte has been consumed.
    pub fn empty(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    /// Current cursor offset.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Limits this buffer enforces.
    pub fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    fn decode_next(&mut self) -> Result<(Variant, usize)> {
        let mut reader = Reader::at(&self.bytes, self.offset);
        match decode_record(&mut reader, &self.limits) {
            Ok(variant) => Ok((variant, reader.position())),
            Err(err) => {
                debug!(offset = self.offset, error = %err, "failed to decode record");
                Err(err)
            }
        }
    }

    fn advance(&mut self, variant: &Variant, end: usize) {
        trace!(
            tag = %variant.tag(),
            shape = %variant.shape(),
            offset = self.offset,
            len = end - self.offset,
            "popped record"
        );
        self.offset = end;
    }
}

/// Decode one record at the reader's position.
fn decode_record(reader: &mut Reader<'_>, limits: &DecodeLimits) -> Result<Variant> {
    let tag_offset = reader.position();
    let byte = reader.read_u8()?;
    let tag = TypeTag::from_u8(byte).ok_or(Error::UnknownTypeTag {
        offset: tag_offset,
        tag: byte,
    })?;

    let rank = reader.read_len()?;
    if let Some(limit) = limits.max_rank.filter(|&limit| rank > limit) {
        return Err(Error::LimitExceeded {
            what: Limit::Rank,
            limit,
            actual: rank,
        });
    }
    reader.ensure(rank.saturating_mul(8))?;
    let mut dims = Vec::with_capacity(rank);
    for _ in 0..rank {
        dims.push(reader.read_len()?);
    }
    let shape = Shape::new(dims);

    // A product past usize::MAX can never be backed by the buffer.
    let count = match shape.num_elements() {
        Ok(count) => count,
        Err(_) => {
            reader.ensure(usize::MAX)?;
            usize::MAX
        }
    };
    if let Some(limit) = limits.max_elements.filter(|&limit| count > limit) {
        return Err(Error::LimitExceeded {
            what: Limit::Elements,
            limit,
            actual: count,
        });
    }
    // Every element occupies at least its minimum wire size, so this bounds
    // the allocation below by the bytes actually present.
    reader.ensure(count.saturating_mul(tag.min_wire_size()))?;

    let elements = Elements::decode(tag, count, reader, limits)?;
    Variant::from_parts(shape, elements)
}

impl Iterator for InputBuffer {
    type Item = Result<Variant>;

    /// Yields records until the buffer is empty or a record fails to decode.
    /// The failing record's error is yielded once, then iteration stops.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.empty() {
            return None;
        }
        let item = self.pop();
        self.failed = item.is_err();
        Some(item)
    }
}

impl std::iter::FusedIterator for InputBuffer {}

impl From<OutputBuffer> for InputBuffer {
    fn from(out: OutputBuffer) -> Self {
        Self::new(out.into_bytes())
    }
}
