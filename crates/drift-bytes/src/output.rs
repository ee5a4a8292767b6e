// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Encoder side of the FIFO buffer.

use bytes::Bytes;
use tracing::trace;

use crate::codec::Writer;
use crate::primitive::{encode_all, Primitive};
use crate::shape::Shape;
use crate::tag::TypeTag;
use crate::variable::Variable;
use crate::variant::Variant;

/// Append-only byte buffer of encoded [`Variant`] records.
///
/// Each `push_back` appends one self-delimiting record:
///
/// ```text
/// TAG(1) || RANK(u64 LE) || EXTENT(u64 LE) * RANK || ELEMENTS
/// ```
///
/// Existing bytes are never rewritten, so [`bytes`](OutputBuffer::bytes) taken
/// after `n` pushes is a prefix of the bytes taken after `n + 1`.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    writer: Writer,
    count: usize,
}

impl OutputBuffer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            writer: Writer::with_capacity(capacity),
            count: 0,
        }
    }

    /// Append the encoding of `variant`.
    pub fn push_back(&mut self, variant: &Variant) {
        let start = self.writer.len();
        write_header(&mut self.writer, variant.tag(), variant.shape());
        variant.elements().encode(&mut self.writer);
        self.finish_record(variant.tag(), variant.shape(), start);
    }

    /// Append the encoding of a typed value without erasing it first.
    ///
    /// Produces the same bytes as pushing the equivalent [`Variant`].
    pub fn push_variable<T: Primitive>(&mut self, variable: &Variable<T>) {
        let start = self.writer.len();
        write_header(&mut self.writer, T::TAG, variable.shape());
        encode_all(variable.data(), &mut self.writer);
        self.finish_record(T::TAG, variable.shape(), start);
    }

    fn finish_record(&mut self, tag: TypeTag, shape: &Shape, start: usize) {
        self.count += 1;
        trace!(
            %tag,
            %shape,
            offset = start,
            len = self.writer.len() - start,
            "pushed record"
        );
    }

    /// Encoded bytes so far.
    pub fn bytes(&self) -> &[u8] {
        self.writer.as_slice()
    }

    /// Number of encoded bytes.
    pub fn len(&self) -> usize {
        self.writer.len()
    }

    /// Returns `true` if nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.writer.is_empty()
    }

    /// Number of records pushed.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Consume the buffer and return its bytes.
    pub fn into_bytes(self) -> Bytes {
        self.writer.into_inner().freeze()
    }
}

fn write_header(writer: &mut Writer, tag: TypeTag, shape: &Shape) {
    writer.write_u8(tag.as_u8());
    writer.write_len(shape.rank());
    for &extent in shape.dims() {
        writer.write_len(extent);
    }
}

impl Extend<Variant> for OutputBuffer {
    fn extend<I: IntoIterator<Item = Variant>>(&mut self, iter: I) {
        for variant in iter {
            self.push_back(&variant);
        }
    }
}

impl<'a> Extend<&'a Variant> for OutputBuffer {
    fn extend<I: IntoIterator<Item = &'a Variant>>(&mut self, iter: I) {
        for variant in iter {
            self.push_back(variant);
        }
    }
}
