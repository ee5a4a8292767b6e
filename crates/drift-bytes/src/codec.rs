// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Minimal deterministic codec helpers (length-prefixed, LE scalars).

use bytes::{BufMut, BytesMut};

use crate::error::{Error, Limit, Result, StringFault};

/// Append-only writer for little-endian scalars and length-prefixed bytes.
#[derive(Debug, Default)]
pub struct Writer {
    buf: BytesMut,
}

impl Writer {
    /// Create a new writer with a pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Write raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Write a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Write a little-endian u64.
    pub fn write_u64_le(&mut self, value: u64) {
        self.buf.put_u64_le(value);
    }

    /// Write a `usize` as a little-endian u64.
    pub fn write_len(&mut self, len: usize) {
        self.write_u64_le(len as u64);
    }

    /// Write length-prefixed bytes (u64 LE length).
    pub fn write_len_prefixed_bytes(&mut self, bytes: &[u8]) {
        self.write_len(bytes.len());
        self.write_bytes(bytes);
    }

    /// Bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer and return the buffer.
    #[must_use]
    pub fn into_inner(self) -> BytesMut {
        self.buf
    }
}

/// Forward-only reader for little-endian scalars and length-prefixed bytes.
///
/// Offsets reported in errors are absolute positions in the underlying slice.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over the provided byte slice.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Create a reader positioned at `offset`.
    #[must_use]
    pub fn at(bytes: &'a [u8], offset: usize) -> Self {
        Self {
            bytes,
            offset: offset.min(bytes.len()),
        }
    }

    /// Current absolute offset.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Fail with [`Error::BufferUnderflow`] unless `len` bytes remain.
    pub fn ensure(&self, len: usize) -> Result<()> {
        if len > self.remaining() {
            return Err(Error::BufferUnderflow {
                offset: self.offset,
                needed: len,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Take the next `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        let out = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(out)
    }

    /// Take the next `N` bytes as an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let chunk = self.take(N)?;
        let mut raw = [0u8; N];
        raw.copy_from_slice(chunk);
        Ok(raw)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    /// Read a little-endian u64.
    pub fn read_u64_le(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u64 length and narrow it to `usize`.
    ///
    /// A length that does not fit in `usize` cannot be backed by the buffer, so it
    /// is reported as an underflow.
    pub fn read_len(&mut self) -> Result<usize> {
        let offset = self.offset;
        let raw = self.read_u64_le()?;
        usize::try_from(raw).map_err(|_| Error::BufferUnderflow {
            offset,
            needed: usize::MAX,
            remaining: self.remaining(),
        })
    }

    /// Read a u64-length-prefixed UTF-8 string no longer than `max_len` bytes.
    ///
    /// Truncated payloads and invalid UTF-8 are reported as
    /// [`Error::MalformedString`]; a missing length prefix is a plain underflow.
    pub fn read_string(&mut self, max_len: Option<usize>) -> Result<String> {
        let start = self.offset;
        let declared = self.read_u64_le()?;
        let remaining = self.remaining();
        let len = match usize::try_from(declared) {
            Ok(len) if len <= remaining => len,
            _ => {
                self.offset = start;
                return Err(Error::MalformedString {
                    offset: start,
                    reason: StringFault::Truncated {
                        declared,
                        remaining,
                    },
                });
            }
        };
        if let Some(limit) = max_len.filter(|&limit| len > limit) {
            self.offset = start;
            return Err(Error::LimitExceeded {
                what: Limit::StringLen,
                limit,
                actual: len,
            });
        }
        let payload = self.take(len)?;
        match std::str::from_utf8(payload) {
            Ok(s) => Ok(s.to_owned()),
            Err(_) => {
                self.offset = start;
                Err(Error::MalformedString {
                    offset: start,
                    reason: StringFault::InvalidUtf8,
                })
            }
        }
    }
}
