// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bounds applied by [`InputBuffer`](crate::InputBuffer) while decoding.
//!
//! Decoding never allocates more than the buffer could possibly back, so the
//! defaults accept every record an [`OutputBuffer`](crate::OutputBuffer) can
//! write. Tighten the bounds when bytes come from an untrusted peer.

/// Decoder configuration.
///
/// With the `serde` feature, limits can be loaded from JSON; see
/// [`DecodeLimits::from_json`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeLimits {
    /// Maximum number of dimensions in a record's shape. `None` means unbounded.
    pub max_rank: Option<usize>,
    /// Maximum element count of a single record. `None` means unbounded.
    pub max_elements: Option<usize>,
    /// Maximum byte length of a single string element. `None` means unbounded.
    pub max_string_len: Option<usize>,
}

impl DecodeLimits {
    /// Limits that accept anything the buffer can back. Same as `default()`.
    pub const fn unbounded() -> Self {
        Self {
            max_rank: None,
            max_elements: None,
            max_string_len: None,
        }
    }

    /// Set the maximum rank.
    pub fn with_max_rank(mut self, max_rank: usize) -> Self {
        self.max_rank = Some(max_rank);
        self
    }

    /// Set the maximum element count per record.
    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = Some(max_elements);
        self
    }

    /// Set the maximum byte length per string element.
    pub fn with_max_string_len(mut self, max_string_len: usize) -> Self {
        self.max_string_len = Some(max_string_len);
        self
    }

    /// Parse limits from a JSON document. Missing fields take their default.
    ///
    /// ```
    /// use drift_bytes::DecodeLimits;
    ///
    /// let limits = DecodeLimits::from_json(br#"{ "max_elements": 4096 }"#).unwrap();
    /// assert_eq!(limits.max_rank, None);
    /// assert_eq!(limits.max_elements, Some(4096));
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Render limits as pretty-printed JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}
