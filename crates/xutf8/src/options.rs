/// Configuration for a [`Transcoder`](crate::Transcoder).
///
/// ```rust
/// use xutf8::TranscoderOptions;
///
/// let options = TranscoderOptions {
///     write_bom: true,
///     ..Default::default()
/// };
/// assert_eq!(options.buffer_capacity, TranscoderOptions::DEFAULT_BUFFER_CAPACITY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TranscoderOptions {
    /// Whether to write the byte-order mark `EF BB BF` before the encoded
    /// data.
    ///
    /// The mark is only written when the input has at least one byte; an
    /// empty input always produces an empty output.
    ///
    /// # Default
    ///
    /// `false`
    pub write_bom: bool,

    /// Capacity, in bytes, of the buffer placed in front of the output sink.
    ///
    /// # Default
    ///
    /// [`TranscoderOptions::DEFAULT_BUFFER_CAPACITY`]
    pub buffer_capacity: usize,
}

impl TranscoderOptions {
    /// Output buffer size used unless configured otherwise.
    pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;
}

impl Default for TranscoderOptions {
    fn default() -> Self {
        Self {
            write_bom: false,
            buffer_capacity: Self::DEFAULT_BUFFER_CAPACITY,
        }
    }
}
