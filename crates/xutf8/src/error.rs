#[cfg(feature = "std")]
use alloc::string::String;
#[cfg(feature = "std")]
use std::io;

use thiserror::Error;

/// A value outside `[0, 0x7FFF_FFFF]` was handed to the encoder.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid code point {0}")]
pub struct InvalidCodePoint(pub i64);

/// Failure while pulling the next code point out of a source decoder.
#[cfg(feature = "std")]
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The underlying reader failed.
    #[error("i/o error reading source: {0}")]
    Io(#[from] io::Error),
    /// The input ended in the middle of a code unit.
    #[error("truncated input at byte {offset}: expected {expected} bytes, found {found}")]
    Truncated {
        /// Byte offset where the incomplete unit starts.
        offset: u64,
        /// Bytes the unit needs.
        expected: usize,
        /// Bytes that were available.
        found: usize,
    },
    /// The bytes at `offset` are not a valid sequence in `encoding`.
    #[error("malformed {encoding} sequence at byte {offset}")]
    Malformed {
        /// Canonical name of the source encoding.
        encoding: &'static str,
        /// Byte offset of the offending sequence.
        offset: u64,
    },
}

/// Errors surfaced by [`Transcoder`](crate::Transcoder).
#[cfg(feature = "std")]
#[derive(Error, Debug)]
pub enum TranscodeError {
    /// No decoder is registered under the requested name.
    #[error("unsupported source encoding '{0}'")]
    UnsupportedEncoding(String),
    /// The call is not allowed once a conversion has run.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
    /// The source produced a value the encoder cannot represent.
    #[error(transparent)]
    InvalidCodePoint(#[from] InvalidCodePoint),
    /// The source decoder failed.
    #[error("source decoding error: {0}")]
    SourceDecoding(#[from] DecodeError),
    /// Writing to the output sink failed.
    #[error("sink write error: {0}")]
    SinkWrite(#[source] io::Error),
}
