//! Decoders turning raw input bytes into a stream of code points.
//!
//! Each decoder borrows a [`BufRead`] for the duration of one conversion and
//! yields values one at a time. Dropping a decoder releases everything it
//! holds; the reader itself stays with its owner.

use std::io::{self, BufRead};

use crate::error::DecodeError;

mod latin1;
mod utf32;
mod utf8;

pub use latin1::Latin1Source;
pub use utf32::{ByteOrder, Utf32Source};
pub use utf8::Utf8Source;

/// A single-pass sequence of code points decoded from some source encoding.
///
/// `Ok(None)` marks the end of the stream and is distinct from the valid code
/// point `0`. Malformed input must surface as an error; a decoder never
/// substitutes a replacement value.
pub trait CodePointSource {
    /// Decodes the next code point.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the reader fails or the input is not valid
    /// in the source encoding. The stream is unusable afterwards.
    fn next_code_point(&mut self) -> Result<Option<u32>, DecodeError>;

    /// Canonical name of the source encoding.
    fn name(&self) -> &'static str;
}

/// Fills `buf` from `reader`, stopping early only at end of input.
///
/// Returns the number of bytes read; anything less than `buf.len()` means the
/// input ended.
pub(crate) fn read_up_to(reader: &mut dyn BufRead, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
