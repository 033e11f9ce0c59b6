use std::io::BufRead;

use super::{CodePointSource, read_up_to};
use crate::error::DecodeError;

const NAME: &str = "UTF-8";

/// Standard UTF-8 decoder (1 to 4 byte sequences, strict).
pub struct Utf8Source<'r> {
    reader: &'r mut dyn BufRead,
    offset: u64,
}

impl<'r> Utf8Source<'r> {
    /// Decodes UTF-8 from `reader`.
    pub fn new(reader: &'r mut dyn BufRead) -> Self {
        Self { reader, offset: 0 }
    }

    fn malformed(&self) -> DecodeError {
        DecodeError::Malformed {
            encoding: NAME,
            offset: self.offset,
        }
    }
}

// Sequence width announced by a leading byte; `None` for bytes that can never
// start a sequence.
fn sequence_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

impl CodePointSource for Utf8Source<'_> {
    fn next_code_point(&mut self) -> Result<Option<u32>, DecodeError> {
        let mut scratch = [0u8; 4];
        if read_up_to(self.reader, &mut scratch[..1])? == 0 {
            return Ok(None);
        }
        let width = sequence_width(scratch[0]).ok_or_else(|| self.malformed())?;

        let found = 1 + read_up_to(self.reader, &mut scratch[1..width])?;
        if found < width {
            return Err(DecodeError::Truncated {
                offset: self.offset,
                expected: width,
                found,
            });
        }

        match bstr::decode_utf8(&scratch[..width]) {
            (Some(ch), len) if len == width => {
                self.offset += width as u64;
                Ok(Some(u32::from(ch)))
            }
            _ => Err(self.malformed()),
        }
    }

    fn name(&self) -> &'static str {
        NAME
    }
}
