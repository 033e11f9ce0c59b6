use std::io::BufRead;

use super::{CodePointSource, read_up_to};
use crate::error::DecodeError;

const WORD: usize = 4;
const BOM_BE: [u8; WORD] = [0x00, 0x00, 0xFE, 0xFF];
const BOM_LE: [u8; WORD] = [0xFF, 0xFE, 0x00, 0x00];

/// Byte order of 32-bit code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first.
    BigEndian,
    /// Least significant byte first.
    LittleEndian,
}

impl ByteOrder {
    fn word(self, bytes: [u8; WORD]) -> u32 {
        match self {
            Self::BigEndian => u32::from_be_bytes(bytes),
            Self::LittleEndian => u32::from_le_bytes(bytes),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Byte order is taken from a leading BOM, big-endian when there is none.
    Detect,
    Fixed(ByteOrder),
}

/// UTF-32 decoder.
///
/// Every word is yielded as-is: values above `0x10FFFF`, and even above
/// `0x7FFF_FFFF`, are passed through for the encoder to judge.
pub struct Utf32Source<'r> {
    reader: &'r mut dyn BufRead,
    mode: Mode,
    offset: u64,
}

impl<'r> Utf32Source<'r> {
    /// `UTF-32`: a leading BOM selects the byte order and is consumed.
    pub fn detect(reader: &'r mut dyn BufRead) -> Self {
        Self {
            reader,
            mode: Mode::Detect,
            offset: 0,
        }
    }

    /// `UTF-32BE` / `UTF-32LE`: fixed byte order, a BOM is ordinary data.
    pub fn with_byte_order(reader: &'r mut dyn BufRead, order: ByteOrder) -> Self {
        Self {
            reader,
            mode: Mode::Fixed(order),
            offset: 0,
        }
    }

    fn read_word(&mut self) -> Result<Option<[u8; WORD]>, DecodeError> {
        let mut buf = [0u8; WORD];
        let found = read_up_to(self.reader, &mut buf)?;
        match found {
            0 => Ok(None),
            WORD => {
                self.offset += WORD as u64;
                Ok(Some(buf))
            }
            found => Err(DecodeError::Truncated {
                offset: self.offset,
                expected: WORD,
                found,
            }),
        }
    }
}

impl CodePointSource for Utf32Source<'_> {
    fn next_code_point(&mut self) -> Result<Option<u32>, DecodeError> {
        let Some(bytes) = self.read_word()? else {
            return Ok(None);
        };
        let order = match self.mode {
            Mode::Fixed(order) => order,
            Mode::Detect => {
                let (order, is_bom) = match bytes {
                    BOM_BE => (ByteOrder::BigEndian, true),
                    BOM_LE => (ByteOrder::LittleEndian, true),
                    _ => (ByteOrder::BigEndian, false),
                };
                self.mode = Mode::Fixed(order);
                if is_bom {
                    return self.next_code_point();
                }
                order
            }
        };
        Ok(Some(order.word(bytes)))
    }

    fn name(&self) -> &'static str {
        match self.mode {
            Mode::Detect => "UTF-32",
            Mode::Fixed(ByteOrder::BigEndian) => "UTF-32BE",
            Mode::Fixed(ByteOrder::LittleEndian) => "UTF-32LE",
        }
    }
}
