use std::io::BufRead;

use super::{CodePointSource, read_up_to};
use crate::error::DecodeError;

/// ISO-8859-1: each byte is the code point of the same value.
pub struct Latin1Source<'r> {
    reader: &'r mut dyn BufRead,
}

impl<'r> Latin1Source<'r> {
    /// Decodes ISO-8859-1 from `reader`.
    pub fn new(reader: &'r mut dyn BufRead) -> Self {
        Self { reader }
    }
}

impl CodePointSource for Latin1Source<'_> {
    fn next_code_point(&mut self) -> Result<Option<u32>, DecodeError> {
        let mut byte = [0u8; 1];
        let n = read_up_to(self.reader, &mut byte)?;
        Ok((n == 1).then_some(u32::from(byte[0])))
    }

    fn name(&self) -> &'static str {
        "ISO-8859-1"
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::source::test_support::drain;

    #[test]
    fn bytes_map_to_code_points() {
        let mut input: &[u8] = &[0x00, 0x41, 0x7F, 0x80, 0xE9, 0xFF];
        let (cps, err) = drain(&mut Latin1Source::new(&mut input));
        assert!(err.is_none());
        assert_eq!(cps, vec![0x00, 0x41, 0x7F, 0x80, 0xE9, 0xFF]);
    }
}
