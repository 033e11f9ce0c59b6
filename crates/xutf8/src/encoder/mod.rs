//! Code point → extended UTF-8 byte sequence.
//!
//! The domain `[0, 0x7FFF_FFFF]` is split into six contiguous, closed ranges.
//! Each range fixes the sequence length, the tag of the leading byte and how
//! many data bits that byte still carries:
//!
//! | Range                    | Len | Leading byte |
//! |--------------------------|-----|--------------|
//! | `0x00`      – `0x7F`       | 1 | `0xxxxxxx`   |
//! | `0x80`      – `0x7FF`      | 2 | `110xxxxx`   |
//! | `0x800`     – `0xFFFF`     | 3 | `1110xxxx`   |
//! | `0x10000`   – `0x1FFFFF`   | 4 | `11110xxx`   |
//! | `0x200000`  – `0x3FFFFFF`  | 5 | `111110xx`   |
//! | `0x4000000` – `0x7FFFFFFF` | 6 | `1111110x`   |
//!
//! Every byte after the first is a continuation byte `10xxxxxx` carrying six
//! bits. Continuation bytes are filled from the end of the sequence towards
//! index 1, so the most significant bits land in the leading byte.

use core::{fmt, ops::Deref};

use crate::error::InvalidCodePoint;


/// Byte-order mark written in front of the output when requested.
pub const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Largest value the encoder accepts.
pub const MAX_CODE_POINT: u32 = 0x7FFF_FFFF;

/// Longest sequence the encoder produces.
pub const MAX_SEQUENCE_LEN: usize = 6;

const CONTINUATION_TAG: u8 = 0b1000_0000;
const CONTINUATION_MASK: u32 = 0b0011_1111;
const CONTINUATION_BITS: u32 = 6;

#[derive(Debug, Clone, Copy)]
struct SequenceClass {
    last: u32,
    len: usize,
    lead_tag: u8,
    lead_mask: u8,
}

// Ordered by `last`; the first entry with `cp <= last` is the match.
const SEQUENCE_CLASSES: [SequenceClass; MAX_SEQUENCE_LEN] = [
    SequenceClass {
        last: 0x7F,
        len: 1,
        lead_tag: 0b0000_0000,
        lead_mask: 0b0111_1111,
    },
    SequenceClass {
        last: 0x7FF,
        len: 2,
        lead_tag: 0b1100_0000,
        lead_mask: 0b0001_1111,
    },
    SequenceClass {
        last: 0xFFFF,
        len: 3,
        lead_tag: 0b1110_0000,
        lead_mask: 0b0000_1111,
    },
    SequenceClass {
        last: 0x1F_FFFF,
        len: 4,
        lead_tag: 0b1111_0000,
        lead_mask: 0b0000_0111,
    },
    SequenceClass {
        last: 0x3FF_FFFF,
        len: 5,
        lead_tag: 0b1111_1000,
        lead_mask: 0b0000_0011,
    },
    SequenceClass {
        last: MAX_CODE_POINT,
        len: 6,
        lead_tag: 0b1111_1100,
        lead_mask: 0b0000_0001,
    },
];

#[inline]
fn classify(code_point: u32) -> Option<&'static SequenceClass> {
    SEQUENCE_CLASSES.iter().find(|class| code_point <= class.last)
}

#[inline]
fn checked(code_point: i64) -> Result<u32, InvalidCodePoint> {
    u32::try_from(code_point)
        .ok()
        .filter(|&cp| cp <= MAX_CODE_POINT)
        .ok_or(InvalidCodePoint(code_point))
}

/// One encoded code point: between 1 and [`MAX_SEQUENCE_LEN`] bytes.
///
/// The bytes live inline, so producing a sequence never allocates.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedSequence {
    bytes: [u8; MAX_SEQUENCE_LEN],
    len: u8,
}

impl EncodedSequence {
    /// The encoded bytes.
    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }
}

impl Deref for EncodedSequence {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for EncodedSequence {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for EncodedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncodedSequence")
            .field(&bstr::BStr::new(self.as_bytes()))
            .finish()
    }
}

/// Number of bytes `encode` would produce for `code_point`, or `None` when the
/// value is out of range.
#[must_use]
pub fn encoded_len(code_point: impl Into<i64>) -> Option<usize> {
    let cp = checked(code_point.into()).ok()?;
    classify(cp).map(|class| class.len)
}

/// Encodes a single code point.
///
/// Accepts any integer that widens to `i64` so that negative values coming
/// from signed sources are rejected here rather than wrapped.
///
/// # Errors
///
/// Returns [`InvalidCodePoint`] when the value is negative or greater than
/// [`MAX_CODE_POINT`].
///
/// ```rust
/// use xutf8::encode;
///
/// assert_eq!(encode(0x41).unwrap().as_bytes(), b"A");
/// assert_eq!(encode(0x7FFF_FFFF).unwrap().len(), 6);
/// assert!(encode(-1).is_err());
/// ```
pub fn encode(code_point: impl Into<i64>) -> Result<EncodedSequence, InvalidCodePoint> {
    let raw = code_point.into();
    let cp = checked(raw)?;
    let class = classify(cp).ok_or(InvalidCodePoint(raw))?;

    let mut bytes = [0u8; MAX_SEQUENCE_LEN];
    let mut rest = cp;
    for slot in bytes[1..class.len].iter_mut().rev() {
        // Masked to six bits, the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation)]
        let bits = (rest & CONTINUATION_MASK) as u8;
        *slot = CONTINUATION_TAG | bits;
        rest >>= CONTINUATION_BITS;
    }
    #[allow(clippy::cast_possible_truncation)]
    let lead = rest as u8;
    bytes[0] = class.lead_tag | (lead & class.lead_mask);

    #[allow(clippy::cast_possible_truncation)]
    let len = class.len as u8;
    Ok(EncodedSequence { bytes, len })
}
