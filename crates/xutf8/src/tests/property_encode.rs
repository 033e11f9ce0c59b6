use quickcheck::QuickCheck;

use crate::{MAX_CODE_POINT, encode, encoded_len};

const FIRST_OF_LEN: [u32; 6] = [0, 0x80, 0x800, 0x1_0000, 0x20_0000, 0x400_0000];

fn test_count() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 100_000 } else { 10_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Property: every 31-bit value encodes to a well-tagged sequence that decodes
/// back to itself; everything above is rejected.
#[test]
fn encode_decode_quickcheck() {
    fn prop(raw: u32) -> bool {
        let Ok(seq) = encode(raw) else {
            return raw > MAX_CODE_POINT && encoded_len(raw).is_none();
        };
        if raw > MAX_CODE_POINT || encoded_len(raw) != Some(seq.len()) {
            return false;
        }

        let len = seq.len();
        let lead = seq[0];
        let lead_ok = if len == 1 {
            lead & 0x80 == 0
        } else {
            lead.leading_ones() as usize == len
        };
        if !lead_ok || !seq[1..].iter().all(|b| b & 0xC0 == 0x80) {
            return false;
        }

        // Shortest form: the value does not fit the previous sequence length.
        if raw < FIRST_OF_LEN[len - 1] {
            return false;
        }

        let mut value = u32::from(lead) & (0xFF >> (len + usize::from(len > 1)));
        for b in &seq[1..] {
            value = (value << 6) | u32::from(b & 0x3F);
        }
        value == raw
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(u32) -> bool);
}

/// Property: `encoded_len` is monotone in the code point.
#[test]
fn length_is_monotone_quickcheck() {
    fn prop(a: u32, b: u32) -> bool {
        let (a, b) = (a & MAX_CODE_POINT, b & MAX_CODE_POINT);
        let (lo, hi) = (a.min(b), a.max(b));
        encoded_len(lo) <= encoded_len(hi)
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(u32, u32) -> bool);
}
