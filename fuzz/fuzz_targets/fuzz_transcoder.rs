#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use xutf8::{BOM, DecoderRegistry, Transcoder, TranscoderOptions};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    encoding: u8,
    write_bom: bool,
    buffer_capacity: u8,
    data: &'a [u8],
}

/// Splits `bytes` into extended UTF-8 sequences, returning the number of
/// sequences, or `None` at the first ill-formed one.
fn count_sequences(mut bytes: &[u8]) -> Option<u64> {
    let mut count = 0;
    while let Some(&lead) = bytes.first() {
        let len = match lead.leading_ones() {
            0 => 1,
            n @ 2..=6 => n as usize,
            _ => return None,
        };
        let tail = bytes.get(1..len)?;
        if !tail.iter().all(|b| b & 0xC0 == 0x80) {
            return None;
        }
        bytes = &bytes[len..];
        count += 1;
    }
    Some(count)
}

fn transcode(input: &Input<'_>) {
    let names: Vec<_> = DecoderRegistry::builtin().encodings().collect();
    let encoding = names[usize::from(input.encoding) % names.len()];

    let mut transcoder = Transcoder::new(input.data, Vec::<u8>::new(), encoding).unwrap();
    transcoder
        .set_options(TranscoderOptions {
            write_bom: input.write_bom,
            buffer_capacity: usize::from(input.buffer_capacity),
        })
        .unwrap();
    let result = transcoder.convert();
    assert!(transcoder.is_conversion_done());
    assert!(transcoder.convert().is_err());

    let output = transcoder.get_ref().as_slice();
    let body = match output.strip_prefix(&BOM) {
        Some(rest) if input.write_bom => rest,
        _ => output,
    };
    assert!(!input.write_bom || input.data.is_empty() || output.starts_with(&BOM));
    let sequences = count_sequences(body).expect("output is well formed");

    if let Ok(summary) = result {
        assert_eq!(summary.bom_written, input.write_bom && !input.data.is_empty());
        assert_eq!(summary.bytes_written, output.len() as u64);
        assert_eq!(summary.code_points, sequences);
    }
}

fuzz_target!(|input: Input<'_>| transcode(&input));
