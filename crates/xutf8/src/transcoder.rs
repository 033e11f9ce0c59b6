//! One-shot conversion of a source stream into extended UTF-8.
//!
//! A [`Transcoder`] is `Fresh` until [`convert`](Transcoder::convert) runs.
//! That call consumes the single attempt whatever its outcome: the input has
//! been read and the output written, and neither can be rewound, so the
//! transcoder is `Done` afterwards and refuses further conversion or
//! configuration.

use alloc::borrow::ToOwned;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};

use tracing::{debug, trace, warn};

use crate::{
    encoder::{BOM, encode},
    error::{DecodeError, TranscodeError},
    options::TranscoderOptions,
    registry::{DecoderRegistry, Registration},
};

/// What a successful conversion produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Code points pulled from the source and encoded.
    pub code_points: u64,
    /// Bytes handed to the output, byte-order mark included.
    pub bytes_written: u64,
    /// Whether the byte-order mark was written.
    pub bom_written: bool,
}

/// Converts one input stream, decoded with a registered source encoding, into
/// extended UTF-8 on an output sink.
pub struct Transcoder<R, W> {
    input: R,
    output: W,
    registration: Registration,
    options: TranscoderOptions,
    conversion_done: bool,
}

impl<R, W> Transcoder<R, W> {
    /// Creates a transcoder decoding `input` with one of the built-in
    /// decoders.
    ///
    /// # Errors
    ///
    /// [`TranscodeError::UnsupportedEncoding`] when `source_encoding` is not
    /// registered. Neither stream is touched in that case.
    pub fn new(input: R, output: W, source_encoding: &str) -> Result<Self, TranscodeError> {
        Self::with_registry(input, output, source_encoding, DecoderRegistry::builtin())
    }

    /// Like [`new`](Self::new), resolving `source_encoding` in `registry`.
    ///
    /// # Errors
    ///
    /// [`TranscodeError::UnsupportedEncoding`] when `source_encoding` is not
    /// in `registry`.
    pub fn with_registry(
        input: R,
        output: W,
        source_encoding: &str,
        registry: &DecoderRegistry,
    ) -> Result<Self, TranscodeError> {
        let registration = *registry
            .lookup(source_encoding)
            .ok_or_else(|| TranscodeError::UnsupportedEncoding(source_encoding.to_owned()))?;
        Ok(Self {
            input,
            output,
            registration,
            options: TranscoderOptions::default(),
            conversion_done: false,
        })
    }

    /// Canonical name of the source encoding.
    #[must_use]
    pub fn source_encoding(&self) -> &'static str {
        self.registration.name()
    }

    /// Whether a byte-order mark is requested.
    #[must_use]
    pub fn write_bom(&self) -> bool {
        self.options.write_bom
    }

    /// Requests (or cancels) the byte-order mark.
    ///
    /// # Errors
    ///
    /// [`TranscodeError::InvalidState`] once a conversion has run.
    pub fn set_write_bom(&mut self, write_bom: bool) -> Result<(), TranscodeError> {
        self.ensure_fresh()?;
        self.options.write_bom = write_bom;
        Ok(())
    }

    /// Current configuration.
    #[must_use]
    pub fn options(&self) -> &TranscoderOptions {
        &self.options
    }

    /// Replaces the whole configuration.
    ///
    /// # Errors
    ///
    /// [`TranscodeError::InvalidState`] once a conversion has run.
    pub fn set_options(&mut self, options: TranscoderOptions) -> Result<(), TranscodeError> {
        self.ensure_fresh()?;
        self.options = options;
        Ok(())
    }

    /// Whether [`convert`](Self::convert) has run, successfully or not.
    #[must_use]
    pub fn is_conversion_done(&self) -> bool {
        self.conversion_done
    }

    /// The output sink.
    pub fn get_ref(&self) -> &W {
        &self.output
    }

    /// Gives back the input and output streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn ensure_fresh(&self) -> Result<(), TranscodeError> {
        if self.conversion_done {
            return Err(TranscodeError::InvalidState("conversion already done"));
        }
        Ok(())
    }
}

impl<R: Read, W: Write> Transcoder<R, W> {
    /// Runs the conversion.
    ///
    /// Writes the byte-order mark if requested and the input is not empty,
    /// then every decoded code point in input order. The transcoder is marked
    /// done before this returns, on success and on failure alike.
    ///
    /// When the conversion fails part way, bytes already encoded are flushed
    /// to the sink on a best-effort basis as the output buffer is dropped.
    ///
    /// # Errors
    ///
    /// * [`TranscodeError::InvalidState`] if a conversion already ran.
    /// * [`TranscodeError::SourceDecoding`] if the input cannot be decoded.
    /// * [`TranscodeError::InvalidCodePoint`] if a decoded value is outside
    ///   `[0, 0x7FFF_FFFF]`.
    /// * [`TranscodeError::SinkWrite`] if the output rejects a write or flush.
    pub fn convert(&mut self) -> Result<ConversionSummary, TranscodeError> {
        self.ensure_fresh()?;
        debug!(
            encoding = self.registration.name(),
            write_bom = self.options.write_bom,
            "starting conversion"
        );

        let result = self.run();
        self.conversion_done = true;

        match &result {
            Ok(summary) => debug!(
                code_points = summary.code_points,
                bytes_written = summary.bytes_written,
                "conversion finished"
            ),
            Err(err) => warn!(error = %err, "conversion failed"),
        }
        result
    }

    fn run(&mut self) -> Result<ConversionSummary, TranscodeError> {
        let mut out = BufWriter::with_capacity(self.options.buffer_capacity, &mut self.output);
        let mut reader = BufReader::new(&mut self.input);
        let mut summary = ConversionSummary::default();

        let bom = self.options.write_bom
            && !reader.fill_buf().map_err(DecodeError::from)?.is_empty();

        let mut source = self.registration.open(&mut reader);
        if bom {
            out.write_all(&BOM).map_err(TranscodeError::SinkWrite)?;
            summary.bom_written = true;
            summary.bytes_written += BOM.len() as u64;
            trace!("wrote byte-order mark");
        }

        while let Some(code_point) = source.next_code_point()? {
            let sequence = encode(code_point)?;
            out.write_all(&sequence).map_err(TranscodeError::SinkWrite)?;
            summary.code_points += 1;
            summary.bytes_written += sequence.len() as u64;
        }
        drop(source);

        out.flush().map_err(TranscodeError::SinkWrite)?;
        Ok(summary)
    }
}
