//! Streaming transcoder from decoded code points into extended UTF-8.
//!
//! The target form is structurally UTF-8 but keeps the pre-2003 6-byte
//! sequences, so every value up to `0x7FFF_FFFF` has an encoding. Code points
//! are not checked for Unicode validity: surrogates and values above
//! `0x10FFFF` are encoded like any other number in range.
//!
//! ```rust
//! # #[cfg(feature = "std")]
//! # fn main() -> Result<(), xutf8::TranscodeError> {
//! use xutf8::Transcoder;
//!
//! let input: &[u8] = &[0x00, 0x00, 0x05, 0x65];
//! let output: Vec<u8> = Vec::new();
//! let mut transcoder = Transcoder::new(input, output, "UTF-32")?;
//! transcoder.set_write_bom(true)?;
//! transcoder.convert()?;
//!
//! let (_, output) = transcoder.into_inner();
//! assert_eq!(output, [0xEF, 0xBB, 0xBF, 0xD5, 0xA5]);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "std"))]
//! # fn main() {}
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod encoder;
mod error;
#[cfg(feature = "std")]
mod options;
#[cfg(feature = "std")]
mod registry;
#[cfg(feature = "std")]
pub mod source;
#[cfg(feature = "std")]
mod transcoder;

#[cfg(test)]
mod tests;

pub use encoder::{BOM, EncodedSequence, MAX_CODE_POINT, MAX_SEQUENCE_LEN, encode, encoded_len};
pub use error::InvalidCodePoint;
#[cfg(feature = "std")]
pub use error::{DecodeError, TranscodeError};
#[cfg(feature = "std")]
pub use options::TranscoderOptions;
#[cfg(feature = "std")]
pub use registry::{DecoderRegistry, Registration, SourceFactory};
#[cfg(feature = "std")]
pub use source::CodePointSource;
#[cfg(feature = "std")]
pub use transcoder::{ConversionSummary, Transcoder};
