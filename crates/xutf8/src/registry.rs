//! Source-encoding names mapped to decoder factories.

use alloc::{
    boxed::Box,
    collections::{BTreeMap, BTreeSet},
    string::String,
    vec::Vec,
};
use core::fmt;
use std::{io::BufRead, sync::OnceLock};

use tracing::debug;

use crate::source::{ByteOrder, CodePointSource, Latin1Source, Utf8Source, Utf32Source};

/// Builds a decoder over a borrowed reader.
pub type SourceFactory = for<'r> fn(&'r mut dyn BufRead) -> Box<dyn CodePointSource + 'r>;

/// A decoder known to a [`DecoderRegistry`].
#[derive(Clone, Copy)]
pub struct Registration {
    name: &'static str,
    aliases: &'static [&'static str],
    factory: SourceFactory,
}

impl Registration {
    /// Canonical encoding name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Alternative names resolving to the same decoder.
    #[must_use]
    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    /// Instantiates the decoder over `reader`.
    pub fn open<'r>(&self, reader: &'r mut dyn BufRead) -> Box<dyn CodePointSource + 'r> {
        (self.factory)(reader)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

/// Lookup table from encoding names to decoders.
///
/// Names are matched ASCII case-insensitively against canonical names and
/// aliases. A registry is assembled once, by chaining [`register`] calls, and
/// only read afterwards.
///
/// ```rust
/// use xutf8::DecoderRegistry;
///
/// let registry = DecoderRegistry::builtin();
/// assert_eq!(registry.lookup("utf32").unwrap().name(), "UTF-32");
/// assert!(registry.lookup("UTF-16").is_none());
/// ```
///
/// [`register`]: DecoderRegistry::register
#[derive(Debug, Clone, Default)]
pub struct DecoderRegistry {
    entries: Vec<Registration>,
    index: BTreeMap<String, usize>,
}

fn key(name: &str) -> String {
    name.to_ascii_uppercase()
}

fn utf32(reader: &mut dyn BufRead) -> Box<dyn CodePointSource + '_> {
    Box::new(Utf32Source::detect(reader))
}

fn utf32_be(reader: &mut dyn BufRead) -> Box<dyn CodePointSource + '_> {
    Box::new(Utf32Source::with_byte_order(reader, ByteOrder::BigEndian))
}

fn utf32_le(reader: &mut dyn BufRead) -> Box<dyn CodePointSource + '_> {
    Box::new(Utf32Source::with_byte_order(reader, ByteOrder::LittleEndian))
}

fn utf8(reader: &mut dyn BufRead) -> Box<dyn CodePointSource + '_> {
    Box::new(Utf8Source::new(reader))
}

fn latin1(reader: &mut dyn BufRead) -> Box<dyn CodePointSource + '_> {
    Box::new(Latin1Source::new(reader))
}

impl DecoderRegistry {
    /// A registry with no decoders.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding the decoders shipped with this crate.
    #[must_use]
    pub fn with_builtin_decoders() -> Self {
        Self::empty()
            .register("UTF-32", &["UTF32"], utf32)
            .register("UTF-32BE", &["UTF32BE"], utf32_be)
            .register("UTF-32LE", &["UTF32LE"], utf32_le)
            .register("UTF-8", &["UTF8"], utf8)
            .register("ISO-8859-1", &["LATIN1", "L1"], latin1)
    }

    /// The process-wide registry of built-in decoders, built on first use.
    pub fn builtin() -> &'static DecoderRegistry {
        static BUILTIN: OnceLock<DecoderRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let registry = Self::with_builtin_decoders();
            debug!(decoders = registry.len(), "built-in decoder registry ready");
            registry
        })
    }

    /// Adds a decoder under `name` and `aliases`.
    ///
    /// A name that is already taken is rebound to the new decoder.
    #[must_use]
    pub fn register(
        mut self,
        name: &'static str,
        aliases: &'static [&'static str],
        factory: SourceFactory,
    ) -> Self {
        let slot = self.entries.len();
        self.entries.push(Registration {
            name,
            aliases,
            factory,
        });
        for n in core::iter::once(&name).chain(aliases) {
            self.index.insert(key(n), slot);
        }
        self
    }

    /// Finds the decoder registered under `name` or one of its aliases.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Registration> {
        self.index.get(&key(name)).map(|&slot| &self.entries[slot])
    }

    /// Number of decoders still reachable by some name.
    ///
    /// A decoder whose names have all been rebound by later registrations
    /// no longer counts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.values().collect::<BTreeSet<_>>().len()
    }

    /// Whether no decoder is reachable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Canonical names of every reachable decoder, sorted.
    pub fn encodings(&self) -> impl Iterator<Item = &'static str> + '_ {
        let mut names: Vec<&'static str> = self
            .index
            .values()
            .map(|&slot| self.entries[slot].name)
            .collect();
        names.sort_unstable();
        names.dedup();
        names.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("UTF-32", "UTF-32")]
    #[case("utf-32", "UTF-32")]
    #[case("Utf32", "UTF-32")]
    #[case("utf-32be", "UTF-32BE")]
    #[case("UTF32LE", "UTF-32LE")]
    #[case("utf8", "UTF-8")]
    #[case("latin1", "ISO-8859-1")]
    #[case("l1", "ISO-8859-1")]
    fn resolves_names_and_aliases(#[case] query: &str, #[case] canonical: &str) {
        let registration = DecoderRegistry::builtin().lookup(query).unwrap();
        assert_eq!(registration.name(), canonical);
    }

    #[rstest]
    #[case("UTF-16")]
    #[case("UTF-16LE")]
    #[case("")]
    #[case("UTF-32 ")]
    fn unknown_names_miss(#[case] query: &str) {
        assert!(DecoderRegistry::builtin().lookup(query).is_none());
    }

    #[test]
    fn lists_canonical_names() {
        let names: Vec<_> = DecoderRegistry::builtin().encodings().collect();
        assert_eq!(
            names,
            vec!["ISO-8859-1", "UTF-32", "UTF-32BE", "UTF-32LE", "UTF-8"]
        );
    }

    #[test]
    fn later_registration_rebinds_name() {
        let registry = DecoderRegistry::empty()
            .register("UTF-32", &["WIDE"], utf32)
            .register("WIDE", &[], latin1);
        assert_eq!(registry.lookup("utf-32").unwrap().name(), "UTF-32");
        assert_eq!(registry.lookup("wide").unwrap().name(), "WIDE");
        let names: Vec<_> = registry.encodings().collect();
        assert_eq!(names, vec!["UTF-32", "WIDE"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn fully_rebound_decoder_is_not_counted() {
        let registry = DecoderRegistry::empty()
            .register("UTF-8", &["UTF8"], utf8)
            .register("UTF-8", &["UTF8"], latin1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.encodings().count(), 1);

        let mut input: &[u8] = b"\xE9";
        let mut source = registry.lookup("utf8").unwrap().open(&mut input);
        assert_eq!(source.name(), "ISO-8859-1");
        assert_eq!(source.next_code_point().unwrap(), Some(0xE9));
    }

    #[test]
    fn builtin_registry_counts_each_decoder_once() {
        assert_eq!(DecoderRegistry::builtin().len(), 5);
    }

    #[test]
    fn opened_decoder_reads_from_reader() {
        let mut input: &[u8] = b"hi";
        let registration = DecoderRegistry::builtin().lookup("ISO-8859-1").unwrap();
        let mut source = registration.open(&mut input);
        assert_eq!(source.name(), "ISO-8859-1");
        assert_eq!(source.next_code_point().unwrap(), Some(u32::from(b'h')));
    }

    #[test]
    fn empty_registry_knows_nothing() {
        let registry = DecoderRegistry::empty();
        assert!(registry.lookup("UTF-32").is_none());
        assert_eq!(registry.encodings().count(), 0);
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
