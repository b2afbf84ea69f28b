//! The morphological lexicon consulted to determine the gender of nouns.
//!
//! The classifier only depends on the [Lexicon] trait. [MemoryLexicon] is a simple
//! implementation built from a dump of base forms and their readings.
use fs_err::File;
use fst::{IntoStreamer, Map, MapBuilder, Streamer};
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    convert::TryFrom,
    io::{BufRead, BufReader, Read, Write},
    path::Path,
    sync::Arc,
};

use crate::Error;

mod levenshtein;

use levenshtein::Levenshtein;

/// One way to read a word as a prefix followed by a dictionary base form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Split {
    /// Length of the prefix in chars.
    pub prefix_len: usize,
    pub base: String,
}

impl Split {
    pub fn new<S: Into<String>>(prefix_len: usize, base: S) -> Self {
        Split {
            prefix_len,
            base: base.into(),
        }
    }

    /// The prefix part of `word`, the word this split was computed for.
    pub fn prefix<'w>(&self, word: &'w str) -> &'w str {
        let end = word
            .char_indices()
            .nth(self.prefix_len)
            .map_or(word.len(), |(i, _)| i);
        &word[..end]
    }
}

/// A read-only morphological oracle.
///
/// Implementations must tolerate any input: unknown words yield empty answers.
pub trait Lexicon: Send + Sync {
    /// Whether the word is valid, possibly with a prefix.
    fn is_known(&self, word: &str) -> bool;

    /// All readings of `word` as an (optionally empty) prefix followed by a base form.
    fn enum_splits(&self, word: &str) -> Vec<Split>;

    /// One comma-joined reading per analysis of the base form e.g. `ע,ז,רבים`.
    fn tags_for(&self, base: &str) -> Vec<String>;

    /// Whether there is a known word which is a near-miss spelling of `word`.
    fn try_correct(&self, word: &str) -> bool;
}

impl<'a, T> Lexicon for &'a T
where
    T: Lexicon + ?Sized,
{
    fn is_known(&self, word: &str) -> bool {
        (*self).is_known(word)
    }

    fn enum_splits(&self, word: &str) -> Vec<Split> {
        (*self).enum_splits(word)
    }

    fn tags_for(&self, base: &str) -> Vec<String> {
        (*self).tags_for(base)
    }

    fn try_correct(&self, word: &str) -> bool {
        (*self).try_correct(word)
    }
}

impl<T> Lexicon for Arc<T>
where
    T: Lexicon + ?Sized,
{
    fn is_known(&self, word: &str) -> bool {
        (**self).is_known(word)
    }

    fn enum_splits(&self, word: &str) -> Vec<Split> {
        (**self).enum_splits(word)
    }

    fn tags_for(&self, base: &str) -> Vec<String> {
        (**self).tags_for(base)
    }

    fn try_correct(&self, word: &str) -> bool {
        (**self).try_correct(word)
    }
}

/// Prefixes which can be attached to a base form. The empty prefix is implied.
pub const PREFIXES: &[&str] = &[
    "ו", "ה", "ב", "כ", "ל", "מ", "ש", "וה", "וב", "וכ", "ול", "ומ", "וש", "שה", "שב", "שכ", "של",
    "שמ", "כש", "מש", "לכש", "וכש", "ומש", "ושה", "ושב", "ושל", "ושמ", "מה", "כשה", "משה",
];

fn splits_of(word: &str) -> impl Iterator<Item = (&str, &str)> {
    std::iter::once("")
        .chain(PREFIXES.iter().copied())
        .filter_map(move |prefix| word.strip_prefix(prefix).map(|base| (prefix, base)))
        .filter(|(_, base)| !base.is_empty())
}

#[derive(Serialize, Deserialize)]
pub(crate) struct MemoryLexiconFields {
    fst: Vec<u8>,
    readings: Vec<Vec<String>>,
}

impl TryFrom<MemoryLexiconFields> for MemoryLexicon {
    type Error = fst::Error;

    fn try_from(data: MemoryLexiconFields) -> Result<Self, Self::Error> {
        Map::new(data.fst.as_slice())?;

        Ok(MemoryLexicon {
            fst: data.fst,
            readings: data.readings,
        })
    }
}

impl From<MemoryLexicon> for MemoryLexiconFields {
    fn from(lexicon: MemoryLexicon) -> Self {
        MemoryLexiconFields {
            fst: lexicon.fst,
            readings: lexicon.readings,
        }
    }
}

/// An in-memory lexicon. Base forms are stored in an FST mapping to an index into the readings.
///
/// The FST is validated whenever a lexicon is built or deserialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "MemoryLexiconFields", into = "MemoryLexiconFields")]
pub struct MemoryLexicon {
    fst: Vec<u8>,
    readings: Vec<Vec<String>>,
}

impl MemoryLexicon {
    /// Creates a lexicon from `(base form, reading)` pairs in any order.
    pub fn from_entries<I, S, T>(entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (base, reading) in entries {
            let group = grouped.entry(base.into()).or_insert_with(Vec::new);
            let reading = reading.into();
            if !group.contains(&reading) {
                group.push(reading);
            }
        }

        let mut builder = MapBuilder::memory();
        let mut readings = Vec::with_capacity(grouped.len());

        // `BTreeMap` iterates in byte order, which is the order the FST needs.
        for (i, (base, group)) in grouped.into_iter().enumerate() {
            builder.insert(base, i as u64)?;
            readings.push(group);
        }

        Ok(MemoryLexicon {
            fst: builder.into_inner()?,
            readings,
        })
    }

    /// Creates a lexicon from a dump with one `base<TAB>reading` pair per line.
    /// Empty lines and lines starting with `#` are ignored.
    pub fn from_dump<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut entries = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split('\t');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(base), Some(reading), None) if !base.is_empty() && !reading.is_empty() => {
                    entries.push((base.to_owned(), reading.to_owned()));
                }
                _ => {
                    return Err(Error::MalformedDump {
                        line: i + 1,
                        content: line.to_owned(),
                    })
                }
            }
        }

        Self::from_entries(entries)
    }

    /// Creates a lexicon from a dump file. See [MemoryLexicon::from_dump].
    pub fn from_dump_path<P: AsRef<Path>>(p: P) -> Result<Self, Error> {
        let lexicon = Self::from_dump(BufReader::new(File::open(p.as_ref())?))?;
        info!("read {} base forms from dump", lexicon.len());
        Ok(lexicon)
    }

    /// Loads a lexicon binary created with [MemoryLexicon::to_writer].
    ///
    /// # Errors
    /// - If the file can not be opened.
    /// - If the file content can not be deserialized to a lexicon.
    pub fn new<P: AsRef<Path>>(p: P) -> Result<Self, Error> {
        Self::from_reader(BufReader::new(File::open(p.as_ref())?))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        Ok(bincode::deserialize_from(reader)?)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        Ok(bincode::serialize_into(writer, self)?)
    }

    /// The number of base forms.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    fn map(&self) -> Map<&[u8]> {
        Map::new(self.fst.as_slice()).expect("lexicon fst is validated on construction and deserialization.")
    }

    fn contains(&self, base: &str) -> bool {
        self.map().contains_key(base)
    }

    fn has_near_miss(&self, base: &str) -> bool {
        let map = self.map();
        let mut stream = map.search(Levenshtein::new(base, 1)).into_stream();
        stream.next().is_some()
    }
}

impl Lexicon for MemoryLexicon {
    fn is_known(&self, word: &str) -> bool {
        splits_of(word).any(|(_, base)| self.contains(base))
    }

    fn enum_splits(&self, word: &str) -> Vec<Split> {
        splits_of(word)
            .filter(|(_, base)| self.contains(base))
            .map(|(prefix, base)| Split::new(prefix.chars().count(), base))
            .collect()
    }

    fn tags_for(&self, base: &str) -> Vec<String> {
        self.map()
            .get(base)
            .and_then(|i| self.readings.get(i as usize))
            .cloned()
            .unwrap_or_default()
    }

    fn try_correct(&self, word: &str) -> bool {
        splits_of(word).any(|(_, base)| self.has_near_miss(base))
    }
}
