//! Decides whether a collocation violates gender agreement.
//!
//! The decision has two explicit stages: [Classifier::lookup] asks the lexicon about the noun
//! and returns a [LexiconVerdict], [decide] turns the verdict into an [Outcome]. Nouns known to
//! the lexicon are judged by their readings, unknown nouns by their plural suffix.
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    lexicon::Lexicon,
    matcher::{strip_link_markup, Matches},
    types::*,
};

/// Prefixes which may be attached to the noun. Any other prefix means that the word has
/// a reading in which the letter is part of something else (e.g. "באמצעות") and the decision
/// would be unsafe.
pub const ALLOWED_NOUN_PREFIXES: &[&str] = &["", "ה"];

const MASCULINE_PLURAL_SUFFIX: &str = "ים";
const FEMININE_PLURAL_SUFFIX: &str = "ות";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Options to configure the checks.
pub struct CheckOptions {
    /// Whether to guess the gender of nouns unknown to the lexicon from their plural suffix.
    pub guess_unknown_gender: bool,
    /// Whether to report "פי" ("times") followed by a feminine number.
    pub check_times_idiom: bool,
    /// Errors whose noun contains one of these are never corrected automatically.
    pub excluded_terms: Vec<String>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions {
            guess_unknown_gender: true,
            check_times_idiom: true,
            excluded_terms: vec!["דברות".to_owned()],
        }
    }
}

/// What the lexicon knows about a noun.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexiconVerdict {
    /// The noun is known. Contains the readings of all its base forms.
    Known(Vec<String>),
    /// The noun is not known and there is no similar known word.
    Unknown,
    /// The noun is not known, but probably a spelling variant of a known word.
    SpellingVariant,
    /// The noun is known, but can be read with a prefix other than [ALLOWED_NOUN_PREFIXES].
    UnsafePrefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Error,
    NoError,
    Inconclusive,
}

impl Outcome {
    fn from_genders(noun: Gender, expected: Gender) -> Self {
        if noun == expected {
            Outcome::NoError
        } else {
            Outcome::Error
        }
    }
}

/// A view on a comma-joined reading like `ע,ז,רבים`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading<'a> {
    pos: &'a str,
    masculine: bool,
    feminine: bool,
    plural: bool,
}

impl<'a> Reading<'a> {
    pub fn parse(reading: &'a str) -> Self {
        let mut fields = reading.split(',');
        let pos = fields.next().unwrap_or("");
        let mut out = Reading {
            pos,
            masculine: false,
            feminine: false,
            plural: false,
        };

        for field in fields {
            if field == Gender::Masculine.code() {
                out.masculine = true;
            } else if field == Gender::Feminine.code() {
                out.feminine = true;
            } else if field.contains("רבים") {
                out.plural = true;
            }
        }

        out
    }

    /// The part of speech code, e.g. `ע` for nouns.
    pub fn pos(&self) -> &str {
        self.pos
    }

    pub fn is_plural(&self) -> bool {
        self.plural
    }

    pub fn has_gender(&self) -> bool {
        self.masculine || self.feminine
    }

    /// Nouns like "פנים" which are both masculine and feminine.
    pub fn is_common_gender(&self) -> bool {
        self.masculine && self.feminine
    }

    pub fn has(&self, gender: Gender) -> bool {
        match gender {
            Gender::Masculine => self.masculine,
            Gender::Feminine => self.feminine,
        }
    }
}

/// Guesses the gender of a noun from its plural suffix.
pub fn guess_gender(word: &str) -> Option<Gender> {
    if word.ends_with(MASCULINE_PLURAL_SUFFIX) {
        Some(Gender::Masculine)
    } else if word.ends_with(FEMININE_PLURAL_SUFFIX) {
        Some(Gender::Feminine)
    } else {
        None
    }
}

/// Turns a verdict on a noun into an outcome given the gender the number expects.
pub fn decide(verdict: &LexiconVerdict, word: &str, expected: Gender, guess: bool) -> Outcome {
    match verdict {
        LexiconVerdict::SpellingVariant | LexiconVerdict::UnsafePrefix => Outcome::Inconclusive,
        LexiconVerdict::Unknown => {
            if !guess {
                return Outcome::Inconclusive;
            }

            guess_gender(word).map_or(Outcome::Inconclusive, |gender| {
                Outcome::from_genders(gender, expected)
            })
        }
        LexiconVerdict::Known(tags) => {
            let readings: Vec<_> = tags.iter().map(|x| Reading::parse(x)).collect();

            if readings.is_empty() || readings.iter().any(|x| !x.is_plural() || !x.has_gender()) {
                return Outcome::Inconclusive;
            }

            if readings.iter().any(|x| x.is_common_gender()) {
                return Outcome::NoError;
            }

            if readings.iter().any(|x| x.has(expected)) {
                Outcome::NoError
            } else {
                Outcome::Error
            }
        }
    }
}

/// Classifies collocations using a [Lexicon].
pub struct Classifier<L: Lexicon> {
    lexicon: L,
    options: CheckOptions,
}

impl<L: Lexicon> Classifier<L> {
    pub fn new(lexicon: L, options: CheckOptions) -> Self {
        Classifier { lexicon, options }
    }

    pub fn lexicon(&self) -> &L {
        &self.lexicon
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Asks the lexicon about a plain word (without link markup).
    pub fn lookup(&self, word: &str) -> LexiconVerdict {
        if !self.lexicon.is_known(word) {
            if !self.options.guess_unknown_gender {
                return LexiconVerdict::Unknown;
            }

            return if self.lexicon.try_correct(word) {
                LexiconVerdict::SpellingVariant
            } else {
                LexiconVerdict::Unknown
            };
        }

        let splits = self.lexicon.enum_splits(word);
        if splits.is_empty()
            || splits.iter().any(|split| {
                split.base.is_empty() || !ALLOWED_NOUN_PREFIXES.contains(&split.prefix(word))
            })
        {
            return LexiconVerdict::UnsafePrefix;
        }

        LexiconVerdict::Known(
            splits
                .iter()
                .flat_map(|split| self.lexicon.tags_for(&split.base))
                .collect(),
        )
    }

    pub fn classify(&self, collocation: &Collocation) -> Outcome {
        let word = strip_link_markup(collocation.noun_text());
        let verdict = self.lookup(word);

        decide(
            &verdict,
            word,
            collocation.expected_gender(),
            self.options.guess_unknown_gender,
        )
    }

    /// Computes the errors among all matches of a text.
    pub fn errors(&self, matches: &Matches) -> Vec<FlaggedError> {
        let mut errors: Vec<_> = matches
            .collocations()
            .filter(|collocation| self.classify(collocation) == Outcome::Error)
            .map(|collocation| {
                debug!(
                    "\"{}\" does not agree with \"{}\"",
                    collocation.number_text(),
                    collocation.noun_text()
                );
                FlaggedError::agreement(collocation.clone())
            })
            .collect();

        if self.options.check_times_idiom {
            errors.extend(matches.idioms.iter().map(|idiom| {
                debug!("\"{}\" needs a masculine number", idiom.phrase());
                FlaggedError::times_idiom(idiom.clone())
            }));
        }

        errors
    }
}
