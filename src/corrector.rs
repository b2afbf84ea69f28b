//! Rewrites flagged errors in text.
use log::debug;

use crate::{
    matcher::{self, guards},
    types::*,
};

/// Replaces the first occurrence of `needle` for which `accept(before, after)` returns `true`.
/// Returns `None` if there is no such occurrence.
pub fn replace_first<F>(text: &str, needle: &str, replacement: &str, accept: F) -> Option<String>
where
    F: Fn(&str, &str) -> bool,
{
    if needle.is_empty() {
        return None;
    }

    text.match_indices(needle)
        .find(|(i, _)| accept(&text[..*i], &text[i + needle.len()..]))
        .map(|(i, _)| {
            let mut out = String::with_capacity(text.len() + replacement.len());
            out.push_str(&text[..i]);
            out.push_str(replacement);
            out.push_str(&text[i + needle.len()..]);
            out
        })
}

fn starts_word(before: &str) -> bool {
    before.is_empty() || before.ends_with(char::is_whitespace)
}

fn is_hebrew_letter(c: char) -> bool {
    ('א'..='ת').contains(&c)
}

/// Whether the noun ends where `after` starts, i.e. it is not the beginning of a longer word.
/// Links must be closed by `]]`.
fn ends_noun(noun: &str, after: &str) -> bool {
    let after = if noun.starts_with("[[") {
        match after.strip_prefix("]]") {
            Some(rest) => rest,
            None => return false,
        }
    } else {
        after
    };

    !after.starts_with(is_hebrew_letter)
}

/// Flips the gender of the number word of flagged errors.
#[derive(Debug, Clone, Default)]
pub struct Corrector {
    excluded_terms: Vec<String>,
}

impl Corrector {
    pub fn new(excluded_terms: Vec<String>) -> Self {
        Corrector { excluded_terms }
    }

    /// Errors whose noun contains an excluded term are left alone.
    pub fn is_excluded(&self, error: &FlaggedError) -> bool {
        let word = error.word();
        !word.is_empty() && self.excluded_terms.iter().any(|term| word.contains(term.as_str()))
    }

    /// Applies the correction of one error. The occurrence is searched literally in `text`,
    /// skipping quotation templates, so the span of the error is not needed. Returns the text
    /// unchanged if the error is excluded or the phrase can not be found.
    pub fn apply(&self, error: &FlaggedError, text: &str) -> String {
        if self.is_excluded(error) {
            debug!("not correcting excluded \"{}\"", error.word());
            return text.to_owned();
        }

        let quoted = matcher::citation_spans(text);
        let in_prose = |before: &str| !quoted.iter().any(|span| span.contains(&before.len()));

        let replaced = match error.kind() {
            ErrorKind::Agreement(collocation) => replace_first(
                text,
                &collocation.phrase(),
                &format!(
                    "{}{} {}",
                    collocation.prefix(),
                    collocation.number().flipped(),
                    collocation.noun_text()
                ),
                |before, after| {
                    starts_word(before)
                        && ends_noun(collocation.noun_text(), after)
                        && in_prose(before)
                },
            ),
            ErrorKind::TimesIdiom(idiom) => replace_first(
                text,
                &format!("{} ", idiom.phrase()),
                &format!("פי {} ", idiom.number().masculine()),
                |before, after| {
                    starts_word(before)
                        && !guards::follows_al(before)
                        && !after.starts_with("מאות")
                        && in_prose(before)
                },
            ),
        };

        replaced.unwrap_or_else(|| text.to_owned())
    }

    /// Applies the corrections of all errors one after another.
    pub fn fix(&self, errors: &[FlaggedError], text: &str) -> String {
        errors
            .iter()
            .fold(text.to_owned(), |text, error| self.apply(error, &text))
    }
}
