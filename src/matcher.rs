//! Finds number + noun collocations in wikitext.
//!
//! The grammar is a small set of fixed patterns. The idiomatic exceptions are not encoded in
//! the patterns themselves but checked by the predicates in [guards] once a pattern matched.
//! A rejected match does not consume any text, the search is resumed one character later.

use itertools::Itertools;
use lazy_static::lazy_static;
use onig::{Regex, Region, SearchOptions};
use std::ops::Range;

use crate::types::*;

/// The noun following the number: a bare word, a link `[[word]]` or a piped link `[[target|word]]`.
/// For links only the opening markup and the visible word are captured.
const NOUN: &str = r"([א-ת]{2,}|\[\[[א-ת]{2,}(?=\]\](?![א-ת]))|\[\[[^\]]+?\|[א-ת]{2,}(?=\]\](?![א-ת])))";

fn collocation_pattern(gender: Gender) -> String {
    format!(
        r"(?<!\S)(ו?[משכלב]?ה?)({}) {}",
        NumberForm::series(gender).map(|x| x.as_str()).join("|"),
        NOUN
    )
}

fn times_idiom_pattern() -> String {
    format!(
        r"(?<!\S)פי ({}) (?!מאות)",
        IdiomNumber::ALL.iter().map(|x| x.as_str()).join("|")
    )
}

lazy_static! {
    static ref MASCULINE: Regex =
        Regex::new(&collocation_pattern(Gender::Masculine)).expect("masculine pattern is valid");
    static ref FEMININE: Regex =
        Regex::new(&collocation_pattern(Gender::Feminine)).expect("feminine pattern is valid");
    static ref TIMES_IDIOM: Regex =
        Regex::new(&times_idiom_pattern()).expect("idiom pattern is valid");
    static ref CITATION: Regex = Regex::new(r"\{\{ציטוט(?:[^{]+?|\{\{[^{]+?\}\}).+\}\}")
        .expect("citation pattern is valid");
}

/// Predicates for the exceptions of the pattern grammar.
///
/// All of them take `before`, the text preceding the matched span (or the number word for
/// [continues_teen]).
pub mod guards {
    use crate::types::Gender;

    /// Units which form 11-19 together with the masculine-series "עשרה" e.g. "שלוש עשרה".
    pub const ESRE_UNITS: &[&str] = &[
        "אחת", "שתים", "שתיים", "שלוש", "ארבע", "חמש", "שש", "שבע", "שמונה", "תשע",
    ];

    /// Units which form 11-19 together with the feminine-series "עשר" e.g. "שלושה עשר".
    pub const ESER_UNITS: &[&str] = &[
        "אחד", "שניים", "שנים", "שלושה", "ארבעה", "חמישה", "חמשה", "ששה", "שישה", "שבעה",
        "שמונה", "תשעה",
    ];

    /// Whether the text before the separating whitespace ends with `suffix`.
    pub fn preceded_by(before: &str, suffix: &str) -> bool {
        before
            .strip_suffix(char::is_whitespace)
            .map_or(false, |head| head.ends_with(suffix))
    }

    /// If the previous whole word is `word`, returns the text before it.
    fn strip_previous_word<'t>(before: &'t str, word: &str) -> Option<&'t str> {
        let head = before.strip_suffix(char::is_whitespace)?.strip_suffix(word)?;

        if head.is_empty() || head.ends_with(char::is_whitespace) {
            Some(head)
        } else {
            None
        }
    }

    /// "על פי" means "according to", not "times".
    pub fn follows_al(before: &str) -> bool {
        preceded_by(before, "על")
    }

    /// The number is the argument of "פי" ("times"). These belong to the idiom pattern.
    pub fn follows_times_idiom(before: &str) -> bool {
        strip_previous_word(before, "פי").map_or(false, |head| !follows_al(head))
    }

    /// "מצד שני" means "on the other hand".
    pub fn follows_mitzad(before: &str) -> bool {
        preceded_by(before, "מצד")
    }

    /// "בת שלוש" is an age ("three years old").
    pub fn follows_bat(before: &str) -> bool {
        strip_previous_word(before, "בת").is_some()
    }

    /// Whether a "-teen" word of the given series is only the tail of a compound number.
    /// `before` is the text up to the number word, the last character of which is the separator.
    pub fn continues_teen(before: &str, series: Gender) -> bool {
        let mut chars = before.chars();
        if chars.next_back().is_none() {
            return false;
        }
        let head = chars.as_str();

        let units = match series {
            Gender::Masculine => ESRE_UNITS,
            Gender::Feminine => ESER_UNITS,
        };

        units.iter().any(|unit| head.ends_with(unit))
    }
}

/// All matches in one text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matches {
    /// Collocations with a number of the masculine series.
    pub masculine: Vec<Collocation>,
    /// Collocations with a number of the feminine series.
    pub feminine: Vec<Collocation>,
    /// Occurences of the "פי N" idiom. Never part of `feminine`.
    pub idioms: Vec<IdiomMatch>,
}

impl Matches {
    pub fn is_empty(&self) -> bool {
        self.masculine.is_empty() && self.feminine.is_empty() && self.idioms.is_empty()
    }

    pub fn collocations(&self) -> impl Iterator<Item = &Collocation> {
        self.masculine.iter().chain(self.feminine.iter())
    }
}

/// Removes quotation templates, numbers inside quotes are not the article's own prose.
pub fn strip_citations(text: &str) -> String {
    CITATION.replace_all(text, "")
}

/// Byte spans of the quotation templates removed by [strip_citations].
pub fn citation_spans(text: &str) -> Vec<Range<usize>> {
    CITATION
        .find_iter(text)
        .map(|(start, end)| start..end)
        .collect()
}

/// The plain word of a captured noun, i.e. without the opening link markup.
pub fn strip_link_markup(noun: &str) -> &str {
    match noun.strip_prefix("[[") {
        Some(link) => link.rsplit('|').next().unwrap_or(link),
        None => noun,
    }
}

fn next_char_boundary(text: &str, index: usize) -> usize {
    index + text[index..].chars().next().map_or(1, |c| c.len_utf8())
}

/// Calls `accept` on every leftmost match. If `accept` returns `false`, the search
/// continues at the next character instead of after the match.
fn search_all<F>(regex: &Regex, text: &str, mut accept: F)
where
    F: FnMut(&Region) -> bool,
{
    let mut from = 0;

    while from < text.len() {
        let mut region = Region::new();
        let start = match regex.search_with_options(
            text,
            from,
            text.len(),
            SearchOptions::SEARCH_OPTION_NONE,
            Some(&mut region),
        ) {
            Some(start) => start,
            None => break,
        };
        let end = region.pos(0).map_or(start, |(_, end)| end);

        from = if accept(&region) && end > start {
            end
        } else {
            next_char_boundary(text, start)
        };
    }
}

fn to_collocation(text: &str, region: &Region) -> Option<Collocation> {
    let (start, end) = region.pos(0)?;
    let (prefix_start, prefix_end) = region.pos(1)?;
    let (number_start, number_end) = region.pos(2)?;
    let (noun_start, noun_end) = region.pos(3)?;

    Some(Collocation::new(
        &text[prefix_start..prefix_end],
        NumberForm::parse(&text[number_start..number_end])?,
        &text[noun_start..noun_end],
        start..end,
    ))
}

fn is_exception(text: &str, collocation: &Collocation) -> bool {
    let start = collocation.span().start;
    let before = &text[..start];
    let number = collocation.number();

    guards::follows_times_idiom(before)
        || (number == NumberForm::Shnei
            && collocation.prefix().is_empty()
            && guards::follows_mitzad(before))
        || (number.gender() == Gender::Feminine && guards::follows_bat(before))
        || (number.is_teen()
            && guards::continues_teen(
                &text[..start + collocation.prefix().len()],
                number.gender(),
            ))
}

fn scan_series(text: &str, gender: Gender) -> Vec<Collocation> {
    let regex: &Regex = match gender {
        Gender::Masculine => &*MASCULINE,
        Gender::Feminine => &*FEMININE,
    };
    let mut out = Vec::new();

    search_all(regex, text, |region| {
        match to_collocation(text, region) {
            Some(collocation) if !is_exception(text, &collocation) => {
                out.push(collocation);
                true
            }
            _ => false,
        }
    });

    out
}

fn scan_idioms(text: &str) -> Vec<IdiomMatch> {
    let mut out = Vec::new();

    search_all(&*TIMES_IDIOM, text, |region| {
        let (start, end) = match region.pos(0) {
            Some(pos) => pos,
            None => return false,
        };
        let number = region
            .pos(1)
            .and_then(|(number_start, number_end)| IdiomNumber::parse(&text[number_start..number_end]));

        match number {
            Some(number) if !guards::follows_al(&text[..start]) => {
                out.push(IdiomMatch::new(number, start..end));
                true
            }
            _ => false,
        }
    });

    out
}

/// Scans a text which has already been stripped of citations. Spans refer to `text`.
pub fn scan(text: &str) -> Matches {
    if text.is_empty() {
        return Matches::default();
    }

    Matches {
        masculine: scan_series(text, Gender::Masculine),
        feminine: scan_series(text, Gender::Feminine),
        idioms: scan_idioms(text),
    }
}

/// Strips citations from `text` and scans the rest.
/// Spans refer to the stripped text, not to `text`.
pub fn find(text: &str) -> Matches {
    scan(&strip_citations(text))
}
