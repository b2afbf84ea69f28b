//! Fundamental types used by this crate.

use std::{fmt, ops::Range};

/// Grammatical gender as encoded in the lexicon readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    Masculine,
    Feminine,
}

impl Gender {
    /// The code used for this gender in a comma-joined reading e.g. `ע,ז,רבים`.
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Masculine => "ז",
            Gender::Feminine => "נ",
        }
    }

    pub fn opposite(&self) -> Gender {
        match self {
            Gender::Masculine => Gender::Feminine,
            Gender::Feminine => Gender::Masculine,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Masculine => write!(f, "masculine"),
            Gender::Feminine => write!(f, "feminine"),
        }
    }
}

macro_rules! number_forms {
    ($($variant:ident => $text:literal, $gender:ident, $flipped:ident;)*) => {
        /// Every number word the collocation patterns can emit.
        ///
        /// The set is closed: the pattern alternations, the expected gender and the
        /// correction table are all derived from this list.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NumberForm {
            $($variant,)*
        }

        impl NumberForm {
            pub const ALL: &'static [NumberForm] = &[$(NumberForm::$variant,)*];

            /// The surface text of this form.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(NumberForm::$variant => $text,)*
                }
            }

            /// The series this form belongs to. Numbers of the masculine series agree
            /// with masculine nouns, even though most of them end in `ה`.
            pub fn gender(&self) -> Gender {
                match self {
                    $(NumberForm::$variant => Gender::$gender,)*
                }
            }

            /// The form of the same magnitude in the other series.
            pub fn flipped(&self) -> NumberForm {
                match self {
                    $(NumberForm::$variant => NumberForm::$flipped,)*
                }
            }
        }
    };
}

// שבעת is left out of the masculine series since it also means "at the time of".
// שמונת flips to שמונה which is never matched itself: it is spelled the same in both series.
number_forms! {
    Shnei => "שני", Masculine, Shtei;
    Shlosha => "שלושה", Masculine, Shalosh;
    Arbaa => "ארבעה", Masculine, Arba;
    Hamisha => "חמישה", Masculine, Hamesh;
    Shisha => "שישה", Masculine, Shesh;
    Shiva => "שבעה", Masculine, Sheva;
    Tisha => "תשעה", Masculine, Tesha;
    Esre => "עשרה", Masculine, Eser;
    Shloshet => "שלושת", Masculine, Shalosh;
    Arbaat => "ארבעת", Masculine, Arba;
    Hameshet => "חמשת", Masculine, Hamesh;
    Sheshet => "ששת", Masculine, Shesh;
    Shmonat => "שמונת", Masculine, Shmone;
    Tishat => "תשעת", Masculine, Tesha;
    Aseret => "עשרת", Masculine, Eser;
    Shtei => "שתי", Feminine, Shnei;
    Shalosh => "שלוש", Feminine, Shlosha;
    Arba => "ארבע", Feminine, Arbaa;
    Hamesh => "חמש", Feminine, Hamisha;
    Shesh => "שש", Feminine, Shisha;
    Sheva => "שבע", Feminine, Shiva;
    Tesha => "תשע", Feminine, Tisha;
    Eser => "עשר", Feminine, Esre;
    Shmone => "שמונה", Feminine, Shmonat;
}

impl NumberForm {
    /// Looks up a form by its surface text.
    pub fn parse(text: &str) -> Option<NumberForm> {
        NumberForm::ALL.iter().copied().find(|x| x.as_str() == text)
    }

    /// The forms matched by the collocation pattern of the given series.
    pub fn series(gender: Gender) -> impl Iterator<Item = NumberForm> {
        NumberForm::ALL
            .iter()
            .copied()
            .filter(move |x| x.gender() == gender && *x != NumberForm::Shmone)
    }

    /// Whether this is one of the "-teen" forms which need a lookbehind guard.
    pub fn is_teen(&self) -> bool {
        matches!(self, NumberForm::Esre | NumberForm::Eser)
    }
}

impl fmt::Display for NumberForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The number words recognized after the "פי" (times) idiom, which always takes the masculine form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdiomNumber {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Nine,
    Ten,
}

impl IdiomNumber {
    pub const ALL: &'static [IdiomNumber] = &[
        IdiomNumber::Two,
        IdiomNumber::Three,
        IdiomNumber::Four,
        IdiomNumber::Five,
        IdiomNumber::Six,
        IdiomNumber::Seven,
        IdiomNumber::Nine,
        IdiomNumber::Ten,
    ];

    /// The (incorrect) feminine form as it is matched in text.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdiomNumber::Two => "שתיים",
            IdiomNumber::Three => "שלוש",
            IdiomNumber::Four => "ארבע",
            IdiomNumber::Five => "חמש",
            IdiomNumber::Six => "שש",
            IdiomNumber::Seven => "שבע",
            IdiomNumber::Nine => "תשע",
            IdiomNumber::Ten => "עשר",
        }
    }

    /// The masculine form the idiom requires.
    pub fn masculine(&self) -> &'static str {
        match self {
            IdiomNumber::Two => "שניים",
            IdiomNumber::Three => "שלושה",
            IdiomNumber::Four => "ארבעה",
            IdiomNumber::Five => "חמישה",
            IdiomNumber::Six => "שישה",
            IdiomNumber::Seven => "שבעה",
            IdiomNumber::Nine => "תשעה",
            IdiomNumber::Ten => "עשרה",
        }
    }

    pub fn parse(text: &str) -> Option<IdiomNumber> {
        IdiomNumber::ALL.iter().copied().find(|x| x.as_str() == text)
    }
}

/// One number + noun occurrence found by the [matcher][crate::matcher].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collocation {
    pub(crate) prefix: String,
    pub(crate) number: NumberForm,
    pub(crate) noun: String,
    pub(crate) span: Range<usize>,
}

impl Collocation {
    pub fn new<S: Into<String>, T: Into<String>>(
        prefix: S,
        number: NumberForm,
        noun: T,
        span: Range<usize>,
    ) -> Self {
        Collocation {
            prefix: prefix.into(),
            number,
            noun: noun.into(),
            span,
        }
    }

    /// Letters attached before the number word e.g. `ו` or `וב`. Can be empty.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn number(&self) -> NumberForm {
        self.number
    }

    /// The number word exactly as it appears in the text.
    pub fn number_text(&self) -> &str {
        self.number.as_str()
    }

    /// The noun as it appears in the text, possibly with opening wiki link markup.
    pub fn noun_text(&self) -> &str {
        &self.noun
    }

    /// The gender the noun should have to agree with the number word.
    pub fn expected_gender(&self) -> Gender {
        self.number.gender()
    }

    /// Byte span of `prefix + number + " " + noun` in the scanned text.
    pub fn span(&self) -> &Range<usize> {
        &self.span
    }

    /// The matched phrase, `prefix + number + " " + noun`.
    pub fn phrase(&self) -> String {
        format!("{}{} {}", self.prefix, self.number, self.noun)
    }
}

/// One "פי N" occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdiomMatch {
    pub(crate) number: IdiomNumber,
    pub(crate) span: Range<usize>,
}

impl IdiomMatch {
    pub fn new(number: IdiomNumber, span: Range<usize>) -> Self {
        IdiomMatch { number, span }
    }

    pub fn number(&self) -> IdiomNumber {
        self.number
    }

    pub fn span(&self) -> &Range<usize> {
        &self.span
    }

    /// The matched phrase without the trailing space e.g. `פי שלוש`.
    pub fn phrase(&self) -> String {
        format!("פי {}", self.number.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The number does not agree with the gender of the noun.
    Agreement(Collocation),
    /// "פי" followed by a feminine number.
    TimesIdiom(IdiomMatch),
}

/// A candidate error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedError {
    pub(crate) kind: ErrorKind,
    pub(crate) expected_gender: Gender,
}

impl FlaggedError {
    /// An agreement error. The number word should take the opposite of its current gender.
    pub fn agreement(collocation: Collocation) -> Self {
        FlaggedError {
            expected_gender: collocation.expected_gender().opposite(),
            kind: ErrorKind::Agreement(collocation),
        }
    }

    pub fn times_idiom(idiom: IdiomMatch) -> Self {
        FlaggedError {
            kind: ErrorKind::TimesIdiom(idiom),
            expected_gender: Gender::Masculine,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The gender the number word must take, i.e. the gender of the noun.
    pub fn expected_gender(&self) -> Gender {
        self.expected_gender
    }

    /// The noun text. Empty for the "פי" idiom which has no noun.
    pub fn word(&self) -> &str {
        match &self.kind {
            ErrorKind::Agreement(collocation) => collocation.noun_text(),
            ErrorKind::TimesIdiom(_) => "",
        }
    }

    /// The number word for agreement errors, the whole phrase for the idiom.
    pub fn usage(&self) -> String {
        match &self.kind {
            ErrorKind::Agreement(collocation) => collocation.number_text().to_owned(),
            ErrorKind::TimesIdiom(idiom) => idiom.phrase(),
        }
    }

    pub fn span(&self) -> &Range<usize> {
        match &self.kind {
            ErrorKind::Agreement(collocation) => collocation.span(),
            ErrorKind::TimesIdiom(idiom) => idiom.span(),
        }
    }
}

/// A page of wikitext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub text: String,
}

impl Page {
    pub fn new<S: Into<String>, T: Into<String>>(title: S, text: T) -> Self {
        Page {
            title: title.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correction_table_flips_gender() {
        for form in NumberForm::ALL {
            assert_ne!(form.gender(), form.flipped().gender(), "{}", form);
        }

        for form in NumberForm::series(Gender::Feminine) {
            assert_eq!(form.flipped().flipped(), form);
        }
    }

    #[test]
    fn series_are_disjoint() {
        let masculine: Vec<_> = NumberForm::series(Gender::Masculine).collect();
        let feminine: Vec<_> = NumberForm::series(Gender::Feminine).collect();

        assert_eq!(masculine.len(), 15);
        assert_eq!(feminine.len(), 8);
        assert!(masculine.iter().all(|x| !feminine.contains(x)));
        assert_eq!(NumberForm::parse("שבעת"), None);
    }

    #[test]
    fn can_parse_forms() {
        assert_eq!(NumberForm::parse("שלושת"), Some(NumberForm::Shloshet));
        assert_eq!(NumberForm::Shloshet.flipped().as_str(), "שלוש");
        assert_eq!(NumberForm::parse("מאה"), None);
        assert_eq!(IdiomNumber::parse("שתיים").map(|x| x.masculine()), Some("שניים"));
    }

    #[test]
    fn agreement_error_targets_the_opposite_gender() {
        let collocation = Collocation::new("", NumberForm::Shnei, "תפוחות", 0..20);
        let error = FlaggedError::agreement(collocation);

        assert_eq!(error.expected_gender(), Gender::Feminine);
        assert_eq!(error.word(), "תפוחות");
        assert_eq!(error.usage(), "שני");
    }
}
