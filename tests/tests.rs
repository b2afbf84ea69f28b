use itertools::Itertools;
use lazy_static::lazy_static;
use misparim::{
    lexicon::MemoryLexicon,
    matcher,
    types::{ErrorKind, IdiomNumber},
    CheckOptions, Checker, Gender, NumberForm,
};
use quickcheck_macros::quickcheck;

const LEXICON_DUMP: &str = include_str!("data/lexicon.tsv");

const NOUNS: &[&str] = &[
    "ילדים",
    "ילדות",
    "בנות",
    "ספרים",
    "שנים",
    "ימים",
    "פנים",
    "עדויות",
    "מחשבונים",
    "גלקסיות",
    "אלף",
    // start with other nouns of this list
    "ילדימה",
    "בנותיה",
];

lazy_static! {
    static ref CHECKER: Checker<MemoryLexicon> = Checker::new(
        MemoryLexicon::from_dump(LEXICON_DUMP.as_bytes()).unwrap(),
        CheckOptions::default()
    );
}

/// Builds a text from `(number, noun, quoted)` triples. Quoted parts are wrapped in a quotation template.
fn build_text(parts: &[(u8, u8, bool)]) -> String {
    parts
        .iter()
        .enumerate()
        .map(|(i, (number, noun, quoted))| {
            let part = format!(
                "{}{} {}",
                if i > 0 { "ו" } else { "" },
                NumberForm::ALL[*number as usize % NumberForm::ALL.len()],
                NOUNS[*noun as usize % NOUNS.len()]
            );

            if *quoted {
                format!("{{{{ציטוט|תוכן={}}}}}", part)
            } else {
                part
            }
        })
        .join(" ")
}

#[test]
fn can_check_empty_text() {
    assert!(CHECKER.review("").is_empty());
    assert_eq!(CHECKER.fix(""), "");
}

#[quickcheck]
fn can_check_anything(text: String) -> bool {
    CHECKER.review(&text);
    CHECKER.fix(&text);
    true
}

#[quickcheck]
fn fixed_text_has_no_errors(parts: Vec<(u8, u8, bool)>) -> bool {
    let fixed = CHECKER.fix(&build_text(&parts));
    CHECKER.review(&fixed).is_empty()
}

#[quickcheck]
fn fixing_is_idempotent(parts: Vec<(u8, u8, bool)>) -> bool {
    let fixed = CHECKER.fix(&build_text(&parts));
    CHECKER.fix(&fixed) == fixed
}

#[test]
fn fixed_span_is_not_flagged_again() {
    let text = "היו שני ילדות ושלוש ספרים על המדף.";

    for error in CHECKER.review(text) {
        let fixed = CHECKER.corrector().apply(&error, text);
        assert!(CHECKER
            .review(&fixed)
            .iter()
            .all(|x| x.span() != error.span() || x.word() != error.word()));
    }
}

#[test]
fn fix_leaves_longer_words_alone() {
    let text = "שני תפוחותיה, שני תפוחות";
    let fixed = CHECKER.fix(text);

    assert_eq!(fixed, "שני תפוחותיה, שתי תפוחות");
    assert!(CHECKER.review(&fixed).is_empty());
}

#[test]
fn fix_leaves_quotations_alone() {
    let text = "{{ציטוט|תוכן=היו שני תפוחות}} היו שני תפוחות";
    let fixed = CHECKER.fix(text);

    assert_eq!(fixed, "{{ציטוט|תוכן=היו שני תפוחות}} היו שתי תפוחות");
    assert!(CHECKER.review(&fixed).is_empty());
    assert_eq!(CHECKER.fix(&fixed), fixed);
}

#[test]
fn generated_texts_repeat_and_quote_phrases() {
    let text = build_text(&[(0, 0, false), (15, 11, false), (15, 0, false), (15, 0, true)]);

    assert_eq!(
        text,
        "שני ילדים ושתי ילדימה ושתי ילדים {{ציטוט|תוכן=ושתי ילדים}}"
    );
    assert_eq!(
        CHECKER.fix(&text),
        "שני ילדים ושתי ילדימה ושני ילדים {{ציטוט|תוכן=ושתי ילדים}}"
    );
}

#[test]
fn flags_masculine_number_with_feminine_noun() {
    let errors = CHECKER.review("שני תפוחות");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].expected_gender(), Gender::Feminine);
    assert_eq!(CHECKER.fix("שני תפוחות"), "שתי תפוחות");
}

#[test]
fn flags_feminine_number_with_masculine_noun() {
    let errors = CHECKER.review("שלוש ילדים");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].expected_gender(), Gender::Masculine);
    assert_eq!(CHECKER.fix("שלוש ילדים"), "שלושה ילדים");
}

#[test]
fn flags_times_idiom() {
    let errors = CHECKER.review("פי שלוש מהמחיר");

    assert_eq!(errors.len(), 1);
    match errors[0].kind() {
        ErrorKind::TimesIdiom(idiom) => assert_eq!(idiom.number(), IdiomNumber::Three),
        other => panic!("expected idiom, got {:?}", other),
    }
    assert_eq!(errors[0].expected_gender(), Gender::Masculine);
    assert_eq!(CHECKER.fix("פי שלוש מהמחיר"), "פי שלושה מהמחיר");
}

#[test]
fn common_gender_is_not_flagged() {
    assert!(CHECKER.review("שני פנים").is_empty());
    assert!(CHECKER.review("שתי פנים").is_empty());
}

#[test]
fn citations_are_ignored() {
    assert!(CHECKER.review("{{ציטוט|תוכן=שני תפוחות|מקור=ספר}}").is_empty());

    let errors = CHECKER.review("{{ציטוט|תוכן=שני תפוחות}} היו שלוש ילדים");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].word(), "ילדים");
}

#[test]
fn teens_are_not_split() {
    let text = "שלוש עשרה שנים";

    assert!(matcher::find(text).masculine.is_empty());
    assert!(CHECKER.review(text).is_empty());
}

#[test]
fn excluded_terms_are_reported_but_not_fixed() {
    assert_eq!(CHECKER.review("עשרה הדברות").len(), 1);
    assert_eq!(CHECKER.fix("עשרה הדברות"), "עשרה הדברות");
}

#[test]
fn unsafe_prefix_is_not_flagged() {
    assert!(CHECKER.review("שני באמצעות").is_empty());
}

#[test]
fn options_can_be_deserialized() {
    let options: CheckOptions = serde_json::from_str(r#"{"check_times_idiom": false}"#).unwrap();

    assert!(!options.check_times_idiom);
    assert!(options.guess_unknown_gender);
    assert_eq!(options.excluded_terms, vec!["דברות"]);

    let checker = Checker::new(
        MemoryLexicon::from_dump(LEXICON_DUMP.as_bytes()).unwrap(),
        options,
    );
    assert!(checker.review("פי שלוש מהמחיר").is_empty());
}
