use criterion::{black_box, criterion_group, criterion_main, Criterion};
use misparim::{lexicon::MemoryLexicon, CheckOptions, Checker};

const LEXICON_DUMP: &str = include_str!("../tests/data/lexicon.tsv");

const TEXT: &str = "בשנת 1990 היו בכפר שני ילדות ושלוש ספרים. על פי שלוש עדויות, המחיר עלה פי שלוש \
מהמחיר המקורי בתוך שבעה ימים. {{ציטוט|תוכן=שני תפוחות}} מצד שני ילדים רבים למדו שלוש עשרה שנים \
בבית הספר, והיא הייתה בת שלוש שנים בלבד.";

fn load_lexicon(c: &mut Criterion) {
    c.bench_function("load lexicon", |b| {
        b.iter(|| MemoryLexicon::from_dump(black_box(LEXICON_DUMP).as_bytes()).unwrap())
    });
}

fn review(c: &mut Criterion) {
    let checker = Checker::new(
        MemoryLexicon::from_dump(LEXICON_DUMP.as_bytes()).unwrap(),
        CheckOptions::default(),
    );

    c.bench_function("review", |b| b.iter(|| checker.review(black_box(TEXT))));
    c.bench_function("fix", |b| b.iter(|| checker.fix(black_box(TEXT))));
}

criterion_group!(check, load_lexicon, review);
criterion_main!(check);
