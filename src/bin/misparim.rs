use clap::Parser;
use fs_err::File;
use itertools::Itertools;
use log::info;
use misparim::{dump, lexicon::MemoryLexicon, CheckOptions, Checker, Error, Report};
use std::{io::BufReader, path::PathBuf};

/// Reviews or fixes number / noun gender agreement in the pages of an XML dump.
#[derive(Parser)]
#[clap(version = "1.0")]
struct Opts {
    /// Lexicon binary created with `compile`.
    #[clap(long)]
    lexicon: PathBuf,
    /// MediaWiki XML export.
    #[clap(long)]
    xml: PathBuf,
    /// Print corrections instead of a report.
    #[clap(long)]
    fix: bool,
    /// JSON file with check options.
    #[clap(long)]
    options: Option<PathBuf>,
    /// Where to write the report. Defaults to stdout.
    #[clap(long)]
    out: Option<PathBuf>,
}

/// Pairs of sentences (split on ".") which differ between the two texts.
fn changed_sentences<'a>(old: &'a str, new: &'a str) -> Vec<(&'a str, &'a str)> {
    old.split('.')
        .zip(new.split('.'))
        .filter(|(a, b)| a != b)
        .map(|(a, b)| (a.trim(), b.trim()))
        .collect()
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let opts = Opts::parse();

    let options: CheckOptions = match &opts.options {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => CheckOptions::default(),
    };
    let checker = Checker::new(MemoryLexicon::new(&opts.lexicon)?, options);
    let pages = dump::pages_from_path(&opts.xml)?;

    if opts.fix {
        let fixed = checker.fix_pages(&pages);

        for (page, text) in pages.iter().zip(fixed.iter()) {
            if page.text == *text {
                continue;
            }

            let changes = changed_sentences(&page.text, text);
            println!("== {} ==", page.title);
            println!(
                "{}",
                changes
                    .iter()
                    .map(|(old, new)| format!("- {}\n+ {}", old, new))
                    .join("\n")
            );
        }
    } else {
        let mut report = Report::new();
        for (page, errors) in pages.iter().zip(checker.review_pages(&pages)) {
            report.add(&page.title, &errors);
        }
        info!("found errors with {} distinct nouns", report.len());

        match &opts.out {
            Some(path) => fs_err::write(path, report.render())?,
            None => println!("{}", report.render()),
        }
    }

    Ok(())
}
