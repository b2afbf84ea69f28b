//! Aggregates review results of many pages into a wikitext maintenance list.
use std::collections::{BTreeMap, BTreeSet};

use crate::types::FlaggedError;

const INTRO: &str = "\n{{/פתיח}}\n==רשימה לבדיקה==\n";

/// Errors grouped by noun. Each noun maps to the set of `(page title, usage)` pairs it occurs in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    entries: BTreeMap<String, BTreeSet<(String, String)>>,
}

impl Report {
    pub fn new() -> Self {
        Report::default()
    }

    /// Adds the errors of one page.
    pub fn add(&mut self, title: &str, errors: &[FlaggedError]) {
        for error in errors {
            self.entries
                .entry(error.word().to_owned())
                .or_insert_with(BTreeSet::new)
                .insert((title.to_owned(), error.usage()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of distinct nouns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Groups ordered by the number of distinct pages (rarest first), ties broken by noun.
    pub fn groups(&self) -> Vec<(&str, &BTreeSet<(String, String)>)> {
        let mut groups: Vec<_> = self
            .entries
            .iter()
            .map(|(noun, usages)| (noun.as_str(), usages))
            .collect();

        // `entries` is sorted by noun and the sort is stable
        groups.sort_by_key(|(_, usages)| {
            usages
                .iter()
                .map(|(title, _)| title.as_str())
                .collect::<BTreeSet<_>>()
                .len()
        });

        groups
    }

    /// Renders the report as wikitext.
    pub fn render(&self) -> String {
        let mut out = INTRO.to_owned();

        for (noun, usages) in self.groups() {
            out.push_str("\n*");
            out.push_str(noun);
            out.push('\n');

            let lines: BTreeSet<_> = usages
                .iter()
                .map(|(title, usage)| format!("*#[[{}]] - {}", title, usage))
                .collect();
            out.push_str(&lines.into_iter().collect::<Vec<_>>().join("\n"));
        }

        out
    }
}
