//! The entry point for checking and fixing texts.
use log::info;

use crate::{
    classifier::{CheckOptions, Classifier},
    corrector::Corrector,
    lexicon::Lexicon,
    matcher,
    types::*,
    utils::parallelism::*,
};

/// Finds and fixes number / noun gender agreement errors using a [Lexicon].
///
/// A checker is immutable once created, so one instance can be shared between threads.
pub struct Checker<L: Lexicon> {
    classifier: Classifier<L>,
    corrector: Corrector,
}

impl<L: Lexicon> Checker<L> {
    pub fn new(lexicon: L, options: CheckOptions) -> Self {
        let corrector = Corrector::new(options.excluded_terms.clone());

        Checker {
            classifier: Classifier::new(lexicon, options),
            corrector,
        }
    }

    pub fn options(&self) -> &CheckOptions {
        self.classifier.options()
    }

    pub fn lexicon(&self) -> &L {
        self.classifier.lexicon()
    }

    pub fn classifier(&self) -> &Classifier<L> {
        &self.classifier
    }

    pub fn corrector(&self) -> &Corrector {
        &self.corrector
    }

    /// Computes the candidate errors in a text of wikitext.
    /// Spans refer to the text with quotation templates removed.
    pub fn review(&self, text: &str) -> Vec<FlaggedError> {
        self.classifier.errors(&matcher::find(text))
    }

    /// Corrects all candidate errors in `text` except those with an excluded noun.
    pub fn fix(&self, text: &str) -> String {
        self.corrector.fix(&self.review(text), text)
    }

    /// Reviews many pages. The errors at index `i` belong to `pages[i]`.
    pub fn review_pages(&self, pages: &[Page]) -> Vec<Vec<FlaggedError>> {
        info!("reviewing {} pages", pages.len());

        pages
            .maybe_par_iter()
            .map(|page| self.review(&page.text))
            .collect()
    }

    /// Fixes many pages. The text at index `i` is the fixed text of `pages[i]`.
    pub fn fix_pages(&self, pages: &[Page]) -> Vec<String> {
        info!("fixing {} pages", pages.len());

        pages
            .maybe_par_iter()
            .map(|page| self.fix(&page.text))
            .collect()
    }
}
