//! Detection and correction of gender agreement errors between Hebrew numbers and nouns.
//! # Overview
//!
//! Hebrew cardinal numbers from two to nineteen come in two series. Numbers of the masculine series
//! ("שלושה") go with masculine nouns, those of the feminine series ("שלוש") with feminine nouns.
//! misparim finds number + noun pairs in wikitext and reports the pairs which do not agree.
//!
//! The core abstractions are:
//! - A [matcher] which finds number + noun [collocations][types::Collocation] in a text.
//! - A [Lexicon][lexicon::Lexicon] which knows the gender of nouns.
//! - A [Classifier][classifier::Classifier] which decides whether a collocation is an error.
//! - A [Corrector][corrector::Corrector] which flips the gender of the number word.
//!
//! [Checker] ties them together.
//!
//! # Examples
//!
//! Check and correct a text:
//!
//! ```
//! use misparim::{lexicon::MemoryLexicon, CheckOptions, Checker, Gender};
//!
//! let lexicon = MemoryLexicon::from_entries(vec![
//!     ("תפוחות", "ע,נ,רבים"),
//!     ("ילדים", "ע,ז,רבים"),
//! ])?;
//! let checker = Checker::new(lexicon, CheckOptions::default());
//!
//! let errors = checker.review("היו שני תפוחות ושלושה ילדים.");
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].word(), "תפוחות");
//! assert_eq!(errors[0].expected_gender(), Gender::Feminine);
//!
//! assert_eq!(checker.fix("היו שני תפוחות."), "היו שתי תפוחות.");
//! # Ok::<(), misparim::Error>(())
//! ```
//!
//! Load a compiled lexicon binary:
//!
//! ```no_run
//! use misparim::{lexicon::MemoryLexicon, CheckOptions, Checker};
//!
//! let lexicon = MemoryLexicon::new("path/to/lexicon.bin")?;
//! let checker = Checker::new(lexicon, CheckOptions::default());
//! # Ok::<(), misparim::Error>(())
//! ```
use std::io;

use thiserror::Error;

pub mod checker;
pub mod classifier;
pub mod corrector;
#[cfg(feature = "dump")]
pub mod dump;
pub mod lexicon;
pub mod matcher;
pub mod report;
pub mod types;
pub(crate) mod utils;

pub use checker::Checker;
pub use classifier::CheckOptions;
pub use report::Report;
pub use types::{FlaggedError, Gender, NumberForm, Page};

#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    /// (De)serialization error. Can have occured during deserialization or during serialization.
    #[error(transparent)]
    Serialization(#[from] bincode::Error),
    #[error(transparent)]
    Fst(#[from] fst::Error),
    #[cfg(feature = "serde_json")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "dump")]
    #[error(transparent)]
    Xml(#[from] roxmltree::Error),
    #[cfg(feature = "dump")]
    #[error("invalid dump: {0}")]
    InvalidDump(String),
    #[error("malformed lexicon dump at line {line}: {content:?}")]
    MalformedDump { line: usize, content: String },
}
