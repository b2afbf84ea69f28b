use fst::Automaton;
use std::cmp::min;

/// Number of bytes of the UTF-8 sequence started by `lead`.
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}

#[derive(Clone, Debug)]
pub struct LevenshteinState {
    // to compute the next row of the matrix, we also need the row two rows up for transposes
    prev_row: Option<Vec<usize>>,
    prev_char: Option<char>,
    row: Vec<usize>,
    // bytes of a char which is not complete yet
    pending: Vec<u8>,
}

impl LevenshteinState {
    pub fn dist(&self) -> usize {
        *self.row.last().expect("row always has at least one entry")
    }
}

/// An automaton matching keys within an optimal string alignment distance of the query.
///
/// The fst feeds bytes, but the distance is counted in chars: a Hebrew letter is two bytes
/// so a byte-level distance would accept words two letters apart.
#[derive(Debug, Clone)]
pub struct Levenshtein {
    query: Vec<char>,
    distance: usize,
}

impl Levenshtein {
    pub fn new(query: &str, distance: usize) -> Self {
        Levenshtein {
            query: query.chars().collect(),
            distance,
        }
    }

    fn next_row(&self, state: &LevenshteinState, c: char) -> Vec<usize> {
        let row = &state.row;
        let mut next_row = row.to_vec();

        next_row[0] = row[0] + 1;

        for i in 1..next_row.len() {
            let mut cost = if c == self.query[i - 1] {
                row[i - 1]
            } else {
                min(
                    next_row[i - 1] + 1, // deletes
                    min(
                        row[i - 1] + 1, // substitutes
                        row[i] + 1,     // inserts
                    ),
                )
            };

            if i > 1 {
                // transposes
                if let Some(prev_row) = state.prev_row.as_ref() {
                    if c == self.query[i - 2] && state.prev_char == Some(self.query[i - 1]) {
                        cost = min(cost, prev_row[i - 2] + 1);
                    }
                }
            }

            next_row[i] = cost;
        }

        next_row
    }
}

impl Automaton for Levenshtein {
    type State = Option<LevenshteinState>;

    fn start(&self) -> Self::State {
        Some(LevenshteinState {
            prev_row: None,
            prev_char: None,
            row: (0..=self.query.len()).collect(),
            pending: Vec::new(),
        })
    }

    fn is_match(&self, state: &Self::State) -> bool {
        state
            .as_ref()
            .map_or(false, |state| state.pending.is_empty() && state.dist() <= self.distance)
    }

    fn can_match(&self, state: &Self::State) -> bool {
        state.is_some()
    }

    fn accept(&self, state: &Self::State, byte: u8) -> Self::State {
        state.as_ref().and_then(|state| {
            let mut pending = state.pending.clone();
            pending.push(byte);

            if pending.len() < utf8_width(pending[0]) {
                return Some(LevenshteinState {
                    pending,
                    ..state.clone()
                });
            }

            let c = std::str::from_utf8(&pending).ok()?.chars().next()?;
            let next_row = self.next_row(state, c);

            if next_row.iter().min().map_or(true, |x| *x > self.distance) {
                return None;
            }

            Some(LevenshteinState {
                prev_row: Some(state.row.clone()),
                prev_char: Some(c),
                row: next_row,
                pending: Vec::new(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fst::{IntoStreamer, Set, Streamer};

    fn search(words: &[&str], query: &str, distance: usize) -> Vec<String> {
        let mut words = words.to_vec();
        words.sort_unstable();
        let set = Set::from_iter(words).unwrap();

        let mut stream = set.search(Levenshtein::new(query, distance)).into_stream();
        let mut out = Vec::new();
        while let Some(key) = stream.next() {
            out.push(String::from_utf8(key.to_vec()).unwrap());
        }
        out
    }

    #[test]
    fn counts_hebrew_letters_as_one_edit() {
        let words = ["ילדים", "ילדות", "ילד", "מילדים"];

        assert_eq!(search(&words, "ילדים", 0), vec!["ילדים"]);
        assert_eq!(search(&words, "ילדימ", 1), vec!["ילדים"]);
        // two letters apart
        assert!(!search(&words, "ילדים", 1).contains(&"ילדות".to_string()));
        assert!(search(&words, "ילדים", 1).contains(&"מילדים".to_string()));
    }

    #[test]
    fn handles_transposes() {
        assert_eq!(search(&["תפוחים"], "תפחוים", 1), vec!["תפוחים"]);
    }

    #[test]
    fn handles_mixed_width_chars() {
        assert_eq!(search(&["abc", "אבג"], "אבc", 1), vec!["אבג"]);
        assert_eq!(search(&["abc", "אבג"], "אבד", 1), vec!["אבג"]);
        assert_eq!(search(&["abc", "אבג"], "abd", 1), vec!["abc"]);
    }
}
