//! Cumulative knowledge derived from the guess history.
//!
//! Hints are always recomputed from the full history rather than patched
//! incrementally. The fold is pure, so recomputing on every render is safe
//! and two calls over the same history always agree.

use super::letter::{Guess, LetterState};
use std::collections::BTreeMap;
use tracing::{instrument, trace};

/// Strongest state ever observed for each letter.
pub type LetterHints = BTreeMap<char, LetterState>;

/// Letter known to be correct at each board position.
pub type PositionHints = BTreeMap<usize, char>;

/// Letter and position hints for a history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hints {
    /// Per-letter hints.
    pub letters: LetterHints,
    /// Per-position hints.
    pub positions: PositionHints,
}

impl Hints {
    /// Returns the hint recorded for a letter, if any.
    pub fn letter(&self, letter: char) -> Option<LetterState> {
        self.letters.get(&letter).copied()
    }

    /// Returns the letter known to sit at a position, if any.
    pub fn position(&self, position: usize) -> Option<char> {
        self.positions.get(&position).copied()
    }
}

/// Folds the history into letter and position hints.
///
/// A letter's hint only ever moves up the `Absent < Present < Correct`
/// order; a later, weaker observation never downgrades it. Positions are
/// recorded whenever a `Correct` state is seen.
#[instrument(skip(history), fields(guesses = history.len()))]
pub fn derive_hints(history: &[Guess]) -> Hints {
    let mut hints = Hints::default();

    for guess in history {
        for (position, feedback) in guess.letters().iter().enumerate() {
            let strongest = match hints.letters.get(&feedback.letter) {
                Some(&known) if known >= feedback.state => known,
                _ => feedback.state,
            };
            hints.letters.insert(feedback.letter, strongest);

            if feedback.state == LetterState::Correct {
                hints.positions.insert(position, feedback.letter);
            }
        }
    }

    trace!(
        letters = hints.letters.len(),
        positions = hints.positions.len(),
        "Derived hints"
    );
    hints
}
