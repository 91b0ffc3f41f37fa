//! Hard mode: later guesses must reuse every discovered hint.
//!
//! Two rules apply:
//! - every letter hinted `Present` must appear somewhere in the guess;
//! - every letter known `Correct` at a position must be guessed there.
//!
//! `Correct` letters are only checked by position.

use super::hints::{LetterHints, PositionHints};
use super::letter::LetterState;
use tracing::{debug, instrument};

/// Returns the hint letters the candidate guess fails to honour.
///
/// Present-rule violations come first in letter order, then position-rule
/// violations in position order. An empty result means the guess is
/// admissible.
#[instrument(skip(letter_hints, position_hints))]
pub fn unused_hint_letters(
    buffer: &str,
    letter_hints: &LetterHints,
    position_hints: &PositionHints,
) -> Vec<char> {
    let guessed: Vec<char> = buffer.chars().collect();

    let missing_present = letter_hints
        .iter()
        .filter(|&(letter, &state)| state == LetterState::Present && !guessed.contains(letter))
        .map(|(&letter, _)| letter);

    let misplaced_correct = position_hints
        .iter()
        .filter(|&(&position, letter)| guessed.get(position) != Some(letter))
        .map(|(_, &letter)| letter);

    let missing: Vec<char> = missing_present.chain(misplaced_correct).collect();
    if !missing.is_empty() {
        debug!(?missing, "Guess ignores hints");
    }
    missing
}
