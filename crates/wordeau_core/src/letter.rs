//! Per-letter feedback types.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use tracing::instrument;

/// Number of letters in every guess.
pub const WORD_LENGTH: usize = 5;

/// Number of guesses a session allows before the answer is revealed.
pub const MAX_ATTEMPTS: usize = 6;

/// Feedback classification for one letter of one guess.
///
/// Variants are declared in increasing order of informativeness, so the
/// derived `Ord` gives `Correct > Present > Absent`. Hint merging relies on
/// this ordering. On the wire each state is its ordinal (0, 1, 2).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum LetterState {
    /// Letter is not in the word.
    Absent,
    /// Letter is in the word at another position.
    Present,
    /// Letter is in the word at this position.
    Correct,
}

impl LetterState {
    /// Returns the wire ordinal.
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Present => 1,
            Self::Correct => 2,
        }
    }
}

impl From<LetterState> for u8 {
    fn from(state: LetterState) -> Self {
        state.ordinal()
    }
}

impl TryFrom<u8> for LetterState {
    type Error = FeedbackError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Absent),
            1 => Ok(Self::Present),
            2 => Ok(Self::Correct),
            other => Err(FeedbackError::UnknownState(other)),
        }
    }
}

/// Malformed feedback received for a guess.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum FeedbackError {
    /// The state ordinal is outside 0..=2.
    #[display("Unknown letter state {}", _0)]
    UnknownState(#[error(not(source))] u8),

    /// The letter is not a lowercase ASCII letter.
    #[display("Invalid feedback letter {:?}", _0)]
    InvalidLetter(#[error(not(source))] char),

    /// The guess does not have exactly five entries.
    #[display("Expected {} letters of feedback, got {}", WORD_LENGTH, _0)]
    WrongLength(#[error(not(source))] usize),
}

/// One letter of a guess along with its feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LetterFeedback {
    /// Lowercase letter.
    pub letter: char,
    /// Feedback for that letter at its position.
    pub state: LetterState,
}

impl LetterFeedback {
    /// Creates feedback for a letter, rejecting anything but `a..=z`.
    pub fn new(letter: char, state: LetterState) -> Result<Self, FeedbackError> {
        if !letter.is_ascii_lowercase() {
            return Err(FeedbackError::InvalidLetter(letter));
        }
        Ok(Self { letter, state })
    }
}

/// A fully evaluated guess: exactly five letters with feedback, in board
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<LetterFeedback>", into = "Vec<LetterFeedback>")]
pub struct Guess([LetterFeedback; WORD_LENGTH]);

impl Guess {
    /// Creates a guess from five feedback entries.
    pub fn new(letters: [LetterFeedback; WORD_LENGTH]) -> Self {
        Self(letters)
    }

    /// Builds a guess from a word and matching states.
    #[instrument]
    pub fn from_word(
        word: &str,
        states: [LetterState; WORD_LENGTH],
    ) -> Result<Self, FeedbackError> {
        let letters: Vec<char> = word.chars().collect();
        if letters.len() != WORD_LENGTH {
            return Err(FeedbackError::WrongLength(letters.len()));
        }
        let feedback = letters
            .into_iter()
            .zip(states)
            .map(|(letter, state)| LetterFeedback::new(letter, state))
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from(feedback)
    }

    /// Returns the feedback entries in board order.
    pub fn letters(&self) -> &[LetterFeedback; WORD_LENGTH] {
        &self.0
    }

    /// Returns the guessed word.
    pub fn word(&self) -> String {
        self.0.iter().map(|f| f.letter).collect()
    }

    /// Returns true when every letter is in its correct position.
    pub fn is_winning(&self) -> bool {
        is_winning_guess(self)
    }
}

impl TryFrom<Vec<LetterFeedback>> for Guess {
    type Error = FeedbackError;

    fn try_from(feedback: Vec<LetterFeedback>) -> Result<Self, Self::Error> {
        let len = feedback.len();
        let letters: [LetterFeedback; WORD_LENGTH] =
            feedback.try_into().map_err(|_| FeedbackError::WrongLength(len))?;
        if let Some(bad) = letters.iter().find(|f| !f.letter.is_ascii_lowercase()) {
            return Err(FeedbackError::InvalidLetter(bad.letter));
        }
        Ok(Self(letters))
    }
}

impl From<Guess> for Vec<LetterFeedback> {
    fn from(guess: Guess) -> Self {
        guess.0.to_vec()
    }
}

impl std::fmt::Display for Guess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.word())
    }
}

/// Returns true iff every position of the guess is [`LetterState::Correct`].
pub fn is_winning_guess(guess: &Guess) -> bool {
    guess
        .letters()
        .iter()
        .all(|f| f.state == LetterState::Correct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterState::{Absent, Correct, Present};

    #[test]
    fn test_state_ordering() {
        assert!(Correct > Present);
        assert!(Present > Absent);
        assert_eq!(Correct.max(Absent), Correct);
    }

    #[test]
    fn test_winning_guess() {
        let guess = Guess::from_word("crane", [Correct; 5]).unwrap();
        assert!(is_winning_guess(&guess));
        assert_eq!(guess.word(), "crane");
    }

    #[test]
    fn test_single_miss_is_not_winning() {
        let guess =
            Guess::from_word("crane", [Correct, Correct, Present, Correct, Correct]).unwrap();
        assert!(!guess.is_winning());
    }

    #[test]
    fn test_wire_format() {
        let json = r#"[{"letter":"c","state":0},{"letter":"r","state":0},{"letter":"a","state":1},{"letter":"n","state":0},{"letter":"e","state":2}]"#;
        let guess: Guess = serde_json::from_str(json).unwrap();
        assert_eq!(guess.word(), "crane");
        assert_eq!(guess.letters()[2].state, Present);
        assert_eq!(serde_json::to_string(&guess).unwrap(), json);
    }

    #[test]
    fn test_rejects_short_feedback() {
        let json = r#"[{"letter":"c","state":0}]"#;
        assert!(serde_json::from_str::<Guess>(json).is_err());
    }

    #[test]
    fn test_rejects_unknown_state() {
        assert_eq!(LetterState::try_from(3), Err(FeedbackError::UnknownState(3)));
    }

    #[test]
    fn test_rejects_uppercase_letter() {
        assert!(Guess::from_word("CRANE", [Absent; 5]).is_err());
    }
}
