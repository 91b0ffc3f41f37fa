//! Session state owned by the game controller.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::instrument;
use wordeau_core::{Guess, Hints, MAX_ATTEMPTS, WORD_LENGTH, derive_hints};

use crate::api::GameInfo;

/// Which rule set applies to guesses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Every guess must reuse all discovered hints.
    #[default]
    Hard,
    /// Any five-letter word may be guessed.
    Normal,
}

impl Difficulty {
    /// Returns the display label for this option.
    #[instrument]
    pub fn label(self) -> &'static str {
        match self {
            Self::Hard => "Hard Mode",
            Self::Normal => "Normal Mode",
        }
    }

    /// Toggles between `Hard` and `Normal`.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::Hard => Self::Normal,
            Self::Normal => Self::Hard,
        }
    }
}

/// How a finished session's answer is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    /// The secret word, from a winning guess or from the finish call.
    Revealed(String),
    /// The server reported the game over without telling us the word.
    Unknown,
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Revealed(word) => write!(f, "{}", word),
            Answer::Unknown => write!(f, "???"),
        }
    }
}

/// Lifecycle phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GamePhase {
    /// No game has been started.
    NoSession,
    /// A start request is outstanding.
    Starting,
    /// Guesses are being accepted.
    Active,
    /// The answer is set; only a new game can follow.
    GameOver,
}

/// One game against one secret word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) info: GameInfo,
    pub(crate) buffer: String,
    pub(crate) history: Vec<Guess>,
    pub(crate) answer: Option<Answer>,
}

impl Session {
    /// Creates a fresh session from server-issued credentials.
    pub fn new(info: GameInfo) -> Self {
        Self {
            info,
            buffer: String::new(),
            history: Vec::new(),
            answer: None,
        }
    }

    /// Rebuilds a session from persisted parts. The buffer starts empty.
    pub fn restore(info: GameInfo, history: Vec<Guess>, answer: Option<Answer>) -> Self {
        Self {
            info,
            buffer: String::new(),
            history,
            answer,
        }
    }

    /// Returns the server credentials.
    pub fn info(&self) -> &GameInfo {
        &self.info
    }

    /// Returns the guess being typed.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Returns accepted guesses in order.
    pub fn history(&self) -> &[Guess] {
        &self.history
    }

    /// Returns the answer once the game is over.
    pub fn answer(&self) -> Option<&Answer> {
        self.answer.as_ref()
    }

    /// Returns true once the answer is set.
    pub fn is_over(&self) -> bool {
        self.answer.is_some()
    }

    /// Returns true when the buffer holds a full word.
    pub fn buffer_is_full(&self) -> bool {
        self.buffer.len() == WORD_LENGTH
    }

    /// Returns true when every attempt has been used.
    pub fn board_is_full(&self) -> bool {
        self.history.len() >= MAX_ATTEMPTS
    }

    /// Returns the number of guesses still available.
    pub fn attempts_left(&self) -> usize {
        MAX_ATTEMPTS.saturating_sub(self.history.len())
    }

    /// Derives hints from the current history.
    pub fn hints(&self) -> Hints {
        derive_hints(&self.history)
    }
}
