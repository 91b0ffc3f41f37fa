//! Errors returned by the game controller.

use derive_more::{Display, Error, From};

use crate::api::ServiceError;

/// Why a guess submission did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum SubmitError {
    /// No game has been started.
    #[display("No active game")]
    NoActiveGame,

    /// The game already has an answer.
    #[display("Game is already over")]
    GameFinished,

    /// The buffer does not hold a full word yet.
    #[display("Guess has {} letters, need 5", len)]
    IncompleteGuess {
        /// Letters typed so far.
        len: usize,
    },

    /// Hard mode: the guess leaves out known hints.
    #[display("Missing Letters: ({})", format_letters(_0))]
    MissingHintLetters(#[error(not(source))] Vec<char>),

    /// Another submission is still in flight.
    #[display("Submission already in progress")]
    Busy,

    /// The service does not recognise the word.
    #[display("Invalid Word!")]
    InvalidWord,

    /// The service reports the game finished before this guess.
    #[display("Game Already Over")]
    GameAlreadyOver,

    /// The service failed or answered outside the protocol.
    #[display("Guess service error: {}", _0)]
    #[from]
    Service(ServiceError),
}

impl SubmitError {
    /// Returns true if the player can fix the problem and resubmit.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Service(_))
    }

    /// Returns the message to show the player, if any.
    ///
    /// Duplicate submissions and short words are ignored silently.
    pub fn notification(&self) -> Option<String> {
        match self {
            Self::Busy | Self::IncompleteGuess { .. } => None,
            other => Some(other.to_string()),
        }
    }
}

fn format_letters(letters: &[char]) -> String {
    letters
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why a new game could not be started.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum StartError {
    /// A submission or another start is still in flight.
    #[display("Another request is in progress")]
    Busy,

    /// The service failed to create a session.
    #[display("Could not start a game: {}", _0)]
    #[from]
    Service(ServiceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_letters_message() {
        let err = SubmitError::MissingHintLetters(vec!['a', 's']);
        assert_eq!(err.notification().as_deref(), Some("Missing Letters: (a, s)"));
    }

    #[test]
    fn test_busy_is_silent() {
        assert_eq!(SubmitError::Busy.notification(), None);
        assert!(SubmitError::Busy.is_recoverable());
    }

    #[test]
    fn test_service_error_is_fatal() {
        let err = SubmitError::from(ServiceError::Transport("timeout".to_string()));
        assert!(!err.is_recoverable());
    }
}
