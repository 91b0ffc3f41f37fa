//! Request and response bodies of the guess service.

use derive_new::new;
use serde::{Deserialize, Serialize};
use wordeau_core::Guess;

/// Credentials issued when a game starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct GameInfo {
    /// Session id.
    pub id: u64,
    /// Opaque key authorising later calls for this session.
    pub key: String,
    /// Identifier of the secret word.
    #[serde(rename = "wordID")]
    pub word_id: u64,
}

/// Body of a guess submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct GuessRequest {
    /// Session id.
    pub id: u64,
    /// Session key.
    pub key: String,
    /// Five lowercase letters.
    pub guess: String,
}

/// Body of a finish request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct FinishRequest {
    /// Session id.
    pub id: u64,
    /// Session key.
    pub key: String,
}

impl From<&GameInfo> for FinishRequest {
    fn from(info: &GameInfo) -> Self {
        Self::new(info.id, info.key.clone())
    }
}

/// Revealed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct FinishResponse {
    /// The secret word.
    pub answer: String,
}

/// Outcome of a guess submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessResponse {
    /// The guess was evaluated.
    Accepted(Guess),
    /// Wrong length, non-letters, or not in the dictionary.
    InvalidWord,
    /// The game was already finished or already has six guesses.
    GameOver,
}
