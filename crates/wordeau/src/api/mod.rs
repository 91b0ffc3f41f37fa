//! Remote guess-evaluation service.

mod error;
mod http;
mod types;

use async_trait::async_trait;

pub use error::ServiceError;
pub use http::{DEFAULT_API_URL, HttpGuessService};
pub use types::{FinishRequest, FinishResponse, GameInfo, GuessRequest, GuessResponse};

/// Authoritative evaluator of guesses.
#[async_trait]
pub trait GuessService: Send + Sync {
    /// Begins a session and returns its credentials.
    async fn start_game(&self) -> Result<GameInfo, ServiceError>;

    /// Evaluates one five-letter guess.
    async fn submit_guess(&self, request: &GuessRequest) -> Result<GuessResponse, ServiceError>;

    /// Reveals the secret word once the attempts are used up.
    async fn finish_game(&self, request: &FinishRequest) -> Result<FinishResponse, ServiceError>;
}
