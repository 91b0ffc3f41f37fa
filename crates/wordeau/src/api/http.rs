//! reqwest implementation of the guess service.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use wordeau_core::Guess;

use crate::api::{
    FinishRequest, FinishResponse, GameInfo, GuessRequest, GuessResponse, GuessService,
    ServiceError,
};

/// Default service host.
pub const DEFAULT_API_URL: &str = "https://word.digitalnook.net";

/// HTTP client for the guess service.
#[derive(Debug, Clone)]
pub struct HttpGuessService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGuessService {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the HTTP client cannot be built.
    #[instrument(skip_all, fields(base_url = %base_url))]
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.trim_end_matches('/').to_string();
        info!(base_url = %base_url, "Created guess service client");
        Ok(Self { base_url, client })
    }

    /// Returns the service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/api/v1/{}/", self.base_url, name)
    }

    async fn unexpected(response: reqwest::Response) -> ServiceError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        warn!(status, body = %body, "Unexpected response from guess service");
        ServiceError::UnexpectedStatus { status, body }
    }
}

#[async_trait]
impl GuessService for HttpGuessService {
    #[instrument(skip(self))]
    async fn start_game(&self) -> Result<GameInfo, ServiceError> {
        let response = self.client.post(self.endpoint("start_game")).send().await?;
        if !response.status().is_success() {
            return Err(Self::unexpected(response).await);
        }
        let info: GameInfo = response.json().await?;
        info!(session_id = info.id, word_id = info.word_id, "Game started");
        Ok(info)
    }

    #[instrument(skip(self, request), fields(session_id = request.id, guess = %request.guess))]
    async fn submit_guess(&self, request: &GuessRequest) -> Result<GuessResponse, ServiceError> {
        let response = self
            .client
            .post(self.endpoint("guess"))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "Guess response");
        match status {
            s if s.is_success() => {
                let guess: Guess = response.json().await?;
                Ok(GuessResponse::Accepted(guess))
            }
            StatusCode::BAD_REQUEST => {
                info!("Invalid word");
                Ok(GuessResponse::InvalidWord)
            }
            StatusCode::FORBIDDEN => {
                info!("Game already over");
                Ok(GuessResponse::GameOver)
            }
            _ => Err(Self::unexpected(response).await),
        }
    }

    #[instrument(skip(self, request), fields(session_id = request.id))]
    async fn finish_game(&self, request: &FinishRequest) -> Result<FinishResponse, ServiceError> {
        let response = self
            .client
            .post(self.endpoint("finish_game"))
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::unexpected(response).await);
        }
        let finished: FinishResponse = response.json().await?;
        info!("Answer revealed");
        Ok(finished)
    }
}
