//! Guess service error types.

use derive_more::{Display, Error};

/// Failure talking to the guess service.
///
/// The two expected rejections (invalid word, game over) are not errors;
/// they come back as [`GuessResponse`](super::GuessResponse) values.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ServiceError {
    /// The request could not be sent or the connection failed.
    #[display("Request failed: {}", _0)]
    Transport(#[error(not(source))] String),

    /// The service answered with a status outside the protocol.
    #[display("Unexpected response status {}: {}", status, body)]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[display("Malformed response: {}", _0)]
    Decode(#[error(not(source))] String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
