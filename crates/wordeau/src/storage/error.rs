//! Failures of the session store.

use derive_more::{Display, Error};
use tracing::instrument;

/// A slot could not be read, written or decoded.
///
/// Records the call site that raised it, so a log line points at the
/// storage operation rather than at the conversion helper.
#[derive(Debug, Clone, Display, Error)]
#[display("Session store failed at {}:{}: {}", file, line, message)]
pub struct StorageError {
    /// What went wrong.
    pub message: String,
    /// Line of the failing storage call.
    pub line: u32,
    /// File of the failing storage call.
    pub file: &'static str,
}

impl StorageError {
    /// Builds an error located at the caller.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: caller.line(),
            file: caller.file(),
        }
    }
}

impl From<diesel::result::Error> for StorageError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("SQLite statement failed: {}", err))
    }
}

impl From<diesel::ConnectionError> for StorageError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Cannot open SQLite database: {}", err))
    }
}

impl From<serde_json::Error> for StorageError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Cannot encode slot value: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_points_at_caller() {
        let err = StorageError::new("slot locked");
        assert_eq!(err.file, file!());
        assert!(err.to_string().ends_with(": slot locked"));
    }
}
