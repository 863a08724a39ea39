//! Storage error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Storage error: {} at {}:{}", message, file, line)]
pub struct StorageError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StorageError {
    /// Creates a new storage error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for StorageError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Diesel error: {}", err))
    }
}

impl From<diesel::ConnectionError> for StorageError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Connection error: {}", err))
    }
}

impl From<serde_json::Error> for StorageError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Encoding error: {}", err))
    }
}
