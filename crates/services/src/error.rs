//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuizSettingsError;
use quiz_core::wire::DecodeError;
use storage::repository::StorageError;

/// Errors emitted by `TopicFetcher` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("network is unreachable")]
    Unreachable,

    #[error("invalid data source URL: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("server returned an empty body")]
    EmptyResponse,

    /// Decode failure, with a bounded prefix of the offending body retained
    /// for diagnostic logging.
    #[error("could not decode quiz document: {source}")]
    Decode {
        source: DecodeError,
        body_prefix: String,
    },
}

/// Errors emitted by `SyncService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyncError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The remote fetch failed and the local cache could not stand in.
    #[error("remote fetch failed ({fetch}) and the local cache is unusable ({storage})")]
    Unavailable {
        fetch: FetchError,
        storage: StorageError,
    },
}

/// Errors emitted by `QuizSession`. These indicate caller misuse and are
/// surfaced immediately rather than retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,

    #[error("no topic at index {index}")]
    UnknownTopic { index: usize },

    #[error("session already completed")]
    Completed,

    #[error("option index {index} is out of range for {option_count} options")]
    InvalidOption { index: usize, option_count: usize },

    #[error("no option selected for the current question")]
    NoSelection,

    #[error("no earlier question to revisit")]
    NoEarlierQuestion,
}

/// Errors emitted by `SettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsServiceError {
    #[error(transparent)]
    Settings(#[from] QuizSettingsError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
