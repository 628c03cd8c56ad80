//! Error types for the stats store.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Errors surfaced by the storage, query, and retention operations.
///
/// This crate performs no internal retries and no suppression: every backend
/// failure reaches the caller as one of these variants, and a transaction
/// either commits in full or not at all.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Malformed caller input. Never worth retrying.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The backend transaction could not be issued or committed.
    /// The caller owns the retry policy.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(#[from] BackendError),

    /// A stored member failed to deserialize during a query. Surfaced rather
    /// than skipped: silent loss would hide a key-scheme collision or
    /// external tampering.
    #[error("corrupt entry under {key} at score {score}: {source}")]
    CorruptData {
        key: String,
        score: i64,
        #[source]
        source: serde_json::Error,
    },
}

/// Transport-level failure from a [`Backend`](crate::backend::Backend)
/// implementation.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Redis connection or protocol failure, carried unmodified.
    #[error(transparent)]
    Redis(#[from] redis::RedisError),

    /// Failure from a non-Redis backend implementation.
    #[error("{0}")]
    Other(String),
}
