//! Idiom source error types.
//!
//! These errors describe why an idiom source could not produce a usable
//! record. Defined in `chengyu-core` so the quiz engine can log and classify
//! failures before falling back to the built-in idiom. None of them is ever
//! surfaced to the learner as a hard error.

use thiserror::Error;

/// Errors that can occur when fetching idioms from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The source answered with a non-2xx status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The envelope carried `success: false`.
    #[error("source reported failure: {0}")]
    Unsuccessful(String),

    /// The dataset behind the source has no records.
    #[error("dataset is empty")]
    EmptyDataset,

    /// A record was missing a required field or could not be decoded.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Reading a local dataset failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    /// Returns `true` if retrying the same request might succeed.
    ///
    /// Data problems (empty dataset, malformed records) are permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Network(_) | SourceError::Timeout(_) => true,
            SourceError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::MalformedRecord(e.to_string())
    }
}
