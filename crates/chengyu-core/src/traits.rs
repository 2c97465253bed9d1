//! Core trait definition for idiom sources.
//!
//! Implemented by the `chengyu-source` crate (HTTP, dataset file, built-in)
//! and by test doubles.

use async_trait::async_trait;

use crate::error::SourceError;
use crate::model::IdiomRecord;

/// A backend that hands out idiom records.
///
/// Implementations should fail fast (bounded timeouts) rather than hang; the
/// engine falls back to its default idiom on any error.
#[async_trait]
pub trait IdiomSource: Send + Sync {
    /// Human-readable source name (e.g. "http").
    fn name(&self) -> &str;

    /// Fetch up to `count` records.
    ///
    /// `count == 1` yields a single random record. Larger counts yield a
    /// random sample without replacement, capped at the dataset size.
    async fn fetch_idioms(&self, count: usize) -> Result<Vec<IdiomRecord>, SourceError>;
}

