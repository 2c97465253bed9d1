//! Mock idiom source for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use chengyu_core::error::SourceError;
use chengyu_core::model::IdiomRecord;
use chengyu_core::traits::IdiomSource;

/// A scripted idiom source for driving the quiz engine without I/O.
///
/// Queued responses are returned first, in order. Once the queue is empty
/// every call gets the fallback: a fixed record, or a network error.
pub struct MockIdiomSource {
    /// Responses returned before the fallback kicks in.
    queue: Mutex<VecDeque<Result<Vec<IdiomRecord>, SourceError>>>,
    /// Record returned once the queue is drained; `None` means fail.
    fallback: Option<IdiomRecord>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// `count` argument of the last call.
    last_count: Mutex<Option<usize>>,
}

impl MockIdiomSource {
    /// A mock that always returns the same record.
    pub fn with_fixed_record(record: IdiomRecord) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: Some(record),
            call_count: AtomicU32::new(0),
            last_count: Mutex::new(None),
        }
    }

    /// A mock whose every fetch fails with a network error.
    pub fn failing() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: None,
            call_count: AtomicU32::new(0),
            last_count: Mutex::new(None),
        }
    }

    /// Queue responses ahead of the fallback.
    pub fn then(self, response: Result<Vec<IdiomRecord>, SourceError>) -> Self {
        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(response);
        self
    }

    /// Number of calls made to this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The `count` argument of the most recent call.
    pub fn last_count(&self) -> Option<usize> {
        *self.last_count.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl IdiomSource for MockIdiomSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_idioms(&self, count: usize) -> Result<Vec<IdiomRecord>, SourceError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_count.lock().unwrap_or_else(|e| e.into_inner()) = Some(count);

        let queued = self
            .queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        if let Some(response) = queued {
            return response;
        }

        match &self.fallback {
            Some(record) => Ok(vec![record.clone(); count.max(1)]),
            None => Err(SourceError::Network("mock source is offline".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chengyu_core::model::DEFAULT_IDIOM;

    #[tokio::test]
    async fn fixed_record() {
        let source = MockIdiomSource::with_fixed_record(DEFAULT_IDIOM.to_record());
        let records = source.fetch_idioms(1).await.unwrap();
        assert_eq!(records[0].word, DEFAULT_IDIOM.word);
        assert_eq!(source.call_count(), 1);
        assert_eq!(source.last_count(), Some(1));
    }

    #[tokio::test]
    async fn queue_then_fallback() {
        let source = MockIdiomSource::failing()
            .then(Ok(vec![DEFAULT_IDIOM.to_record()]))
            .then(Err(SourceError::EmptyDataset));

        assert!(source.fetch_idioms(1).await.is_ok());
        assert!(matches!(
            source.fetch_idioms(1).await,
            Err(SourceError::EmptyDataset)
        ));
        assert!(matches!(
            source.fetch_idioms(1).await,
            Err(SourceError::Network(_))
        ));
        assert_eq!(source.call_count(), 3);
    }
}
