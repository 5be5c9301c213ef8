//! In-memory fetcher over a finite record set
//!
//! Used by tests and offline runs to stand in for a remote collection.

use super::types::{validate_page_request, RemoteFetcher};
use crate::error::{Error, Result};
use crate::types::{PageKey, Record};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;

/// Failure to inject for a specific page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Fail with a transport-style HTTP status error
    Network,
    /// Fail with a timeout
    Timeout,
    /// Fail with a decode error
    Decode,
}

impl FailureMode {
    fn to_error(self) -> Error {
        match self {
            FailureMode::Network => Error::http_status(503, "service unavailable"),
            FailureMode::Timeout => Error::Timeout { timeout_ms: 1000 },
            FailureMode::Decode => Error::decode("simulated malformed body"),
        }
    }
}

/// Serves pages out of a fixed `Vec<Record>`
#[derive(Debug, Default)]
pub struct InMemoryFetcher {
    records: Vec<Record>,
    latency: Option<Duration>,
    failures: Mutex<HashMap<PageKey, FailureMode>>,
    calls: Mutex<Vec<(u32, PageKey)>>,
}

impl InMemoryFetcher {
    /// Serve the given records
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    /// Serve `count` generated records with ids `1..=count`
    pub fn with_count(count: usize) -> Self {
        let records = (1..=count as i64)
            .map(|id| {
                Record::new(
                    id,
                    format!("Item {id}"),
                    format!("Description of item {id}"),
                    format!("https://images.example.com/{id}.png"),
                )
            })
            .collect();
        Self::new(records)
    }

    /// Delay every fetch by `latency`
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every fetch of `page` fail until cleared
    pub async fn fail_page(&self, page: PageKey, mode: FailureMode) {
        self.failures.lock().await.insert(page, mode);
    }

    /// Stop failing `page`
    pub async fn clear_failure(&self, page: PageKey) {
        self.failures.lock().await.remove(&page);
    }

    /// Every `(page_size, page_index)` requested so far, in order
    pub async fn calls(&self) -> Vec<(u32, PageKey)> {
        self.calls.lock().await.clone()
    }

    /// Total number of records served across all pages
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the backing collection is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RemoteFetcher for InMemoryFetcher {
    async fn fetch(&self, page_size: u32, page_index: PageKey) -> Result<Vec<Record>> {
        validate_page_request(page_size, page_index)?;
        self.calls.lock().await.push((page_size, page_index));

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(mode) = self.failures.lock().await.get(&page_index) {
            return Err(mode.to_error());
        }

        let size = page_size as usize;
        let start = (page_index as usize - 1).saturating_mul(size);
        let page = self
            .records
            .iter()
            .skip(start)
            .take(size)
            .cloned()
            .collect();
        Ok(page)
    }
}
