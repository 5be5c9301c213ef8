//! Paging source trait and the page-indexed implementation

use super::types::{LoadParams, LoadResult, Page, PagingState};
use crate::error::Error;
use crate::fetcher::RemoteFetcher;
use crate::types::{PageKey, Record, FIRST_PAGE_KEY};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Pull-based producer of key-continued pages
#[async_trait]
pub trait PagingSource: Send + Sync {
    /// Item type held in pages
    type Item: Clone + Send + Sync + 'static;

    /// Whether the same key may be loaded more than once per generation
    fn key_reuse_supported(&self) -> bool {
        false
    }

    /// Key to reload from after invalidation, given what is currently loaded
    fn refresh_key(&self, state: &PagingState<'_, Self::Item>) -> Option<PageKey>;

    /// Load one page
    async fn load(&self, params: LoadParams) -> LoadResult<Self::Item>;
}

/// Resume key nearest the anchor position
///
/// Uses the closest page's `prev_key + 1`, falling back to `next_key - 1`.
/// Returns `None` when nothing has been viewed or the closest page carries
/// no keys; callers then start from the first page.
pub fn refresh_key_from_anchor<T>(state: &PagingState<'_, T>) -> Option<PageKey> {
    let anchor = state.anchor_position?;
    let page = state.closest_page_to_position(anchor)?;

    page.prev_key
        .and_then(|prev| prev.checked_add(1))
        .or_else(|| {
            page.next_key
                .and_then(|next| next.checked_sub(1))
                .filter(|key| *key >= FIRST_PAGE_KEY)
        })
}

/// Paging source over a page-indexed [`RemoteFetcher`]
///
/// Stateless between loads: keys are derived from the requested index and
/// whether the fetched page was empty.
#[derive(Debug, Clone)]
pub struct ItemPagingSource<F> {
    fetcher: F,
    page_size: u32,
}

impl<F: RemoteFetcher> ItemPagingSource<F> {
    /// Create a source requesting `page_size` records per page
    pub fn new(fetcher: F, page_size: u32) -> crate::Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize { size: page_size });
        }
        Ok(Self { fetcher, page_size })
    }

    /// Records requested per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Borrow the fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}

#[async_trait]
impl<F: RemoteFetcher> PagingSource for ItemPagingSource<F> {
    type Item = Record;

    fn key_reuse_supported(&self) -> bool {
        true
    }

    fn refresh_key(&self, state: &PagingState<'_, Record>) -> Option<PageKey> {
        let key = refresh_key_from_anchor(state);
        debug!(
            "Refresh key {:?} for anchor {:?}",
            key, state.anchor_position
        );
        key
    }

    async fn load(&self, params: LoadParams) -> LoadResult<Record> {
        let page_index = params.key().unwrap_or(FIRST_PAGE_KEY);
        if page_index < FIRST_PAGE_KEY {
            return LoadResult::Error(Error::InvalidPageKey { key: page_index });
        }

        let records = match self.fetcher.fetch(self.page_size, page_index).await {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "{} load of page {} failed: {}",
                    params.direction(),
                    page_index,
                    e
                );
                return LoadResult::Error(e);
            }
        };

        let prev_key = (page_index > FIRST_PAGE_KEY).then(|| page_index - 1);
        // An empty page is the only end-of-data signal
        let next_key = if records.is_empty() {
            None
        } else {
            page_index.checked_add(1)
        };

        debug!(
            "{} load of page {}: {} records, prev {:?}, next {:?}",
            params.direction(),
            page_index,
            records.len(),
            prev_key,
            next_key
        );
        LoadResult::Page(Page::new(records, prev_key, next_key))
    }
}
