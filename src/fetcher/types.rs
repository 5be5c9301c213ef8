//! Fetcher traits

use crate::error::{Error, Result};
use crate::types::{PageKey, Record, FIRST_PAGE_KEY};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of raw pages of records
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    /// Fetch page `page_index` (1-based) holding up to `page_size` records
    ///
    /// An empty vector means there is no more data.
    async fn fetch(&self, page_size: u32, page_index: PageKey) -> Result<Vec<Record>>;
}

#[async_trait]
impl<F: RemoteFetcher + ?Sized> RemoteFetcher for Arc<F> {
    async fn fetch(&self, page_size: u32, page_index: PageKey) -> Result<Vec<Record>> {
        (**self).fetch(page_size, page_index).await
    }
}

/// Check the `page_size > 0` and `page_index >= 1` preconditions
pub fn validate_page_request(page_size: u32, page_index: PageKey) -> Result<()> {
    if page_size == 0 {
        return Err(Error::InvalidPageSize { size: page_size });
    }
    if page_index < FIRST_PAGE_KEY {
        return Err(Error::InvalidPageKey { key: page_index });
    }
    Ok(())
}
