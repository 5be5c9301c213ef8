//! Pager session
//!
//! Owns the pages loaded from a [`PagingSource`] for the lifetime of one
//! consumer session and turns consumer actions (initial load, scrolling,
//! refresh, retry) into load requests.

use super::types::{CancelHandle, LoadOutcome, LoadState, LoadStates, PagingConfig};
use crate::error::Error;
use crate::paging::{LoadParams, LoadResult, Page, PagingSource, PagingState};
use crate::types::{LoadDirection, PageKey};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Drives a [`PagingSource`] and holds everything loaded so far
///
/// Every load takes `&mut self`, so at most one load per pager is in flight.
/// A direction that has reached the end of pagination is not re-requested
/// until a refresh starts a new generation.
pub struct Pager<S: PagingSource> {
    source: S,
    config: PagingConfig,
    pages: Vec<Page<S::Item>>,
    anchor_position: Option<usize>,
    load_states: LoadStates,
    loaded_keys: HashSet<PageKey>,
    generation: u64,
    cancel_tx: Arc<watch::Sender<bool>>,
    cancel_rx: watch::Receiver<bool>,
}

impl<S: PagingSource> Pager<S> {
    /// Create a pager with nothing loaded
    pub fn new(source: S, config: PagingConfig) -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            source,
            config,
            pages: Vec::new(),
            anchor_position: None,
            load_states: LoadStates::default(),
            loaded_keys: HashSet::new(),
            generation: 0,
            cancel_tx: Arc::new(tx),
            cancel_rx: rx,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Borrow the paging source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the paging config
    pub fn config(&self) -> &PagingConfig {
        &self.config
    }

    /// Loaded pages in sequence order
    pub fn pages(&self) -> &[Page<S::Item>] {
        &self.pages
    }

    /// All loaded items in sequence order
    pub fn items(&self) -> impl Iterator<Item = &S::Item> + '_ {
        self.pages.iter().flat_map(|page| page.data.iter())
    }

    /// Number of loaded items
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// Item at `index` in the combined sequence
    pub fn get(&self, index: usize) -> Option<&S::Item> {
        self.items().nth(index)
    }

    /// Position the consumer last accessed
    pub fn anchor_position(&self) -> Option<usize> {
        self.anchor_position
    }

    /// Per-direction load states
    pub fn load_states(&self) -> &LoadStates {
        &self.load_states
    }

    /// Number of committed refreshes; each one replaces every page
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Read-only view handed to the source for refresh key derivation
    pub fn paging_state(&self) -> PagingState<'_, S::Item> {
        PagingState::new(&self.pages, self.anchor_position)
    }

    /// Handle that cancels this session from another task
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle::new(Arc::clone(&self.cancel_tx))
    }

    /// Check if the session was cancelled
    pub fn is_cancelled(&self) -> bool {
        *self.cancel_rx.borrow()
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Load the first page unless something is already loaded
    pub async fn load_initial(&mut self) -> LoadOutcome {
        if self.pages.is_empty() {
            self.load(LoadParams::refresh(None)).await
        } else {
            LoadOutcome::Skipped
        }
    }

    /// Invalidate and reload around the current anchor
    ///
    /// The resume key is derived from what is loaded now; the new page
    /// replaces all pages only once it arrives, so a failed refresh keeps
    /// the old content visible.
    pub async fn refresh(&mut self) -> LoadOutcome {
        let key = if self.pages.is_empty() {
            None
        } else {
            self.source.refresh_key(&self.paging_state())
        };
        self.refresh_from(key).await
    }

    /// Replace all pages with the page at `key` (the first page when `None`)
    pub async fn refresh_from(&mut self, key: Option<PageKey>) -> LoadOutcome {
        info!("Refreshing from key {:?}", key);
        self.load(LoadParams::refresh(key)).await
    }

    /// Request the next page in `direction`
    ///
    /// Append and prepend fall back to an initial load when nothing has been
    /// loaded yet.
    pub async fn request_page(&mut self, direction: LoadDirection) -> LoadOutcome {
        let params = match direction {
            LoadDirection::Refresh => return self.refresh().await,
            LoadDirection::Append => match self.pages.last().map(|page| page.next_key) {
                None => LoadParams::refresh(None),
                Some(Some(key)) => LoadParams::append(key),
                Some(None) => return self.end_of_pagination(direction),
            },
            LoadDirection::Prepend => match self.pages.first().map(|page| page.prev_key) {
                None => LoadParams::refresh(None),
                Some(Some(key)) => LoadParams::prepend(key),
                Some(None) => return self.end_of_pagination(direction),
            },
        };
        self.load(params).await
    }

    /// Re-issue every direction whose last load failed
    ///
    /// Refresh goes first; a successful refresh clears the other errors.
    pub async fn retry(&mut self) -> Vec<(LoadDirection, LoadOutcome)> {
        let mut outcomes = Vec::new();
        for direction in [
            LoadDirection::Refresh,
            LoadDirection::Prepend,
            LoadDirection::Append,
        ] {
            let failed = self
                .load_states
                .get(direction)
                .error()
                .is_some_and(|e| !e.is_cancelled());
            if failed {
                let outcome = self.request_page(direction).await;
                outcomes.push((direction, outcome));
            }
        }
        outcomes
    }

    /// Record that the consumer is viewing `index` and prefetch near the edges
    ///
    /// Returns the item at `index` as it was before any prefetch ran. Failed
    /// directions are not prefetched; use [`Pager::retry`].
    pub async fn access(&mut self, index: usize) -> Option<S::Item> {
        let item = self.get(index).cloned();
        self.anchor_position = Some(index);

        if self.pages.is_empty() {
            return item;
        }

        let distance = self.config.prefetch_distance;
        let items_after = self.item_count().saturating_sub(index.saturating_add(1));
        if items_after < distance && self.load_states.append.can_prefetch() {
            debug!("Prefetching after index {}", index);
            self.request_page(LoadDirection::Append).await;
        }

        if index < distance && self.load_states.prepend.can_prefetch() {
            debug!("Prefetching before index {}", index);
            self.request_page(LoadDirection::Prepend).await;
        }

        item
    }

    fn end_of_pagination(&mut self, direction: LoadDirection) -> LoadOutcome {
        self.load_states.set(direction, LoadState::idle(true));
        LoadOutcome::EndOfPagination
    }

    async fn load(&mut self, params: LoadParams) -> LoadOutcome {
        let direction = params.direction();

        if self.is_cancelled() {
            return LoadOutcome::Failed(Arc::new(Error::Cancelled));
        }

        if let Some(key) = params.key() {
            let reused = direction != LoadDirection::Refresh && self.loaded_keys.contains(&key);
            if reused && !self.source.key_reuse_supported() {
                let err = Arc::new(Error::KeyReused { key });
                self.load_states.set(direction, LoadState::Error(Arc::clone(&err)));
                return LoadOutcome::Failed(err);
            }
        }

        let previous = match self.load_states.get(direction) {
            LoadState::Loading => LoadState::default(),
            other => other.clone(),
        };
        self.load_states.set(direction, LoadState::Loading);
        debug!("{} load started with key {:?}", direction, params.key());

        match self.load_from_source(params).await {
            LoadResult::Page(page) => self.commit(params, page),
            LoadResult::Error(Error::Cancelled) => {
                info!("{} load cancelled; nothing committed", direction);
                self.load_states.set(direction, previous);
                LoadOutcome::Failed(Arc::new(Error::Cancelled))
            }
            LoadResult::Error(err) => {
                warn!("{} load failed: {}", direction, err);
                let err = Arc::new(err);
                self.load_states.set(direction, LoadState::Error(Arc::clone(&err)));
                LoadOutcome::Failed(err)
            }
        }
    }

    async fn load_from_source(&self, params: LoadParams) -> LoadResult<S::Item> {
        let mut cancelled = self.cancel_rx.clone();
        tokio::select! {
            biased;
            _ = cancelled.wait_for(|c| *c) => LoadResult::Error(Error::Cancelled),
            result = self.source.load(params) => result,
        }
    }

    fn commit(&mut self, params: LoadParams, page: Page<S::Item>) -> LoadOutcome {
        let items = page.len();
        let direction = params.direction();

        match direction {
            LoadDirection::Refresh => {
                self.generation += 1;
                self.loaded_keys.clear();
                self.load_states = LoadStates {
                    refresh: LoadState::idle(false),
                    append: LoadState::idle(page.next_key.is_none()),
                    prepend: LoadState::idle(page.prev_key.is_none()),
                };
                self.anchor_position = None;
                self.pages = vec![page];
            }
            LoadDirection::Append => {
                self.load_states
                    .set(direction, LoadState::idle(page.next_key.is_none()));
                self.pages.push(page);
            }
            LoadDirection::Prepend => {
                self.load_states
                    .set(direction, LoadState::idle(page.prev_key.is_none()));
                self.anchor_position = self
                    .anchor_position
                    .map(|anchor| anchor.saturating_add(items));
                self.pages.insert(0, page);
            }
        }

        if let Some(key) = params.key() {
            self.loaded_keys.insert(key);
        }

        debug!(
            "{} committed {} items ({} total, generation {})",
            direction,
            items,
            self.item_count(),
            self.generation
        );
        LoadOutcome::Loaded { items }
    }
}

impl<S: PagingSource + std::fmt::Debug> std::fmt::Debug for Pager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("source", &self.source)
            .field("config", &self.config)
            .field("pages", &self.pages.len())
            .field("items", &self.item_count())
            .field("anchor_position", &self.anchor_position)
            .field("load_states", &self.load_states)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
