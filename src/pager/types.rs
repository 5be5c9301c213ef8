//! Pager types
//!
//! Configuration, per-direction load state and cancellation handles.

use crate::error::Error;
use crate::types::LoadDirection;
use std::sync::Arc;
use tokio::sync::watch;

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: u32 = 20;

// ============================================================================
// Paging Config
// ============================================================================

/// How a [`Pager`](super::Pager) requests pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    /// Records per page
    pub page_size: u32,
    /// Load more once the anchor is this close to either edge
    pub prefetch_distance: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PagingConfig {
    /// Create a config prefetching one page ahead
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            prefetch_distance: page_size as usize,
        }
    }

    /// Set prefetch distance
    #[must_use]
    pub fn with_prefetch_distance(mut self, distance: usize) -> Self {
        self.prefetch_distance = distance;
        self
    }
}

// ============================================================================
// Load State
// ============================================================================

/// Load state of one direction
#[derive(Debug, Clone)]
pub enum LoadState {
    /// Nothing in flight
    Idle {
        /// No further pages exist in this direction
        end_of_pagination: bool,
    },
    /// A load is in flight
    Loading,
    /// The last load in this direction failed
    Error(Arc<Error>),
}

impl Default for LoadState {
    fn default() -> Self {
        Self::Idle {
            end_of_pagination: false,
        }
    }
}

impl LoadState {
    /// Idle state with the given end flag
    pub fn idle(end_of_pagination: bool) -> Self {
        Self::Idle { end_of_pagination }
    }

    /// Check if a load is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if the last load failed
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Check if this direction is exhausted
    pub fn is_end_of_pagination(&self) -> bool {
        matches!(
            self,
            Self::Idle {
                end_of_pagination: true
            }
        )
    }

    /// Whether a prefetch may be issued from this state
    pub fn can_prefetch(&self) -> bool {
        matches!(
            self,
            Self::Idle {
                end_of_pagination: false
            }
        )
    }

    /// Borrow the error, if any
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// Load states for all three directions
#[derive(Debug, Clone, Default)]
pub struct LoadStates {
    /// Initial load / refresh
    pub refresh: LoadState,
    /// Loads after the last page
    pub append: LoadState,
    /// Loads before the first page
    pub prepend: LoadState,
}

impl LoadStates {
    /// Borrow the state for `direction`
    pub fn get(&self, direction: LoadDirection) -> &LoadState {
        match direction {
            LoadDirection::Refresh => &self.refresh,
            LoadDirection::Append => &self.append,
            LoadDirection::Prepend => &self.prepend,
        }
    }

    /// Replace the state for `direction`
    pub fn set(&mut self, direction: LoadDirection, state: LoadState) {
        match direction {
            LoadDirection::Refresh => self.refresh = state,
            LoadDirection::Append => self.append = state,
            LoadDirection::Prepend => self.prepend = state,
        }
    }

    /// Check if any direction is loading
    pub fn is_loading(&self) -> bool {
        self.refresh.is_loading() || self.append.is_loading() || self.prepend.is_loading()
    }
}

// ============================================================================
// Load Outcome
// ============================================================================

/// What a pager load request did
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// A page was committed
    Loaded {
        /// Items in the committed page
        items: usize,
    },
    /// No key exists in that direction; nothing was requested
    EndOfPagination,
    /// Nothing needed loading
    Skipped,
    /// The load failed or was cancelled; nothing was committed
    Failed(Arc<Error>),
}

impl LoadOutcome {
    /// Check if a page was committed
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// Borrow the failure, if any
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

// ============================================================================
// Cancellation
// ============================================================================

/// Ends a pager's session from any task
///
/// Cancelling resolves an in-flight load without committing it and refuses
/// every later load.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub(super) fn new(tx: Arc<watch::Sender<bool>>) -> Self {
        Self { tx }
    }

    /// Cancel the session
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Check if the session was cancelled
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}
