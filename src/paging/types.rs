//! Paging types
//!
//! Load requests, load results and the read-only view of loaded pages.

use crate::error::{Error, Result};
use crate::types::{LoadDirection, PageKey};

// ============================================================================
// Load Params
// ============================================================================

/// A single load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadParams {
    /// Initial load or reload after invalidation; `None` means the first page
    Refresh {
        /// Key to resume from
        key: Option<PageKey>,
    },
    /// Load the page after the last loaded one
    Append {
        /// The last loaded page's next key
        key: PageKey,
    },
    /// Load the page before the first loaded one
    Prepend {
        /// The first loaded page's previous key
        key: PageKey,
    },
}

impl LoadParams {
    /// Create refresh params
    pub fn refresh(key: Option<PageKey>) -> Self {
        Self::Refresh { key }
    }

    /// Create append params
    pub fn append(key: PageKey) -> Self {
        Self::Append { key }
    }

    /// Create prepend params
    pub fn prepend(key: PageKey) -> Self {
        Self::Prepend { key }
    }

    /// The requested key, `None` only for a keyless refresh
    pub fn key(&self) -> Option<PageKey> {
        match *self {
            Self::Refresh { key } => key,
            Self::Append { key } | Self::Prepend { key } => Some(key),
        }
    }

    /// The direction this load targets
    pub fn direction(&self) -> LoadDirection {
        match self {
            Self::Refresh { .. } => LoadDirection::Refresh,
            Self::Append { .. } => LoadDirection::Append,
            Self::Prepend { .. } => LoadDirection::Prepend,
        }
    }
}

// ============================================================================
// Page / Load Result
// ============================================================================

/// One loaded batch of items plus its continuation keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in server order, possibly empty
    pub data: Vec<T>,
    /// Key of the page before this one
    pub prev_key: Option<PageKey>,
    /// Key of the page after this one
    pub next_key: Option<PageKey>,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(data: Vec<T>, prev_key: Option<PageKey>, next_key: Option<PageKey>) -> Self {
        Self {
            data,
            prev_key,
            next_key,
        }
    }

    /// Number of items in the page
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the page holds no items
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Outcome of a single load
#[derive(Debug)]
pub enum LoadResult<T> {
    /// The page was loaded
    Page(Page<T>),
    /// The load failed; no keys are derived for a failed load
    Error(Error),
}

impl<T> LoadResult<T> {
    /// Check if this is a loaded page
    pub fn is_page(&self) -> bool {
        matches!(self, Self::Page(_))
    }

    /// Check if this is a failure
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Borrow the page, if any
    pub fn page(&self) -> Option<&Page<T>> {
        match self {
            Self::Page(page) => Some(page),
            Self::Error(_) => None,
        }
    }

    /// Borrow the error, if any
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Page(_) => None,
            Self::Error(err) => Some(err),
        }
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> Result<Page<T>> {
        match self {
            Self::Page(page) => Ok(page),
            Self::Error(err) => Err(err),
        }
    }
}

impl<T> From<Result<Page<T>>> for LoadResult<T> {
    fn from(result: Result<Page<T>>) -> Self {
        match result {
            Ok(page) => Self::Page(page),
            Err(err) => Self::Error(err),
        }
    }
}

// ============================================================================
// Paging State
// ============================================================================

/// Read-only view of the pages loaded so far and where the consumer is looking
#[derive(Debug)]
pub struct PagingState<'a, T> {
    /// Loaded pages in sequence order
    pub pages: &'a [Page<T>],
    /// Index into the combined item sequence the consumer is viewing
    pub anchor_position: Option<usize>,
}

impl<T> Clone for PagingState<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PagingState<'_, T> {}

impl<'a, T> PagingState<'a, T> {
    /// Create a state view
    pub fn new(pages: &'a [Page<T>], anchor_position: Option<usize>) -> Self {
        Self {
            pages,
            anchor_position,
        }
    }

    /// Total number of loaded items
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// Whether every loaded page is empty (or nothing is loaded)
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(Page::is_empty)
    }

    /// The loaded page whose range contains `position`, or the nearest one
    ///
    /// Positions past the end resolve to the last page.
    pub fn closest_page_to_position(&self, position: usize) -> Option<&'a Page<T>> {
        let last = self.pages.len().checked_sub(1)?;
        let mut index = 0;
        let mut offset = position;
        while index < last && offset >= self.pages[index].len() {
            offset -= self.pages[index].len();
            index += 1;
        }
        self.pages.get(index)
    }

    /// The item at `position`, or the nearest loaded item
    pub fn closest_item_to_position(&self, position: usize) -> Option<&'a T> {
        let mut offset = position;
        let mut last_seen = None;
        for page in self.pages {
            if offset < page.len() {
                return page.data.get(offset);
            }
            offset -= page.len();
            last_seen = page.data.last().or(last_seen);
        }
        last_seen
    }

    /// First loaded item
    pub fn first_item(&self) -> Option<&'a T> {
        self.pages.iter().find_map(|page| page.data.first())
    }

    /// Last loaded item
    pub fn last_item(&self) -> Option<&'a T> {
        self.pages.iter().rev().find_map(|page| page.data.last())
    }
}
