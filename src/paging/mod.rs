//! Paging source module
//!
//! Turns a page-indexed remote collection into a key-continued sequence.
//!
//! # Overview
//!
//! A [`PagingSource`] answers one [`LoadParams`] at a time with a
//! [`LoadResult`]: either a [`Page`] of items with its previous/next keys,
//! or the error that stopped the load. It holds no mutable state between
//! calls; the caller (see [`crate::pager`]) owns the loaded pages and hands
//! them back as a [`PagingState`] when a refresh key is needed.
//!
//! Keys are 1-based page indices. Page `n` links back to `n - 1` (none for
//! page 1) and forward to `n + 1` while pages are non-empty. An empty page
//! is the only end-of-data signal, so a collection whose last page happens
//! to be full costs one extra, empty fetch.

mod source;
mod types;

pub use source::{refresh_key_from_anchor, ItemPagingSource, PagingSource};
pub use types::{LoadParams, LoadResult, Page, PagingState};

#[cfg(test)]
mod tests;
