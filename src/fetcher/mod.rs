//! Remote fetcher module
//!
//! The leaf of the paging pipeline: one bounded-time request per page index.
//!
//! # Overview
//!
//! A [`RemoteFetcher`] knows nothing about paging state. It is asked for
//! `(page_size, page_index)` and returns the decoded records of that page,
//! or the error that prevented it. An empty page is a successful result
//! meaning the collection is exhausted. Fetchers never cache or retry.
//!
//! - [`HttpItemFetcher`] - `GET {base}/items?page={n}&per_page={k}`
//! - [`InMemoryFetcher`] - finite simulated backend with fault injection

mod http;
mod memory;
mod types;

pub use http::{HttpItemFetcher, DEFAULT_RESOURCE};
pub use memory::{FailureMode, InMemoryFetcher};
pub use types::{validate_page_request, RemoteFetcher};
