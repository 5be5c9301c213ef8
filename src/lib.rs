// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # item-pager
//!
//! Incremental loading over a page-indexed REST collection.
//!
//! ## Features
//!
//! - **Remote fetching**: one bounded-time `GET {base}/items?page=&per_page=` per page
//! - **Key continuation**: each loaded page carries the keys of its neighbours
//! - **Refresh near the anchor**: reload where the consumer was looking
//! - **Pager**: per-direction load states, prefetch, retry and cancellation
//! - **Preferences**: persisted boolean toggles with a change stream
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use item_pager::fetcher::HttpItemFetcher;
//! use item_pager::http::{HttpClient, HttpClientConfig};
//! use item_pager::pager::{Pager, PagingConfig};
//! use item_pager::paging::ItemPagingSource;
//! use item_pager::{LoadDirection, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = HttpClientConfig::builder()
//!         .base_url("https://api.example.com/v2")
//!         .build();
//!     let fetcher = HttpItemFetcher::new(HttpClient::with_config(config)?);
//!     let source = ItemPagingSource::new(fetcher, 20)?;
//!
//!     let mut pager = Pager::new(source, PagingConfig::new(20));
//!     pager.load_initial().await;
//!     pager.request_page(LoadDirection::Append).await;
//!
//!     for record in pager.items() {
//!         println!("{} {}", record.id, record.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Pager: pages, anchor, load states, prefetch, cancel      │
//! └──────────────────────────────────────────────────────────┘
//!                              │ LoadParams / LoadResult
//! ┌──────────────────────────────────────────────────────────┐
//! │ PagingSource: key derivation, refresh key from anchor    │
//! └──────────────────────────────────────────────────────────┘
//!                              │ (page_size, page_index)
//! ┌───────────────────┬──────────────────┬───────────────────┐
//! │ RemoteFetcher     │ HttpClient       │ RecordDecoder     │
//! │ HTTP / in-memory  │ timeout, limiter │ lenient JSON      │
//! └───────────────────┴──────────────────┴───────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for item-pager
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with timeout and rate limiting
pub mod http;

/// Response decoders
pub mod decode;

/// Remote fetchers (one page per request)
pub mod fetcher;

/// Paging sources and key derivation
pub mod paging;

/// Pager driving a paging source
pub mod pager;

/// Persisted preferences
pub mod preferences;

/// Application configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

// Re-export commonly used types
pub use config::AppConfig;
pub use fetcher::{HttpItemFetcher, RemoteFetcher};
pub use pager::{LoadOutcome, LoadState, Pager, PagingConfig};
pub use paging::{ItemPagingSource, LoadParams, LoadResult, Page, PagingSource, PagingState};
pub use preferences::{FilePreferenceStore, PreferenceStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
