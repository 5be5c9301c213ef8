//! Pager module
//!
//! The consumer-facing side of paging: one [`Pager`] per viewing session.
//!
//! # Overview
//!
//! The pager keeps the pages a [`PagingSource`](crate::paging::PagingSource)
//! has produced, exposes them as one flat item sequence, and tracks a
//! [`LoadState`] for each direction (refresh, append, prepend). Consumers
//! report which item they are looking at with [`Pager::access`]; the pager
//! prefetches when that position nears an edge and uses it to pick the
//! resume key on [`Pager::refresh`].

mod session;
mod types;

pub use session::Pager;
pub use types::{
    CancelHandle, LoadOutcome, LoadState, LoadStates, PagingConfig, DEFAULT_PAGE_SIZE,
};
