//! Tests for the paging module

use super::*;
use crate::error::{Error, ErrorKind};
use crate::fetcher::{FailureMode, InMemoryFetcher};
use crate::types::{LoadDirection, Record};
use std::sync::Arc;
use test_case::test_case;

fn source_over(count: usize, page_size: u32) -> ItemPagingSource<Arc<InMemoryFetcher>> {
    ItemPagingSource::new(Arc::new(InMemoryFetcher::with_count(count)), page_size).unwrap()
}

fn page_of(len: usize, prev_key: Option<u32>, next_key: Option<u32>) -> Page<u32> {
    Page::new((0..len as u32).collect(), prev_key, next_key)
}

// ============================================================================
// LoadParams / LoadResult
// ============================================================================

#[test]
fn test_load_params_keys_and_directions() {
    assert_eq!(LoadParams::refresh(None).key(), None);
    assert_eq!(LoadParams::refresh(Some(4)).key(), Some(4));
    assert_eq!(LoadParams::append(3).key(), Some(3));
    assert_eq!(LoadParams::prepend(1).key(), Some(1));

    assert_eq!(LoadParams::refresh(None).direction(), LoadDirection::Refresh);
    assert_eq!(LoadParams::append(2).direction(), LoadDirection::Append);
    assert_eq!(LoadParams::prepend(2).direction(), LoadDirection::Prepend);
}

#[test]
fn test_load_result_accessors() {
    let ok: LoadResult<u32> = LoadResult::Page(page_of(2, None, Some(2)));
    assert!(ok.is_page());
    assert_eq!(ok.page().map(Page::len), Some(2));
    assert!(ok.error().is_none());

    let failed: LoadResult<u32> = LoadResult::Error(Error::decode("bad"));
    assert!(failed.is_error());
    assert!(failed.page().is_none());
    assert!(failed.into_result().is_err());
}

// ============================================================================
// PagingState
// ============================================================================

#[test]
fn test_closest_page_to_position() {
    let pages = vec![
        page_of(20, None, Some(2)),
        page_of(5, Some(1), Some(3)),
        page_of(0, Some(2), None),
    ];
    let state = PagingState::new(&pages, None);

    assert_eq!(state.item_count(), 25);
    assert_eq!(state.closest_page_to_position(0), Some(&pages[0]));
    assert_eq!(state.closest_page_to_position(19), Some(&pages[0]));
    assert_eq!(state.closest_page_to_position(20), Some(&pages[1]));
    assert_eq!(state.closest_page_to_position(24), Some(&pages[1]));
    // Past the end resolves to the last page
    assert_eq!(state.closest_page_to_position(500), Some(&pages[2]));
}

#[test]
fn test_closest_page_with_no_pages() {
    let pages: Vec<Page<u32>> = Vec::new();
    let state = PagingState::new(&pages, Some(3));
    assert!(state.closest_page_to_position(3).is_none());
    assert!(state.is_empty());
}

#[test]
fn test_closest_item_and_edges() {
    let pages = vec![
        Page::new(vec![10, 11], None, Some(2)),
        Page::new(vec![12], Some(1), Some(3)),
        Page::new(vec![], Some(2), None),
    ];
    let state = PagingState::new(&pages, Some(1));

    assert_eq!(state.closest_item_to_position(2), Some(&12));
    assert_eq!(state.closest_item_to_position(99), Some(&12));
    assert_eq!(state.first_item(), Some(&10));
    assert_eq!(state.last_item(), Some(&12));
}

// ============================================================================
// Refresh Key Derivation
// ============================================================================

#[test]
fn test_refresh_key_without_anchor() {
    let pages = vec![page_of(20, None, Some(2))];
    let state = PagingState::new(&pages, None);
    assert_eq!(refresh_key_from_anchor(&state), None);
}

#[test]
fn test_refresh_key_on_last_loaded_page_uses_prev_plus_one() {
    let pages = vec![
        page_of(20, None, Some(2)),
        page_of(20, Some(1), Some(3)),
        page_of(7, Some(2), None),
    ];
    let state = PagingState::new(&pages, Some(45));
    assert_eq!(refresh_key_from_anchor(&state), Some(3));
}

#[test_case(0, Some(1) ; "first page falls back to next minus one")]
#[test_case(25, Some(2) ; "middle page uses prev plus one")]
#[test_case(10_000, Some(3) ; "far past the end picks the last page")]
fn test_refresh_key_by_anchor(anchor: usize, expected: Option<u32>) {
    let pages = vec![
        page_of(20, None, Some(2)),
        page_of(20, Some(1), Some(3)),
        page_of(20, Some(2), Some(4)),
    ];
    let state = PagingState::new(&pages, Some(anchor));
    assert_eq!(refresh_key_from_anchor(&state), expected);
}

#[test]
fn test_refresh_key_for_keyless_page() {
    let pages = vec![page_of(0, None, None)];
    let state = PagingState::new(&pages, Some(0));
    assert_eq!(refresh_key_from_anchor(&state), None);
}

#[test]
fn test_item_source_refresh_key_delegates() {
    let source = source_over(0, 20);
    let pages: Vec<Page<Record>> = vec![
        Page::new(vec![], None, Some(2)),
        Page::new(vec![], Some(1), None),
    ];
    // Empty pages hold no positions, so anchor 0 lands on the second page
    let state = PagingState::new(&pages, Some(0));
    assert_eq!(source.refresh_key(&state), Some(2));
}

// ============================================================================
// Load
// ============================================================================

#[test]
fn test_item_source_rejects_zero_page_size() {
    let result = ItemPagingSource::new(InMemoryFetcher::with_count(1), 0);
    assert!(matches!(result, Err(Error::InvalidPageSize { size: 0 })));
}

#[test]
fn test_item_source_supports_key_reuse() {
    assert!(source_over(1, 1).key_reuse_supported());
}

#[tokio::test]
async fn test_load_scenario_25_records_page_size_20() {
    let source = source_over(25, 20);

    let first = source.load(LoadParams::refresh(None)).await.into_result().unwrap();
    assert_eq!(first.len(), 20);
    assert_eq!(first.prev_key, None);
    assert_eq!(first.next_key, Some(2));

    let second = source.load(LoadParams::append(2)).await.into_result().unwrap();
    assert_eq!(second.len(), 5);
    assert_eq!(second.prev_key, Some(1));
    assert_eq!(second.next_key, Some(3));

    let third = source.load(LoadParams::append(3)).await.into_result().unwrap();
    assert!(third.is_empty());
    assert_eq!(third.prev_key, Some(2));
    assert_eq!(third.next_key, None);

    assert_eq!(
        source.fetcher().calls().await,
        vec![(20, 1), (20, 2), (20, 3)]
    );
}

#[tokio::test]
async fn test_following_next_key_terminates() {
    for (count, page_size) in [(0, 5), (1, 5), (10, 5), (11, 5), (97, 10)] {
        let source = source_over(count, page_size);
        let mut params = LoadParams::refresh(None);
        let mut loads = 0;
        let mut total = 0;

        let last = loop {
            loads += 1;
            assert!(loads <= count + 2, "paging did not terminate");
            let page = source.load(params).await.into_result().unwrap();
            total += page.len();
            match page.next_key {
                Some(next) => params = LoadParams::append(next),
                None => break page,
            }
        };

        assert!(last.is_empty());
        assert_eq!(total, count);
    }
}

#[test_case(1, None ; "page one has no previous key")]
#[test_case(2, Some(1) ; "page two links back to one")]
#[test_case(7, Some(6) ; "page seven links back to six")]
#[tokio::test]
async fn test_prev_key_is_index_minus_one(key: u32, expected: Option<u32>) {
    let source = source_over(1_000, 10);
    let page = source
        .load(LoadParams::append(key))
        .await
        .into_result()
        .unwrap();
    assert_eq!(page.prev_key, expected);
}

#[tokio::test]
async fn test_prev_key_is_derived_even_past_the_end() {
    let source = source_over(3, 10);
    let page = source.load(LoadParams::prepend(5)).await.into_result().unwrap();
    assert!(page.is_empty());
    assert_eq!(page.prev_key, Some(4));
    assert_eq!(page.next_key, None);
}

#[tokio::test]
async fn test_refresh_with_key_loads_that_page() {
    let source = source_over(100, 10);
    let page = source
        .load(LoadParams::refresh(Some(4)))
        .await
        .into_result()
        .unwrap();

    assert_eq!(page.data[0].id, 31);
    assert_eq!(page.prev_key, Some(3));
    assert_eq!(page.next_key, Some(5));
}

#[tokio::test]
async fn test_network_error_propagates_without_keys() {
    let fetcher = Arc::new(InMemoryFetcher::with_count(50));
    fetcher.fail_page(2, FailureMode::Network).await;
    let source = ItemPagingSource::new(fetcher.clone(), 20).unwrap();

    let result = source.load(LoadParams::append(2)).await;
    assert!(result.page().is_none());
    assert_eq!(result.error().map(Error::kind), Some(ErrorKind::Network));
    // Exactly one attempt, no retry
    assert_eq!(fetcher.calls().await, vec![(20, 2)]);
}

#[tokio::test]
async fn test_decode_and_timeout_errors_propagate() {
    let fetcher = Arc::new(InMemoryFetcher::with_count(50));
    fetcher.fail_page(1, FailureMode::Decode).await;
    fetcher.fail_page(3, FailureMode::Timeout).await;
    let source = ItemPagingSource::new(fetcher, 20).unwrap();

    let decode = source.load(LoadParams::refresh(None)).await;
    assert!(decode.error().is_some_and(Error::is_decode));

    let timeout = source.load(LoadParams::append(3)).await;
    assert_eq!(timeout.error().map(Error::kind), Some(ErrorKind::Timeout));
}

#[tokio::test]
async fn test_invalid_key_is_a_failure() {
    let source = source_over(10, 5);
    let result = source.load(LoadParams::append(0)).await;
    assert!(matches!(result, LoadResult::Error(Error::InvalidPageKey { key: 0 })));
    assert!(source.fetcher().calls().await.is_empty());
}

#[tokio::test]
async fn test_key_reuse_rederives_same_keys() {
    let source = source_over(60, 20);

    let first = source.load(LoadParams::append(2)).await.into_result().unwrap();
    let again = source.load(LoadParams::append(2)).await.into_result().unwrap();

    assert_eq!(first.prev_key, Some(1));
    assert_eq!(again.prev_key, Some(1));
    assert_eq!(first.next_key, again.next_key);
    assert_eq!(source.fetcher().calls().await, vec![(20, 2), (20, 2)]);
}
