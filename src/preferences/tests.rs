//! Tests for the preferences module

use super::*;
use futures::StreamExt;
use std::time::Duration;
use tempfile::tempdir;

const COMPACT: BoolPreference = BoolPreference::new("compact", false);

// ============================================================================
// Handles
// ============================================================================

#[test]
fn test_show_description_defaults_to_true() {
    assert_eq!(SHOW_DESCRIPTION.key(), "show_description");
    assert!(SHOW_DESCRIPTION.default_value());
}

#[test]
fn test_lookup() {
    assert_eq!(lookup("show_description"), Some(SHOW_DESCRIPTION));
    assert_eq!(lookup("show-description"), Some(SHOW_DESCRIPTION));
    assert_eq!(lookup("dark_mode"), None);
}

// ============================================================================
// Get / Update
// ============================================================================

#[tokio::test]
async fn test_in_memory_get_and_update() {
    let store = FilePreferenceStore::in_memory();
    assert!(store.is_in_memory());

    assert!(store.get(SHOW_DESCRIPTION).await);
    assert!(!store.get(COMPACT).await);

    store.update(SHOW_DESCRIPTION, false).await.unwrap();
    assert!(!store.get(SHOW_DESCRIPTION).await);
    assert!(!store.get(COMPACT).await);
}

#[tokio::test]
async fn test_values_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let store = FilePreferenceStore::open(&path).unwrap();
    assert!(!store.is_in_memory());
    store.update(SHOW_DESCRIPTION, false).await.unwrap();
    drop(store);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("\"show_description\": false"));
    assert!(!path.with_extension("tmp").exists());

    let reopened = FilePreferenceStore::open(&path).unwrap();
    assert!(!reopened.get(SHOW_DESCRIPTION).await);
}

#[tokio::test]
async fn test_update_creates_parent_directory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("prefs.json");

    let store = FilePreferenceStore::open(&path).unwrap();
    store.update(COMPACT, true).await.unwrap();

    assert!(path.exists());
    assert_eq!(store.path(), path.as_path());
}

#[test]
fn test_open_rejects_invalid_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, "not json").unwrap();

    let err = FilePreferenceStore::open(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse preferences file"));
}

// ============================================================================
// Subscribe
// ============================================================================

#[tokio::test]
async fn test_subscribe_yields_current_then_changes() {
    let store = FilePreferenceStore::in_memory();
    let mut values = store.subscribe(SHOW_DESCRIPTION);

    assert_eq!(values.next().await, Some(true));

    store.update(SHOW_DESCRIPTION, false).await.unwrap();
    assert_eq!(values.next().await, Some(false));

    store.update(SHOW_DESCRIPTION, true).await.unwrap();
    assert_eq!(values.next().await, Some(true));
}

#[tokio::test]
async fn test_subscribe_skips_unchanged_values() {
    let store = FilePreferenceStore::in_memory();
    let mut values = store.subscribe(SHOW_DESCRIPTION);
    assert_eq!(values.next().await, Some(true));

    // Same value, and a different key
    store.update(SHOW_DESCRIPTION, true).await.unwrap();
    store.update(COMPACT, true).await.unwrap();

    let next = tokio::time::timeout(Duration::from_millis(50), values.next()).await;
    assert!(next.is_err());
}

#[tokio::test]
async fn test_subscribe_ends_when_store_dropped() {
    let store = FilePreferenceStore::in_memory();
    let mut values = store.subscribe(COMPACT);
    assert_eq!(values.next().await, Some(false));

    drop(store);
    assert_eq!(values.next().await, None);
}
