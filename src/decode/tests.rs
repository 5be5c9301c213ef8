//! Tests for decoder module

use super::*;
use crate::error::ErrorKind;

#[test]
fn test_decode_top_level_array() {
    let body = r#"[
        {"id": 1, "name": "Buzz", "description": "IPA", "image_url": "https://img/1.png"},
        {"id": 2, "name": "Trashy Blonde", "description": "Blonde", "image_url": "https://img/2.png"}
    ]"#;

    let records = JsonRecordDecoder::new().decode(body).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, 1);
    assert_eq!(records[1].name, "Trashy Blonde");
    assert_eq!(records[1].image_url, "https://img/2.png");
}

#[test]
fn test_decode_empty_array_is_valid() {
    let records = JsonRecordDecoder::new().decode("[]").unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_decode_tolerates_unknown_and_missing_fields() {
    let body = r#"[{"id": 9, "abv": 5.2, "image_url": null}]"#;

    let records = JsonRecordDecoder::new().decode(body).unwrap();

    assert_eq!(records[0].id, 9);
    assert_eq!(records[0].name, "");
    assert_eq!(records[0].image_url, "");
}

#[test]
fn test_decode_preserves_duplicates_and_order() {
    let body = r#"[{"id": 5}, {"id": 5}, {"id": 4}]"#;

    let ids: Vec<i64> = JsonRecordDecoder::new()
        .decode(body)
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();

    assert_eq!(ids, vec![5, 5, 4]);
}

#[test]
fn test_decode_invalid_json() {
    let err = JsonRecordDecoder::new().decode("not json").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(err.to_string().contains("Failed to parse JSON"));
}

#[test]
fn test_decode_non_array_body() {
    let err = JsonRecordDecoder::new()
        .decode(r#"{"message": "rate limited"}"#)
        .unwrap_err();
    assert!(err.is_decode());
    assert!(err.to_string().contains("an object"));
}

#[test]
fn test_decode_record_without_id_fails_page() {
    let err = JsonRecordDecoder::new()
        .decode(r#"[{"id": 1}, {"name": "orphan"}]"#)
        .unwrap_err();
    assert!(err.is_decode());
    assert!(err.to_string().contains("index 1"));
}

#[test]
fn test_decode_with_record_path() {
    let decoder = JsonRecordDecoder::with_path("$.data.items");
    assert_eq!(decoder.record_path(), Some("$.data.items"));

    let body = r#"{"data": {"items": [{"id": 1}, {"id": 2}]}, "total": 2}"#;
    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_decode_with_missing_record_path() {
    let decoder = JsonRecordDecoder::with_path("results");
    let err = decoder.decode(r#"{"data": []}"#).unwrap_err();
    assert!(err.to_string().contains("Record path 'results' not found"));
}
