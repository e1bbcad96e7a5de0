//! Serde serialization/deserialization tests for core types.
//!
//! These tests pin the JSON shapes returned by the lookup API and written to
//! the recent-searches file.

use chrono::{TimeZone, Utc};

use crate::{ImageText, RecentSearch, Vehicle};

fn sample_vehicle() -> Vehicle {
    Vehicle::new("1HGCM82633A123456", "United States", "North America", "1HG", "CM8263", "3A123456", 2003)
}

// ============================================================================
// Vehicle Serde Tests
// ============================================================================

#[test]
fn test_vehicle_deserialize_api_response() {
    let json = r#"{
        "vin": "1HGCM82633A123456",
        "country": "United States",
        "manufacturer": "Honda",
        "region": "North America",
        "wmi": "1HG",
        "vds": "CM8263",
        "vis": "3A123456",
        "years": [2003, 2033],
        "year": 2003
    }"#;

    let vehicle: Vehicle = serde_json::from_str(json).unwrap();
    assert_eq!(vehicle, sample_vehicle());
    assert_eq!(vehicle.id(), "1HGCM82633A123456");
}

#[test]
fn test_vehicle_missing_field_is_error() {
    let json = r#"{"vin": "1HGCM82633A123456", "country": "United States"}"#;
    let result: Result<Vehicle, _> = serde_json::from_str(json);
    assert!(result.is_err());
}

#[test]
fn test_vehicle_equality_is_structural() {
    let a = sample_vehicle();
    let mut b = sample_vehicle();
    assert_eq!(a, b);

    b.year = 2004;
    assert_ne!(a, b);
    assert_eq!(a.id(), b.id());
}

// ============================================================================
// ImageText Serde Tests
// ============================================================================

#[test]
fn test_image_text_array_ignores_bounding_boxes() {
    let json = r#"[
        {"text": "VIN", "bounding_box": {"x1": 1, "y1": 2, "x2": 3, "y2": 4}},
        {"text": "1HGCM82633A123456", "bounding_box": {"x1": 5, "y1": 6, "x2": 7, "y2": 8}}
    ]"#;

    let texts: Vec<ImageText> = serde_json::from_str(json).unwrap();
    assert_eq!(
        texts,
        vec![ImageText::new("VIN"), ImageText::new("1HGCM82633A123456")]
    );
}

#[test]
fn test_image_text_empty_array() {
    let texts: Vec<ImageText> = serde_json::from_str("[]").unwrap();
    assert!(texts.is_empty());
}

// ============================================================================
// RecentSearch Serde Tests
// ============================================================================

#[test]
fn test_recent_search_iso8601_date() {
    let json = r#"{"vehicle":{"wmi":"WMI","vin":"VIN1234567890VIN0","country":"Japan","vis":"VIS","vds":"VDS","year":2024,"region":"Asia"},"date":"2024-11-08T09:02:00Z"}"#;

    let search: RecentSearch = serde_json::from_str(json).unwrap();
    assert_eq!(search.id(), "VIN1234567890VIN0");
    assert_eq!(search.date, Utc.with_ymd_and_hms(2024, 11, 8, 9, 2, 0).unwrap());
}

#[test]
fn test_recent_search_roundtrip() {
    let search = RecentSearch::new(
        sample_vehicle(),
        Utc.with_ymd_and_hms(2024, 11, 9, 10, 1, 1).unwrap(),
    );

    let json = serde_json::to_string(&search).unwrap();
    assert!(json.contains("\"date\":\"2024-11-09T10:01:01Z\""));

    let parsed: RecentSearch = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, search);
}
