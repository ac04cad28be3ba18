//! Integration tests for the feed -> report pipeline.
//!
//! Uses a MockSource that serves canned payloads, so these tests never touch
//! the network.

use std::collections::HashMap;

use vayu_core::classify::canonical;
use vayu_core::error::VayuError;
use vayu_core::rankings::{self, builtin::load_dataset};
use vayu_core::source::{FeedSource, StationQuery};
use vayu_core::{fetch_reports, report_feed_json, resolve_pollutant, Classifier, FormatOptions};

struct MockSource {
    payloads: HashMap<String, String>,
}

impl MockSource {
    fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            payloads: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl FeedSource for MockSource {
    fn fetch_feed(&self, query: &StationQuery) -> Result<String, VayuError> {
        self.payloads
            .get(&query.path_segment())
            .cloned()
            .ok_or_else(|| VayuError::Http {
                status: 404,
                url: format!("mock://feed/{query}/"),
            })
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

const DELHI: &str = r#"{
    "status": "ok",
    "data": {
        "aqi": 142,
        "iaqi": { "pm25": { "v": 88 }, "no2": { "v": 21 } },
        "city": { "name": "Delhi" },
        "time": { "v": 1700000000 }
    }
}"#;

const SILENT: &str = r#"{
    "status": "ok",
    "data": { "aqi": "-", "city": { "name": "Silent Station" }, "time": { "v": 0 } }
}"#;

const UNKNOWN_STATION: &str = r#"{ "status": "error", "data": "Unknown station" }"#;

// ---------------------------------------------------------------------------
// Test 1: Delhi payload renders tier, pollutant rows and a real timestamp
// ---------------------------------------------------------------------------
#[test]
fn delhi_payload_renders_card() {
    let report = report_feed_json(DELHI, canonical(), &FormatOptions::default()).unwrap();

    assert_eq!(report.station, "Delhi");
    assert_eq!(report.tier.label, "Unhealthy for Sensitive Groups");
    assert_eq!(report.tier.color, "#FF9800");

    let lines: Vec<&str> = report.pollutants.iter().map(|p| p.line.as_str()).collect();
    assert_eq!(lines, vec!["PM2.5: 88 µg/m³", "NO₂: 21 ppb"]);

    assert_ne!(report.updated, "Unknown");
    assert_eq!(report.updated, "2023-11-14 22:13");
    assert!((report.gauge_fraction - 142.0 / 300.0).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Test 2: Station with no active sensor renders as No Data
// ---------------------------------------------------------------------------
#[test]
fn station_without_sensor_is_no_data() {
    let report = report_feed_json(SILENT, canonical(), &FormatOptions::default()).unwrap();

    assert_eq!(report.tier.label, "No Data");
    assert_eq!(report.gauge_fraction, 0.0);
    assert_eq!(report.updated, "Unknown");
    assert!(report.pollutants.is_empty());
}

// ---------------------------------------------------------------------------
// Test 3: Error status from the API surfaces the upstream message
// ---------------------------------------------------------------------------
#[test]
fn error_status_is_reported() {
    let err = report_feed_json(UNKNOWN_STATION, canonical(), &FormatOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("Unknown station"));
}

// ---------------------------------------------------------------------------
// Test 4: Batch fetch keeps order and isolates each failure
// ---------------------------------------------------------------------------
#[test]
fn batch_fetch_isolates_failures() {
    let source = MockSource::new(&[
        ("Delhi", DELHI),
        ("@9999", SILENT),
        ("Atlantis", UNKNOWN_STATION),
    ]);
    let queries = vec![
        StationQuery::City("Delhi".into()),
        StationQuery::City("Atlantis".into()),
        StationQuery::Station("9999".into()),
        StationQuery::City("Mumbai".into()),
    ];

    let outcomes = fetch_reports(&source, &queries, canonical(), &FormatOptions::default(), 2);

    assert_eq!(outcomes.len(), 4);
    assert_eq!(outcomes[0].query, "Delhi");
    assert_eq!(
        outcomes[0].result.as_ref().unwrap().tier.label,
        "Unhealthy for Sensitive Groups"
    );
    assert!(outcomes[1].result.as_ref().unwrap_err().contains("Unknown station"));
    assert_eq!(outcomes[2].result.as_ref().unwrap().tier.label, "No Data");
    assert!(outcomes[3].result.as_ref().unwrap_err().contains("404"));
}

// ---------------------------------------------------------------------------
// Test 5: The compact scale changes labels but not the pipeline
// ---------------------------------------------------------------------------
#[test]
fn compact_scale_relabels_report() {
    let compact = Classifier::from_preset("compact").unwrap();
    let report = report_feed_json(DELHI, &compact, &FormatOptions::default()).unwrap();
    assert_eq!(report.tier.label, "Unhealthy");
}

// ---------------------------------------------------------------------------
// Test 6: Station offset and custom pattern are honoured
// ---------------------------------------------------------------------------
#[test]
fn station_timezone_is_used() {
    let payload = DELHI.replace(
        r#""time": { "v": 1700000000 }"#,
        r#""time": { "v": 1700000000, "tz": "+05:30" }"#,
    );
    let opts = FormatOptions {
        pattern: "%H:%M".into(),
        ..FormatOptions::default()
    };
    let report = report_feed_json(&payload, canonical(), &opts).unwrap();
    assert_eq!(report.updated, "03:43");
}

// ---------------------------------------------------------------------------
// Test 7: Report serialises with the sentinel for missing AQI
// ---------------------------------------------------------------------------
#[test]
fn report_json_uses_dash_for_missing_aqi() {
    let report = report_feed_json(SILENT, canonical(), &FormatOptions::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["aqi"], "-");
    assert_eq!(json["tier"]["label"], "No Data");
}

// ---------------------------------------------------------------------------
// Test 8: Resolver and classifier are total over odd inputs
// ---------------------------------------------------------------------------
#[test]
fn core_functions_never_fail() {
    for x in [f64::NAN, -1e9, -0.5, 0.0, 1e308, f64::INFINITY] {
        let tier = vayu_core::classify(x);
        assert!(!tier.label.is_empty());
        let g = vayu_core::gauge_fraction(x);
        assert!((0.0..=1.0).contains(&g));
    }
    assert_eq!(resolve_pollutant("xyz123").display_name, "xyz123");
    assert_eq!(resolve_pollutant("xyz123").unit, "");
}

// ---------------------------------------------------------------------------
// Test 9: Bundled 2024 rankings classify end to end
// ---------------------------------------------------------------------------
#[test]
fn bundled_rankings_classify() {
    let ds = load_dataset("aqi-2024").unwrap();
    let rows = rankings::classify_dataset(&ds, canonical());

    assert_eq!(rows.len(), 45);
    assert_eq!(rows[0].city, "New Delhi, India");
    assert_eq!(rows[0].tier_label, "Unhealthy");
    assert_eq!(rows[0].peak_month, "Nov");
    assert_eq!(rows[0].peak_tier_label, "Very Unhealthy");
    assert!(rows.iter().all(|r| r.tier_label != "No Data"));
}
