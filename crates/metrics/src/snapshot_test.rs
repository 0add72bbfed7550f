//! Tests for snapshots, formatters and the reporter

use std::sync::Arc;
use std::time::Duration;

use pokeproxy_config::{MetricsConfig, MetricsFormat};
use tokio_util::sync::CancellationToken;

use crate::{
    DestinationMetrics, HumanFormatter, JsonFormatter, MetricsReporter, SnapshotFormatter,
    UNMATCHED_DESTINATION,
};

fn populated() -> DestinationMetrics {
    let metrics = DestinationMetrics::new(10);
    metrics.record("http://downstream/legendary", 100, 300, 10.0, false);
    metrics.record("http://downstream/legendary", 100, 300, 20.0, true);
    metrics.record("http://downstream/legendary", 100, 300, 10.0, false);
    metrics.record(UNMATCHED_DESTINATION, 50, 0, 0.0, false);
    metrics
}

// =============================================================================
// Snapshot tests
// =============================================================================

#[test]
fn test_snapshot_rounds_to_two_decimals() {
    let snapshot = populated().snapshot();
    let legendary = snapshot.get("http://downstream/legendary").unwrap();

    assert_eq!(legendary.error_rate_percent, 33.33);
    assert_eq!(legendary.avg_response_time_ms, 13.33);
}

#[test]
fn test_snapshot_rounds_halves_to_even() {
    let metrics = DestinationMetrics::new(10);
    metrics.record("http://a", 1, 1, 0.125, false);
    metrics.record("http://b", 1, 1, 0.375, false);

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.get("http://a").unwrap().avg_response_time_ms, 0.12);
    assert_eq!(snapshot.get("http://b").unwrap().avg_response_time_ms, 0.38);
}

#[test]
fn test_snapshot_totals() {
    let snapshot = populated().snapshot();
    assert_eq!(snapshot.total_requests(), 4);
    assert_eq!(snapshot.total_errors(), 1);
}

#[test]
fn test_snapshot_is_point_in_time() {
    let metrics = populated();
    let before = metrics.snapshot();
    metrics.record("http://new", 1, 1, 1.0, false);

    assert_eq!(before.len(), 2);
    assert_eq!(metrics.snapshot().len(), 3);
}

#[test]
fn test_snapshot_serializes_as_ordered_object() {
    let json = serde_json::to_string(&populated().snapshot()).unwrap();

    let legendary = json.find("http://downstream/legendary").unwrap();
    let unmatched = json.find(UNMATCHED_DESTINATION).unwrap();
    assert!(legendary < unmatched);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value[UNMATCHED_DESTINATION],
        serde_json::json!({
            "request_count": 1,
            "error_count": 0,
            "error_rate_percent": 0.0,
            "incoming_bytes": 50,
            "outgoing_bytes": 0,
            "avg_response_time_ms": 0.0
        })
    );
}

#[test]
fn test_empty_snapshot_serializes_as_empty_object() {
    let json = serde_json::to_string(&DestinationMetrics::new(1).snapshot()).unwrap();
    assert_eq!(json, "{}");
}

// =============================================================================
// Formatter tests
// =============================================================================

#[test]
fn test_human_formatter() {
    let output = HumanFormatter::new().format(&populated().snapshot());
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "[metrics] destinations: 2 | requests: 4 | errors: 1");
    assert!(lines[1].starts_with("[metrics] http://downstream/legendary: 3 req | 1 err (33.33%)"));
    assert!(lines[1].ends_with("13.33ms avg"));
    assert!(lines[2].contains("__unmatched__: 1 req | 0 err (0%) | 50 B in | 0 B out"));
}

#[test]
fn test_json_formatter() {
    let output = JsonFormatter::new().format(&populated().snapshot());
    assert_eq!(output.lines().count(), 1);

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["type"], "destinations");
    assert_eq!(value["total_requests"], 4);
    assert_eq!(value["destinations"][UNMATCHED_DESTINATION]["incoming_bytes"], 50);
}

// =============================================================================
// Reporter tests
// =============================================================================

#[test]
fn test_reporter_renders_with_configured_format() {
    let metrics = Arc::new(populated());
    let config = MetricsConfig {
        format: MetricsFormat::Json,
        ..Default::default()
    };

    let output = MetricsReporter::new(metrics, config).render();
    assert!(output.starts_with(r#"{"type":"destinations""#));
}

#[tokio::test]
async fn test_reporter_disabled_returns_immediately() {
    let config = MetricsConfig {
        report: false,
        ..Default::default()
    };
    let reporter = MetricsReporter::new(Arc::new(populated()), config);

    tokio::time::timeout(Duration::from_secs(1), reporter.run(CancellationToken::new()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_reporter_stops_on_cancel() {
    let config = MetricsConfig {
        report: true,
        interval: Duration::from_millis(10),
        ..Default::default()
    };
    let reporter = MetricsReporter::new(Arc::new(populated()), config);

    let cancel = CancellationToken::new();
    let handle = tokio::spawn(reporter.run(cancel.clone()));

    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();

    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .unwrap()
        .unwrap();
}
