//! Tests for DestinationMetrics
//!
//! Tests cover accumulation, derived values, LRU eviction and concurrent
//! recording.

use std::sync::Arc;

use crate::{DEFAULT_MAX_DESTINATIONS, DestinationMetrics, UNMATCHED_DESTINATION};

// =============================================================================
// Basic store tests
// =============================================================================

#[test]
fn test_new_store_is_empty() {
    let metrics = DestinationMetrics::new(10);
    assert!(metrics.is_empty());
    assert_eq!(metrics.capacity(), 10);
    assert!(metrics.snapshot().is_empty());
}

#[test]
fn test_default_capacity() {
    let metrics = DestinationMetrics::default();
    assert_eq!(metrics.capacity(), DEFAULT_MAX_DESTINATIONS);
}

#[test]
fn test_zero_capacity_is_clamped() {
    let metrics = DestinationMetrics::new(0);
    assert_eq!(metrics.capacity(), 1);

    metrics.record("http://a", 1, 1, 1.0, false);
    assert_eq!(metrics.len(), 1);
}

// =============================================================================
// Accumulation tests
// =============================================================================

#[test]
fn test_first_record_creates_entry() {
    let metrics = DestinationMetrics::new(10);
    metrics.record("http://a", 100, 250, 12.5, false);

    let c = metrics.counters("http://a").unwrap();
    assert_eq!(c.request_count, 1);
    assert_eq!(c.error_count, 0);
    assert_eq!(c.incoming_bytes, 100);
    assert_eq!(c.outgoing_bytes, 250);
    assert_eq!(c.total_response_time_ms, 12.5);
}

#[test]
fn test_counters_accumulate() {
    let metrics = DestinationMetrics::new(10);
    metrics.record("http://a", 100, 200, 10.0, false);
    metrics.record("http://a", 50, 70, 30.0, true);

    let c = metrics.counters("http://a").unwrap();
    assert_eq!(c.request_count, 2);
    assert_eq!(c.error_count, 1);
    assert_eq!(c.incoming_bytes, 150);
    assert_eq!(c.outgoing_bytes, 270);
    assert_eq!(c.avg_response_time_ms(), 20.0);
    assert_eq!(c.error_rate_percent(), 50.0);
}

#[test]
fn test_error_rate_five_requests_one_error() {
    let metrics = DestinationMetrics::new(10);
    for i in 0..5 {
        metrics.record("http://a", 10, 10, 1.0, i == 2);
    }

    let snapshot = metrics.snapshot();
    let a = snapshot.get("http://a").unwrap();
    assert_eq!(a.request_count, 5);
    assert_eq!(a.error_count, 1);
    assert_eq!(a.error_rate_percent, 20.0);
}

#[test]
fn test_derived_values_zero_without_requests() {
    let c = crate::DestinationCounters::default();
    assert_eq!(c.error_rate_percent(), 0.0);
    assert_eq!(c.avg_response_time_ms(), 0.0);
}

#[test]
fn test_unmatched_sentinel_entry() {
    let metrics = DestinationMetrics::new(10);
    metrics.record(UNMATCHED_DESTINATION, 42, 0, 0.0, false);

    let snapshot = metrics.snapshot();
    let unmatched = snapshot.get(UNMATCHED_DESTINATION).unwrap();
    assert_eq!(unmatched.request_count, 1);
    assert_eq!(unmatched.incoming_bytes, 42);
    assert_eq!(unmatched.outgoing_bytes, 0);
    assert_eq!(unmatched.avg_response_time_ms, 0.0);
}

// =============================================================================
// LRU tests
// =============================================================================

#[test]
fn test_capacity_is_never_exceeded() {
    let metrics = DestinationMetrics::new(3);
    for i in 0..10 {
        metrics.record(&format!("http://d{i}"), 1, 1, 1.0, false);
        assert!(metrics.len() <= 3);
    }

    let snapshot = metrics.snapshot();
    let dests: Vec<&str> = snapshot.destinations().collect();
    assert_eq!(dests, ["http://d7", "http://d8", "http://d9"]);
}

#[test]
fn test_record_refreshes_recency() {
    let metrics = DestinationMetrics::new(2);
    metrics.record("http://a", 1, 1, 1.0, false);
    metrics.record("http://b", 1, 1, 1.0, false);

    // Touch a, so b becomes least recently used
    metrics.record("http://a", 1, 1, 1.0, false);
    metrics.record("http://c", 1, 1, 1.0, false);

    assert!(metrics.counters("http://a").is_some());
    assert!(metrics.counters("http://b").is_none());
    assert!(metrics.counters("http://c").is_some());
    assert_eq!(metrics.counters("http://a").unwrap().request_count, 2);
}

#[test]
fn test_snapshot_order_is_lru_to_mru() {
    let metrics = DestinationMetrics::new(10);
    metrics.record("http://a", 1, 1, 1.0, false);
    metrics.record("http://b", 1, 1, 1.0, false);
    metrics.record("http://c", 1, 1, 1.0, false);
    metrics.record("http://a", 1, 1, 1.0, false);

    let snapshot = metrics.snapshot();
    let dests: Vec<&str> = snapshot.destinations().collect();
    assert_eq!(dests, ["http://b", "http://c", "http://a"]);
}

#[test]
fn test_evicted_destination_starts_fresh() {
    let metrics = DestinationMetrics::new(1);
    metrics.record("http://a", 5, 5, 5.0, true);
    metrics.record("http://b", 1, 1, 1.0, false);
    metrics.record("http://a", 1, 1, 1.0, false);

    let a = metrics.counters("http://a").unwrap();
    assert_eq!(a.request_count, 1);
    assert_eq!(a.error_count, 0);
}

#[test]
fn test_snapshot_and_counters_do_not_touch_recency() {
    let metrics = DestinationMetrics::new(2);
    metrics.record("http://a", 1, 1, 1.0, false);
    metrics.record("http://b", 1, 1, 1.0, false);

    let _ = metrics.snapshot();
    let _ = metrics.counters("http://a");
    metrics.record("http://c", 1, 1, 1.0, false);

    assert!(metrics.counters("http://a").is_none());
}

// =============================================================================
// Concurrency tests
// =============================================================================

#[test]
fn test_concurrent_records_are_not_lost() {
    let metrics = Arc::new(DestinationMetrics::new(100));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let metrics = Arc::clone(&metrics);
            std::thread::spawn(move || {
                for i in 0..500 {
                    metrics.record("http://shared", 2, 3, 1.0, i % 10 == 0);
                    metrics.record(&format!("http://t{t}"), 1, 0, 0.5, false);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let shared = metrics.counters("http://shared").unwrap();
    assert_eq!(shared.request_count, 4000);
    assert_eq!(shared.error_count, 400);
    assert_eq!(shared.incoming_bytes, 8000);
    assert_eq!(shared.outgoing_bytes, 12000);
    assert_eq!(metrics.len(), 9);
}

#[test]
fn test_concurrent_eviction_respects_capacity() {
    let metrics = Arc::new(DestinationMetrics::new(16));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let metrics = Arc::clone(&metrics);
            std::thread::spawn(move || {
                for i in 0..200 {
                    metrics.record(&format!("http://t{t}/{i}"), 1, 1, 1.0, false);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(metrics.len(), 16);
    assert_eq!(metrics.snapshot().len(), 16);
}
