//! PokeProxy - Metrics
//!
//! Per-destination traffic and latency accounting.
//!
//! # Overview
//!
//! This crate provides:
//! - `DestinationMetrics` - Bounded LRU store of counters keyed by destination
//! - `MetricsSnapshot` - Point-in-time copy served by `GET /stats`
//! - `MetricsReporter` - Optional task that logs snapshots periodically
//! - Human and JSON formatters for the reporter
//!
//! # Design Principles
//!
//! - **Bounded**: At most `capacity` destinations, least recently used evicted
//! - **Single lock**: One `parking_lot::Mutex`, never held across `.await`
//! - **Injected**: The store is built by the caller and shared through `Arc`
//!
//! # Example
//!
//! ```
//! use pokeproxy_metrics::{DestinationMetrics, UNMATCHED_DESTINATION};
//!
//! let metrics = DestinationMetrics::new(1000);
//! metrics.record("http://downstream/legendary", 42, 120, 12.5, false);
//! metrics.record(UNMATCHED_DESTINATION, 17, 0, 0.0, false);
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.len(), 2);
//! assert_eq!(snapshot.get(UNMATCHED_DESTINATION).unwrap().outgoing_bytes, 0);
//! ```

pub mod format;
mod reporter;
mod snapshot;
mod store;

#[cfg(test)]
mod snapshot_test;
#[cfg(test)]
mod store_test;

pub use format::{HumanFormatter, JsonFormatter, SnapshotFormatter};
pub use reporter::MetricsReporter;
pub use snapshot::{DestinationSnapshot, MetricsSnapshot};
pub use store::{DestinationCounters, DestinationMetrics};

/// Destination key used when no rule matched
pub const UNMATCHED_DESTINATION: &str = "__unmatched__";

/// Default maximum number of tracked destinations
pub const DEFAULT_MAX_DESTINATIONS: usize = 1000;

/// Round to two decimal places, halves to even
#[inline]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
