//! Bounded LRU metrics store
//!
//! # Design
//!
//! - `HashMap<String, Entry>` holds the counters
//! - `BTreeMap<tick, String>` orders destinations by last access
//! - Every `record()` bumps a monotonically increasing tick; the smallest
//!   tick is the least recently used destination
//!
//! Both maps live under one mutex, so an update and its reordering are a
//! single atomic step from the point of view of concurrent requests.

use std::collections::{BTreeMap, HashMap};

use parking_lot::Mutex;

use crate::DEFAULT_MAX_DESTINATIONS;
use crate::snapshot::{DestinationSnapshot, MetricsSnapshot};

/// Raw counters for one destination
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DestinationCounters {
    /// Requests recorded
    pub request_count: u64,
    /// Requests that failed or got a status >= 400
    pub error_count: u64,
    /// Inbound body bytes
    pub incoming_bytes: u64,
    /// Outbound payload bytes
    pub outgoing_bytes: u64,
    /// Sum of response times in milliseconds
    pub total_response_time_ms: f64,
}

impl DestinationCounters {
    /// Error rate in percent, 0 when nothing was recorded
    pub fn error_rate_percent(&self) -> f64 {
        if self.request_count == 0 {
            0.0
        } else {
            self.error_count as f64 / self.request_count as f64 * 100.0
        }
    }

    /// Mean response time in milliseconds, 0 when nothing was recorded
    pub fn avg_response_time_ms(&self) -> f64 {
        if self.request_count == 0 {
            0.0
        } else {
            self.total_response_time_ms / self.request_count as f64
        }
    }

    fn accumulate(&mut self, incoming: u64, outgoing: u64, elapsed_ms: f64, is_error: bool) {
        self.request_count += 1;
        self.incoming_bytes += incoming;
        self.outgoing_bytes += outgoing;
        self.total_response_time_ms += elapsed_ms;
        if is_error {
            self.error_count += 1;
        }
    }
}

#[derive(Debug)]
struct Entry {
    counters: DestinationCounters,
    tick: u64,
}

#[derive(Debug, Default)]
struct StoreInner {
    entries: HashMap<String, Entry>,
    order: BTreeMap<u64, String>,
    tick: u64,
}

/// Thread-safe per-destination metrics with LRU eviction
///
/// Holds at most `capacity` destinations. Recording to an unseen destination
/// when full evicts the destination that was recorded to least recently.
#[derive(Debug)]
pub struct DestinationMetrics {
    inner: Mutex<StoreInner>,
    capacity: usize,
}

impl Default for DestinationMetrics {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DESTINATIONS)
    }
}

impl DestinationMetrics {
    /// Create a store bounded to `capacity` destinations (minimum 1)
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(StoreInner {
                entries: HashMap::with_capacity(capacity.min(1024)),
                ..Default::default()
            }),
            capacity,
        }
    }

    /// Record one request against a destination
    ///
    /// Creates the entry if needed (evicting the least recently used one when
    /// full), accumulates the counters and marks the destination most
    /// recently used.
    pub fn record(
        &self,
        destination: &str,
        incoming_bytes: u64,
        outgoing_bytes: u64,
        elapsed_ms: f64,
        is_error: bool,
    ) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        inner.tick += 1;
        let tick = inner.tick;

        if let Some(entry) = inner.entries.get_mut(destination) {
            // Move to the most recently used position, reusing the key
            if let Some(key) = inner.order.remove(&entry.tick) {
                inner.order.insert(tick, key);
            }
            entry.tick = tick;
            entry
                .counters
                .accumulate(incoming_bytes, outgoing_bytes, elapsed_ms, is_error);
            return;
        }

        if inner.entries.len() >= self.capacity
            && let Some((_, oldest)) = inner.order.pop_first()
        {
            inner.entries.remove(&oldest);
        }

        let mut counters = DestinationCounters::default();
        counters.accumulate(incoming_bytes, outgoing_bytes, elapsed_ms, is_error);

        inner
            .entries
            .insert(destination.to_owned(), Entry { counters, tick });
        inner.order.insert(tick, destination.to_owned());
    }

    /// Point-in-time copy of every destination, least recently used first
    pub fn snapshot(&self) -> MetricsSnapshot {
        let inner = self.inner.lock();

        let entries = inner
            .order
            .values()
            .filter_map(|dest| {
                inner
                    .entries
                    .get(dest)
                    .map(|entry| (dest.clone(), DestinationSnapshot::from(&entry.counters)))
            })
            .collect();

        MetricsSnapshot::new(entries)
    }

    /// Raw counters for one destination, without touching its recency
    pub fn counters(&self, destination: &str) -> Option<DestinationCounters> {
        self.inner
            .lock()
            .entries
            .get(destination)
            .map(|entry| entry.counters)
    }

    /// Number of tracked destinations
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Check if no destination has been recorded
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of tracked destinations
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
