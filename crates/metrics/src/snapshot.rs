//! Metrics snapshots
//!
//! Serialized shape (`GET /stats`):
//!
//! ```json
//! {
//!   "http://downstream/legendary": {
//!     "request_count": 5,
//!     "error_count": 1,
//!     "error_rate_percent": 20.0,
//!     "incoming_bytes": 210,
//!     "outgoing_bytes": 1400,
//!     "avg_response_time_ms": 12.34
//!   }
//! }
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::round2;
use crate::store::DestinationCounters;

/// Snapshot of one destination with derived values rounded to 2 decimals
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct DestinationSnapshot {
    pub request_count: u64,
    pub error_count: u64,
    pub error_rate_percent: f64,
    pub incoming_bytes: u64,
    pub outgoing_bytes: u64,
    pub avg_response_time_ms: f64,
}

impl From<&DestinationCounters> for DestinationSnapshot {
    fn from(c: &DestinationCounters) -> Self {
        Self {
            request_count: c.request_count,
            error_count: c.error_count,
            error_rate_percent: round2(c.error_rate_percent()),
            incoming_bytes: c.incoming_bytes,
            outgoing_bytes: c.outgoing_bytes,
            avg_response_time_ms: round2(c.avg_response_time_ms()),
        }
    }
}

/// Ordered snapshot of all destinations, least recently used first
///
/// Serializes as a JSON object keyed by destination, in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    entries: Vec<(String, DestinationSnapshot)>,
}

impl MetricsSnapshot {
    pub(crate) fn new(entries: Vec<(String, DestinationSnapshot)>) -> Self {
        Self { entries }
    }

    /// Look up one destination
    pub fn get(&self, destination: &str) -> Option<&DestinationSnapshot> {
        self.entries
            .iter()
            .find(|(dest, _)| dest == destination)
            .map(|(_, snap)| snap)
    }

    /// Destinations in order, least recently used first
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(dest, _)| dest.as_str())
    }

    /// Iterate over `(destination, snapshot)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DestinationSnapshot)> {
        self.entries.iter().map(|(dest, snap)| (dest.as_str(), snap))
    }

    /// Number of destinations
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the snapshot is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total requests across destinations
    pub fn total_requests(&self) -> u64 {
        self.entries.iter().map(|(_, s)| s.request_count).sum()
    }

    /// Total errors across destinations
    pub fn total_errors(&self) -> u64 {
        self.entries.iter().map(|(_, s)| s.error_count).sum()
    }
}

impl Serialize for MetricsSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (dest, snap) in &self.entries {
            map.serialize_entry(dest, snap)?;
        }
        map.end()
    }
}
