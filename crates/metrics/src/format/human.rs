//! Human-readable metrics formatter
//!
//! # Example Output
//!
//! ```text
//! [metrics] destinations: 2 | requests: 1.2K | errors: 3
//! [metrics] http://downstream/legendary: 1.1K req | 3 err (0.27%) | 120.4 KB in | 310.0 KB out | 14.20ms avg
//! [metrics] __unmatched__: 52 req | 0 err (0%) | 5.1 KB in | 0 B out | 0.00ms avg
//! ```

use std::fmt::Write;

use super::{SnapshotFormatter, format_bytes, format_count};
use crate::MetricsSnapshot;

/// Human-readable metrics formatter
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter;

impl HumanFormatter {
    /// Create a new human formatter
    pub fn new() -> Self {
        Self
    }
}

impl SnapshotFormatter for HumanFormatter {
    fn format(&self, snapshot: &MetricsSnapshot) -> String {
        let mut output = format!(
            "[metrics] destinations: {} | requests: {} | errors: {}",
            snapshot.len(),
            format_count(snapshot.total_requests()),
            format_count(snapshot.total_errors()),
        );

        for (dest, snap) in snapshot.iter() {
            let _ = write!(
                output,
                "\n[metrics] {}: {} req | {} err ({}%) | {} in | {} out | {:.2}ms avg",
                dest,
                format_count(snap.request_count),
                format_count(snap.error_count),
                snap.error_rate_percent,
                format_bytes(snap.incoming_bytes),
                format_bytes(snap.outgoing_bytes),
                snap.avg_response_time_ms,
            );
        }

        output
    }
}
