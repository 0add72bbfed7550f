//! JSON metrics formatter
//!
//! Formats metrics as a single structured JSON line for machine parsing.
//!
//! # Example Output
//!
//! ```json
//! {"type":"destinations","total_requests":57,"total_errors":1,"destinations":{"http://a":{...}}}
//! ```

use serde::Serialize;

use super::SnapshotFormatter;
use crate::MetricsSnapshot;

/// JSON metrics formatter
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

#[derive(Serialize)]
struct ReportJson<'a> {
    #[serde(rename = "type")]
    report_type: &'static str,
    total_requests: u64,
    total_errors: u64,
    destinations: &'a MetricsSnapshot,
}

impl SnapshotFormatter for JsonFormatter {
    fn format(&self, snapshot: &MetricsSnapshot) -> String {
        let report = ReportJson {
            report_type: "destinations",
            total_requests: snapshot.total_requests(),
            total_errors: snapshot.total_errors(),
            destinations: snapshot,
        };

        serde_json::to_string(&report).unwrap_or_else(|e| format!(r#"{{"error":"{e}"}}"#))
    }
}
