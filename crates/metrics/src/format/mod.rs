//! Metrics output formatters
//!
//! Formats destination snapshots for human-readable or JSON log output.

mod human;
mod json;

pub use human::HumanFormatter;
pub use json::JsonFormatter;

use pokeproxy_config::MetricsFormat;

use crate::MetricsSnapshot;

/// Trait for snapshot formatters
pub trait SnapshotFormatter: Send + Sync {
    /// Format a snapshot; may return several lines
    fn format(&self, snapshot: &MetricsSnapshot) -> String;
}

/// Build the formatter selected in configuration
pub fn formatter_for(format: MetricsFormat) -> Box<dyn SnapshotFormatter> {
    match format {
        MetricsFormat::Human => Box::new(HumanFormatter::new()),
        MetricsFormat::Json => Box::new(JsonFormatter::new()),
    }
}

/// Format bytes in human-readable form (KB, MB, GB)
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    const GB: u64 = 1024 * 1024 * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format count with K/M suffix for readability
pub fn format_count(count: u64) -> String {
    const K: u64 = 1000;
    const M: u64 = 1_000_000;

    if count >= M {
        format!("{:.1}M", count as f64 / M as f64)
    } else if count >= K {
        format!("{:.1}K", count as f64 / K as f64)
    } else {
        count.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.0 MB");
        assert_eq!(format_bytes(1536 * 1024 * 1024), "1.5 GB");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1500), "1.5K");
        assert_eq!(format_count(2_000_000), "2.0M");
    }
}
