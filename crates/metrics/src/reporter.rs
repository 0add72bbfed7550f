//! Periodic metrics reporter
//!
//! Logs a destination snapshot at the configured interval via tracing.
//! Runs as an async task until cancelled.

use std::sync::Arc;

use pokeproxy_config::MetricsConfig;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::DestinationMetrics;
use crate::format::{SnapshotFormatter, formatter_for};

/// Reports the metrics store periodically
pub struct MetricsReporter {
    config: MetricsConfig,
    formatter: Box<dyn SnapshotFormatter>,
    metrics: Arc<DestinationMetrics>,
}

impl MetricsReporter {
    /// Create a reporter for the given store
    pub fn new(metrics: Arc<DestinationMetrics>, config: MetricsConfig) -> Self {
        Self {
            formatter: formatter_for(config.format),
            config,
            metrics,
        }
    }

    /// Run the reporter until cancellation
    ///
    /// Returns immediately when reporting is disabled.
    pub async fn run(self, cancel: CancellationToken) {
        if !self.config.report {
            info!("metrics reporting disabled");
            return;
        }

        let mut ticker = interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; skip it so the first report
        // covers a full interval
        ticker.tick().await;

        info!(
            interval_secs = self.config.interval.as_secs(),
            format = ?self.config.format,
            "metrics reporter started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("metrics reporter shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    self.report();
                }
            }
        }
    }

    /// Format and log the current snapshot once
    pub fn report(&self) {
        let output = self.render();
        for line in output.lines() {
            info!("{}", line);
        }
    }

    /// Format the current snapshot without logging it
    pub fn render(&self) -> String {
        self.formatter.format(&self.metrics.snapshot())
    }
}
