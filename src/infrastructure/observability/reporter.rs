//! Push-based metrics reporter
//!
//! Periodically outputs metrics as structured JSON to stdout.

use crate::infrastructure::observability::metrics::{Metrics, PredictionOutcome};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Metrics snapshot for JSON output
#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub model_loaded: bool,
    pub predictions: PredictionSnapshot,
}

#[derive(Serialize)]
pub struct PredictionSnapshot {
    pub success: u64,
    pub client_error: u64,
    pub server_error: u64,
    pub mean_latency_ms: f64,
}

/// Push-based metrics reporter
///
/// Outputs metrics as structured JSON logs on a configurable interval.
/// No HTTP route, no incoming connections - only outbound data.
pub struct MetricsReporter {
    metrics: Metrics,
    start_time: Instant,
    interval: Duration,
}

impl MetricsReporter {
    pub fn new(metrics: Metrics, interval_seconds: u64) -> Self {
        Self {
            metrics,
            start_time: Instant::now(),
            interval: Duration::from_secs(interval_seconds.max(1)),
        }
    }

    /// Run the reporter in a loop, outputting metrics periodically
    pub async fn run(self) {
        info!(
            "MetricsReporter: Starting push-based metrics (interval: {:?})",
            self.interval
        );

        loop {
            tokio::time::sleep(self.interval).await;

            let snapshot = self.collect_snapshot();
            match serde_json::to_string(&snapshot) {
                Ok(json) => {
                    // Use a special prefix so logs can be easily filtered
                    println!("METRICS_JSON:{}", json);
                    info!(
                        "Predictions: {} ok | {} rejected | {} failed | Uptime: {}s",
                        snapshot.predictions.success,
                        snapshot.predictions.client_error,
                        snapshot.predictions.server_error,
                        snapshot.uptime_seconds
                    );
                }
                Err(e) => warn!("Failed to serialize metrics: {}", e),
            }
        }
    }

    fn collect_snapshot(&self) -> MetricsSnapshot {
        let uptime = self.start_time.elapsed().as_secs();
        self.metrics.uptime_seconds.set(uptime as f64);

        let latency = &self.metrics.prediction_latency_seconds;
        let count = latency.get_sample_count();
        let mean_latency_ms = if count > 0 {
            latency.get_sample_sum() / count as f64 * 1000.0
        } else {
            0.0
        };

        MetricsSnapshot {
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_seconds: uptime,
            version: env!("CARGO_PKG_VERSION").to_string(),
            model_loaded: self.metrics.model_loaded.get() > 0.0,
            predictions: PredictionSnapshot {
                success: self.metrics.predictions(PredictionOutcome::Success),
                client_error: self.metrics.predictions(PredictionOutcome::ClientError),
                server_error: self.metrics.predictions(PredictionOutcome::ServerError),
                mean_latency_ms,
            },
        }
    }
}
