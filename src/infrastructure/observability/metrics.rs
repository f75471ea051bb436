//! Prometheus metrics definitions for the prediction server
//!
//! All metrics use the `coffee_revenue_` prefix.

use prometheus::{
    CounterVec, Gauge, Histogram, HistogramOpts, Opts,
    core::{AtomicF64, GenericGauge},
};
use std::time::Duration;

/// Label values for `predictions_total`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionOutcome {
    Success,
    ClientError,
    ServerError,
}

impl PredictionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionOutcome::Success => "success",
            PredictionOutcome::ClientError => "client_error",
            PredictionOutcome::ServerError => "server_error",
        }
    }
}

/// Prometheus metrics for the prediction server
#[derive(Clone)]
pub struct Metrics {
    /// Prediction requests by outcome
    pub predictions_total: CounterVec,
    /// Time spent validating and running inference
    pub prediction_latency_seconds: Histogram,
    /// Whether the model artifact loaded (0=failed, 1=loaded)
    pub model_loaded: GenericGauge<AtomicF64>,
    /// Uptime in seconds
    pub uptime_seconds: GenericGauge<AtomicF64>,
}

impl Metrics {
    /// Create a new Metrics instance with all gauges and counters
    pub fn new() -> anyhow::Result<Self> {
        let predictions_total = CounterVec::new(
            Opts::new(
                "coffee_revenue_predictions_total",
                "Prediction requests by outcome",
            ),
            &["outcome"],
        )?;

        let prediction_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "coffee_revenue_prediction_latency_seconds",
                "Prediction latency in seconds",
            )
            .buckets(vec![0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25]),
        )?;

        let model_loaded = Gauge::with_opts(Opts::new(
            "coffee_revenue_model_loaded",
            "Model load status (0=failed, 1=loaded)",
        ))?;

        let uptime_seconds = Gauge::with_opts(Opts::new(
            "coffee_revenue_uptime_seconds",
            "Server uptime in seconds",
        ))?;

        Ok(Self {
            predictions_total,
            prediction_latency_seconds,
            model_loaded,
            uptime_seconds,
        })
    }

    /// Count one finished prediction request and its latency
    pub fn record_prediction(&self, outcome: PredictionOutcome, elapsed: Duration) {
        self.count_request(outcome);
        self.prediction_latency_seconds
            .observe(elapsed.as_secs_f64());
    }

    /// Count a request without a latency sample (rejected before inference)
    pub fn count_request(&self, outcome: PredictionOutcome) {
        self.predictions_total
            .with_label_values(&[outcome.as_str()])
            .inc();
    }

    pub fn predictions(&self, outcome: PredictionOutcome) -> u64 {
        self.predictions_total
            .with_label_values(&[outcome.as_str()])
            .get() as u64
    }

    pub fn set_model_loaded(&self, loaded: bool) {
        self.model_loaded.set(if loaded { 1.0 } else { 0.0 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.set_model_loaded(true);
        assert_eq!(metrics.model_loaded.get(), 1.0);
        metrics.set_model_loaded(false);
        assert_eq!(metrics.model_loaded.get(), 0.0);
    }

    #[test]
    fn test_record_prediction_by_outcome() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.record_prediction(PredictionOutcome::Success, Duration::from_millis(2));
        metrics.record_prediction(PredictionOutcome::Success, Duration::from_millis(3));
        metrics.record_prediction(PredictionOutcome::ClientError, Duration::from_micros(40));

        assert_eq!(metrics.predictions(PredictionOutcome::Success), 2);
        assert_eq!(metrics.predictions(PredictionOutcome::ClientError), 1);
        assert_eq!(metrics.predictions(PredictionOutcome::ServerError), 0);

        assert_eq!(metrics.prediction_latency_seconds.get_sample_count(), 3);
    }

    #[test]
    fn test_count_request_skips_latency() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.count_request(PredictionOutcome::ClientError);

        assert_eq!(metrics.predictions(PredictionOutcome::ClientError), 1);
        assert_eq!(metrics.prediction_latency_seconds.get_sample_count(), 0);
    }
}
