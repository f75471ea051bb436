//! Push-based observability
//!
//! Metrics are kept in Prometheus collectors and pushed out as periodic
//! structured JSON logs. The server exposes no metrics route.

pub mod metrics;
pub mod reporter;

pub use metrics::{Metrics, PredictionOutcome};
pub use reporter::MetricsReporter;
