use crate::application::model_loader::LoadStatus;
use crate::domain::errors::PredictionError;
use crate::domain::features::FeatureVector;
use crate::domain::ports::RevenueModel;
use crate::infrastructure::observability::{Metrics, PredictionOutcome};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

/// A scalar prediction together with the inputs that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub prediction: f64,
    pub input: FeatureVector,
}

/// Immutable, shareable prediction service.
///
/// Owns the startup `LoadStatus` and never replaces it; any number of
/// request handlers may call into it concurrently.
pub struct PredictionService {
    status: LoadStatus,
    metrics: Option<Metrics>,
}

impl PredictionService {
    pub fn new(status: LoadStatus) -> Self {
        Self {
            status,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        metrics.set_model_loaded(self.status.is_loaded());
        self.metrics = Some(metrics);
        self
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Load error message for display, if the model is unavailable
    pub fn load_error(&self) -> Option<String> {
        self.status.error().map(|e| e.to_string())
    }

    /// Validate submitted fields and predict.
    ///
    /// Model availability is checked first, so an unloaded model is reported
    /// even when the input is also invalid.
    pub fn predict_form(
        &self,
        form: &HashMap<String, String>,
    ) -> Result<PredictionResult, PredictionError> {
        let started = Instant::now();
        let result = self.model().and_then(|model| {
            let features = FeatureVector::from_form(form)?;
            Self::infer(model.as_ref(), features)
        });
        self.record(&result, started);
        result
    }

    /// Error for a request whose body could not be decoded into fields.
    ///
    /// An unloaded model still takes precedence over the malformed body.
    /// Only the outcome counter is bumped; no latency is observed.
    pub fn reject_malformed(&self, reason: String) -> PredictionError {
        let err = match self.model() {
            Ok(_) => PredictionError::MalformedRequest { reason },
            Err(unavailable) => unavailable,
        };
        if let Some(metrics) = &self.metrics {
            metrics.count_request(Self::outcome_of(&err));
        }
        err
    }

    fn model(&self) -> Result<&Arc<dyn RevenueModel>, PredictionError> {
        match &self.status {
            LoadStatus::Loaded { model, .. } => Ok(model),
            LoadStatus::Failed(err) => Err(PredictionError::ModelUnavailable {
                reason: err.to_string(),
            }),
        }
    }

    fn infer(
        model: &dyn RevenueModel,
        features: FeatureVector,
    ) -> Result<PredictionResult, PredictionError> {
        let prediction = model.predict(&features).map_err(|reason| {
            error!("{} prediction failed: {}", model.name(), reason);
            PredictionError::Inference { reason }
        })?;

        if !prediction.is_finite() {
            error!("{} returned non-finite prediction {}", model.name(), prediction);
            return Err(PredictionError::Inference {
                reason: format!("non-finite prediction {}", prediction),
            });
        }

        debug!("Predicted revenue {:.2} for {:?}", prediction, features);
        Ok(PredictionResult {
            prediction,
            input: features,
        })
    }

    fn record(&self, result: &Result<PredictionResult, PredictionError>, started: Instant) {
        let Some(metrics) = &self.metrics else {
            return;
        };
        let outcome = match result {
            Ok(_) => PredictionOutcome::Success,
            Err(e) => Self::outcome_of(e),
        };
        metrics.record_prediction(outcome, started.elapsed());
    }

    fn outcome_of(err: &PredictionError) -> PredictionOutcome {
        if err.is_client_error() {
            PredictionOutcome::ClientError
        } else {
            PredictionOutcome::ServerError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{DecodeAttempt, ModelLoadError};
    use crate::domain::features::FEATURE_NAMES;
    use crate::infrastructure::mock::{MockRevenueModel, synthetic_revenue};

    fn scenario_form() -> HashMap<String, String> {
        FEATURE_NAMES
            .iter()
            .zip(["120", "4.5", "10", "4", "25", "300"])
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn loaded(model: Arc<MockRevenueModel>) -> PredictionService {
        PredictionService::new(LoadStatus::Loaded {
            model,
            decoder: "mock",
        })
    }

    fn failed() -> PredictionService {
        PredictionService::new(LoadStatus::Failed(ModelLoadError::from_attempts(
            "models/coffee.pkl",
            vec![DecodeAttempt {
                decoder: "onnx",
                message: "bad magic".to_string(),
            }],
        )))
    }

    #[test]
    fn test_scenario_prediction() {
        let model = Arc::new(MockRevenueModel::new());
        let service = loaded(model.clone());

        let result = service.predict_form(&scenario_form()).unwrap();
        assert_eq!(result.input.values(), &[120.0, 4.5, 10.0, 4.0, 25.0, 300.0]);
        assert_eq!(result.prediction, synthetic_revenue(result.input.values()));
        assert_eq!(model.calls(), 1);
    }

    #[test]
    fn test_missing_field_skips_inference() {
        let model = Arc::new(MockRevenueModel::new());
        let service = loaded(model.clone());

        let mut form = scenario_form();
        form.remove("Location_Foot_Traffic");
        let err = service.predict_form(&form).unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(model.calls(), 0);
    }

    #[test]
    fn test_unloaded_model_wins_over_invalid_input() {
        let service = failed();
        let err = service.predict_form(&HashMap::new()).unwrap_err();
        assert!(matches!(err, PredictionError::ModelUnavailable { .. }));
        assert!(err.to_string().starts_with("Model not loaded: "));
        assert!(service.load_error().unwrap().contains("bad magic"));
    }

    #[test]
    fn test_inference_failure_is_server_error() {
        let service = loaded(Arc::new(MockRevenueModel::failing("shape mismatch")));
        let err = service.predict_form(&scenario_form()).unwrap_err();
        assert!(!err.is_client_error());
        assert_eq!(err.to_string(), "Model prediction failed");
    }

    #[test]
    fn test_repeated_inputs_are_idempotent() {
        let service = loaded(Arc::new(MockRevenueModel::new()));
        let first = service.predict_form(&scenario_form()).unwrap();
        let second = service.predict_form(&scenario_form()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_body_with_loaded_model_is_client_error() {
        let service = loaded(Arc::new(MockRevenueModel::new()));
        let err = service.reject_malformed("bad content type".to_string());
        assert!(matches!(err, PredictionError::MalformedRequest { .. }));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_malformed_body_with_unloaded_model_reports_load_error() {
        let err = failed().reject_malformed("bad content type".to_string());
        assert!(matches!(err, PredictionError::ModelUnavailable { .. }));
        assert!(err.to_string().contains("bad magic"));
    }

    #[test]
    fn test_metrics_recorded_by_outcome() {
        let metrics = Metrics::new().unwrap();
        let service = loaded(Arc::new(MockRevenueModel::new())).with_metrics(metrics.clone());

        service.predict_form(&scenario_form()).unwrap();
        let _ = service.predict_form(&HashMap::new());
        let _ = service.reject_malformed("not a form".to_string());

        assert_eq!(metrics.predictions(PredictionOutcome::Success), 1);
        assert_eq!(metrics.predictions(PredictionOutcome::ClientError), 2);
        // the rejected body is counted but adds no latency sample
        assert_eq!(metrics.prediction_latency_seconds.get_sample_count(), 2);
        assert_eq!(metrics.model_loaded.get(), 1.0);
    }

    #[test]
    fn test_failed_load_sets_gauge() {
        let metrics = Metrics::new().unwrap();
        let service = failed().with_metrics(metrics.clone());
        let _ = service.predict_form(&scenario_form());

        assert_eq!(metrics.model_loaded.get(), 0.0);
        assert_eq!(metrics.predictions(PredictionOutcome::ServerError), 1);
    }
}
