use crate::domain::features::{FEATURE_COUNT, FeatureVector};
use crate::domain::ports::RevenueModel;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Weights of the linear revenue function behind `synthetic_training_data`
const SYNTHETIC_WEIGHTS: [f64; FEATURE_COUNT] = [3.0, 40.0, 12.0, 20.0, 1.5, 0.2];
const SYNTHETIC_INTERCEPT: f64 = 100.0;

/// Deterministic stand-in for a trained model.
///
/// Predicts a fixed linear function of the inputs and counts calls, so tests
/// can assert whether inference ran at all.
#[derive(Default)]
pub struct MockRevenueModel {
    calls: AtomicUsize,
    failure: Option<String>,
}

impl MockRevenueModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A model whose every prediction fails with `reason`
    pub fn failing(reason: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: Some(reason.to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RevenueModel for MockRevenueModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(reason) => Err(reason.clone()),
            None => Ok(synthetic_revenue(features.values())),
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}

/// Revenue for one row under the synthetic linear relationship
pub fn synthetic_revenue(row: &[f64]) -> f64 {
    row.iter()
        .zip(SYNTHETIC_WEIGHTS.iter())
        .map(|(x, w)| x * w)
        .sum::<f64>()
        + SYNTHETIC_INTERCEPT
}

/// Small, full-rank training set whose target is exactly `synthetic_revenue`
pub fn synthetic_training_data() -> (Vec<Vec<f64>>, Vec<f64>) {
    let x: Vec<Vec<f64>> = (0..16)
        .map(|i| {
            let f = i as f64;
            vec![
                80.0 + 7.0 * f + ((i * i) % 5) as f64,
                3.0 + 0.25 * (i % 4) as f64 + 0.1 * f,
                8.0 + (i % 5) as f64,
                2.0 + ((i * 3) % 7) as f64,
                10.0 + 2.5 * (i % 6) as f64 + f,
                200.0 + 13.0 * f + 3.0 * ((i * i) % 11) as f64,
            ]
        })
        .collect();
    let y = x.iter().map(|row| synthetic_revenue(row)).collect();
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_counts_calls() {
        let model = MockRevenueModel::new();
        let fv = FeatureVector::new([1.0; FEATURE_COUNT]);
        model.predict(&fv).unwrap();
        model.predict(&fv).unwrap();
        assert_eq!(model.calls(), 2);
    }

    #[test]
    fn test_failing_mock() {
        let model = MockRevenueModel::failing("shape mismatch");
        let err = model.predict(&FeatureVector::new([0.0; FEATURE_COUNT])).unwrap_err();
        assert_eq!(err, "shape mismatch");
        assert_eq!(model.calls(), 1);
    }

    #[test]
    fn test_synthetic_data_shape() {
        let (x, y) = synthetic_training_data();
        assert_eq!(x.len(), y.len());
        assert!(x.iter().all(|row| row.len() == FEATURE_COUNT));
    }
}
