use crate::domain::features::FeatureVector;
use crate::domain::ports::RevenueModel;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{LinearRegression, LinearRegressionParameters};

type Matrix = DenseMatrix<f64>;

/// Hyperparameters for the random forest regressor
#[derive(Debug, Clone, Copy)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: u16,
    pub min_split: usize,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_split: 5,
        }
    }
}

/// Trained smartcore regressor, as stored in bincode and JSON artifacts.
///
/// The variant tag is part of the artifact, so a single decoder reads
/// either algorithm.
#[derive(Serialize, Deserialize)]
pub enum SmartCoreRegressor {
    Linear(LinearRegression<f64, f64, Matrix, Vec<f64>>),
    RandomForest(RandomForestRegressor<f64, f64, Matrix, Vec<f64>>),
}

impl SmartCoreRegressor {
    /// Ordinary least squares fit. Rows must be in `FEATURE_NAMES` order.
    pub fn fit_linear(x: &[Vec<f64>], y: &[f64]) -> Result<Self, String> {
        let x_matrix = to_matrix(x)?;
        let parameters = LinearRegressionParameters::default();
        let model = LinearRegression::fit(&x_matrix, &y.to_vec(), parameters)
            .map_err(|e| format!("Training error: {}", e))?;
        Ok(Self::Linear(model))
    }

    pub fn fit_forest(x: &[Vec<f64>], y: &[f64], params: ForestParams) -> Result<Self, String> {
        let x_matrix = to_matrix(x)?;
        let parameters = RandomForestRegressorParameters::default()
            .with_n_trees(params.n_trees)
            .with_max_depth(params.max_depth)
            .with_min_samples_split(params.min_split);
        let model = RandomForestRegressor::fit(&x_matrix, &y.to_vec(), parameters)
            .map_err(|e| format!("Training error: {}", e))?;
        Ok(Self::RandomForest(model))
    }

    /// Predict several rows at once (used for offline evaluation).
    pub fn predict_rows(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, String> {
        let x_matrix = to_matrix(rows)?;
        let predictions = match self {
            Self::Linear(model) => model.predict(&x_matrix),
            Self::RandomForest(model) => model.predict(&x_matrix),
        };
        predictions.map_err(|e| format!("Prediction failed: {}", e))
    }
}

fn to_matrix(rows: &[Vec<f64>]) -> Result<Matrix, String> {
    if rows.is_empty() {
        return Err("Matrix creation failed: no rows".to_string());
    }
    DenseMatrix::from_2d_vec(&rows.to_vec()).map_err(|e| format!("Matrix creation failed: {}", e))
}

impl RevenueModel for SmartCoreRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, String> {
        let predictions = self.predict_rows(&[features.to_f64_row()])?;
        predictions
            .first()
            .copied()
            .ok_or_else(|| "No prediction returned".to_string())
    }

    fn name(&self) -> &str {
        match self {
            Self::Linear(_) => "SmartCore Linear Regression",
            Self::RandomForest(_) => "SmartCore Random Forest",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mock::{synthetic_revenue, synthetic_training_data};

    #[test]
    fn test_linear_fit_recovers_synthetic_revenue() {
        let (x, y) = synthetic_training_data();
        let model = SmartCoreRegressor::fit_linear(&x, &y).unwrap();

        let fv = FeatureVector::new([120.0, 4.5, 10.0, 4.0, 25.0, 300.0]);
        let pred = model.predict(&fv).unwrap();
        let expected = synthetic_revenue(fv.values());
        assert!(
            (pred - expected).abs() < 1e-3,
            "pred={pred} expected={expected}"
        );
        assert_eq!(model.name(), "SmartCore Linear Regression");
    }

    #[test]
    fn test_forest_predicts_within_training_range() {
        let (x, y) = synthetic_training_data();
        let params = ForestParams {
            n_trees: 10,
            max_depth: 4,
            min_split: 2,
        };
        let model = SmartCoreRegressor::fit_forest(&x, &y, params).unwrap();

        let fv = FeatureVector::new([120.0, 4.5, 10.0, 4.0, 25.0, 300.0]);
        let pred = model.predict(&fv).unwrap();
        let min = y.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = y.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(pred >= min && pred <= max);
        assert_eq!(model.name(), "SmartCore Random Forest");
    }

    #[test]
    fn test_predict_rows_batch() {
        let (x, y) = synthetic_training_data();
        let model = SmartCoreRegressor::fit_linear(&x, &y).unwrap();
        let preds = model.predict_rows(&x[..3]).unwrap();
        assert_eq!(preds.len(), 3);
    }

    #[test]
    fn test_fit_rejects_empty_data() {
        assert!(SmartCoreRegressor::fit_linear(&[], &[]).is_err());
    }
}
