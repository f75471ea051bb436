use crate::domain::features::FeatureVector;

/// Interface for a loaded regression model
pub trait RevenueModel: Send + Sync {
    /// Predict daily revenue for a single row
    fn predict(&self, features: &FeatureVector) -> Result<f64, String>;

    /// Get model name/type
    fn name(&self) -> &str;
}
