use super::{ArtifactError, ModelDecoder};
use crate::domain::ports::RevenueModel;
use crate::infrastructure::models::SmartCoreRegressor;
use std::path::Path;
use std::sync::Arc;

/// Reads a bincode-encoded `SmartCoreRegressor`
pub struct BincodeDecoder;

impl ModelDecoder for BincodeDecoder {
    fn name(&self) -> &'static str {
        "bincode"
    }

    fn decode(&self, path: &Path) -> Result<Arc<dyn RevenueModel>, ArtifactError> {
        // Decode from memory: length prefixes are then bounded by the file size
        let buffer = std::fs::read(path)?;
        let model: SmartCoreRegressor = bincode::deserialize(&buffer)?;
        Ok(Arc::new(model))
    }
}
