use super::{ArtifactError, ModelDecoder};
use crate::domain::ports::RevenueModel;
use crate::infrastructure::models::SmartCoreRegressor;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

/// Reads a serde JSON `SmartCoreRegressor`
pub struct JsonDecoder;

impl ModelDecoder for JsonDecoder {
    fn name(&self) -> &'static str {
        "json"
    }

    fn decode(&self, path: &Path) -> Result<Arc<dyn RevenueModel>, ArtifactError> {
        let reader = BufReader::new(File::open(path)?);
        let model: SmartCoreRegressor = serde_json::from_reader(reader)?;
        Ok(Arc::new(model))
    }
}
