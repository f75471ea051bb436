use super::{ArtifactError, ModelDecoder};
use crate::domain::ports::RevenueModel;
use crate::infrastructure::models::OnnxRegressor;
use std::path::Path;
use std::sync::Arc;

/// Opens the artifact as an ONNX graph
pub struct OnnxDecoder;

impl ModelDecoder for OnnxDecoder {
    fn name(&self) -> &'static str {
        "onnx"
    }

    fn decode(&self, path: &Path) -> Result<Arc<dyn RevenueModel>, ArtifactError> {
        // ONNX Runtime reports a missing file less clearly than std does
        if !path.exists() {
            return Err(ArtifactError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }

        let model = OnnxRegressor::from_file(path).map_err(ArtifactError::Onnx)?;
        Ok(Arc::new(model))
    }
}
