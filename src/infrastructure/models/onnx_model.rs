use crate::domain::features::{FEATURE_COUNT, FeatureVector};
use crate::domain::ports::RevenueModel;
use ort::session::Session;
use std::path::Path;
use std::sync::Mutex;

/// Regressor exported to ONNX and executed through ONNX Runtime.
///
/// The graph must take a single `[1, 6]` f32 tensor and emit the prediction
/// as the first element of its first output.
pub struct OnnxRegressor {
    session: Mutex<Session>,
}

impl OnnxRegressor {
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let session = Session::builder()
            .map_err(|e| format!("Failed to create ONNX session builder: {}", e))?
            .commit_from_file(path)
            .map_err(|e| format!("Failed to load ONNX model: {}", e))?;

        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl RevenueModel for OnnxRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, String> {
        let mut session = self
            .session
            .lock()
            .map_err(|e| format!("Mutex lock failed: {}", e))?;

        let shape = vec![1, FEATURE_COUNT];
        let input_value = ort::value::Value::from_array((shape.as_slice(), features.to_f32_row()))
            .map_err(|e| format!("Input value creation failed: {}", e))?;

        let inputs = ort::inputs![input_value];

        match session.run(inputs) {
            Ok(outputs) => {
                let output_value = outputs
                    .iter()
                    .next()
                    .map(|(_, v)| v)
                    .ok_or("No output found")?;
                let data = output_value
                    .try_extract_tensor::<f32>()
                    .map_err(|e| e.to_string())?;
                Ok(*data.1.iter().next().ok_or("Empty output")? as f64)
            }
            Err(e) => Err(e.to_string()),
        }
    }

    fn name(&self) -> &str {
        "ONNX Runtime"
    }
}
