//! Model artifact decoders.
//!
//! Each decoder knows one on-disk encoding. The loader tries them in
//! priority order against the same file and keeps the first model that
//! decodes.

mod bincode_decoder;
mod json_decoder;
mod onnx_decoder;

pub use bincode_decoder::BincodeDecoder;
pub use json_decoder::JsonDecoder;
pub use onnx_decoder::OnnxDecoder;

use crate::domain::ports::RevenueModel;
use crate::infrastructure::models::SmartCoreRegressor;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("bincode decoding failed: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("JSON decoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Onnx(String),
}

/// One strategy for turning the artifact file into a model
pub trait ModelDecoder: Send + Sync {
    /// Short identifier used in logs and load errors
    fn name(&self) -> &'static str;

    fn decode(&self, path: &Path) -> Result<Arc<dyn RevenueModel>, ArtifactError>;
}

/// Decoders in load priority order: compact binary first, then the JSON
/// format older training runs wrote, then ONNX graphs.
pub fn default_decoders() -> Vec<Box<dyn ModelDecoder>> {
    vec![
        Box::new(BincodeDecoder),
        Box::new(JsonDecoder),
        Box::new(OnnxDecoder),
    ]
}

/// Encodings the trainer can write for a `SmartCoreRegressor`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Bincode,
    Json,
}

impl FromStr for ArtifactFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bincode" => Ok(ArtifactFormat::Bincode),
            "json" => Ok(ArtifactFormat::Json),
            _ => anyhow::bail!("Invalid artifact format: {}. Must be 'bincode' or 'json'", s),
        }
    }
}

/// Writes a trained regressor so that `default_decoders` can read it back.
/// Parent directories are created as needed.
pub fn write_artifact(
    path: &Path,
    model: &SmartCoreRegressor,
    format: ArtifactFormat,
) -> Result<(), ArtifactError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        ArtifactFormat::Bincode => bincode::serialize_into(&mut writer, model)?,
        ArtifactFormat::Json => serde_json::to_writer(&mut writer, model)?,
    }
    writer.flush()?;
    Ok(())
}
