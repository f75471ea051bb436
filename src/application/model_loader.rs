use crate::domain::errors::{DecodeAttempt, ModelLoadError};
use crate::domain::ports::RevenueModel;
use crate::infrastructure::decoders::{ModelDecoder, default_decoders};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Outcome of the one-time model load at startup
#[derive(Clone)]
pub enum LoadStatus {
    Loaded {
        model: Arc<dyn RevenueModel>,
        decoder: &'static str,
    },
    Failed(ModelLoadError),
}

impl LoadStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadStatus::Loaded { .. })
    }

    pub fn model(&self) -> Option<&Arc<dyn RevenueModel>> {
        match self {
            LoadStatus::Loaded { model, .. } => Some(model),
            LoadStatus::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ModelLoadError> {
        match self {
            LoadStatus::Loaded { .. } => None,
            LoadStatus::Failed(err) => Some(err),
        }
    }
}

impl fmt::Debug for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStatus::Loaded { model, decoder } => f
                .debug_struct("Loaded")
                .field("model", &model.name())
                .field("decoder", decoder)
                .finish(),
            LoadStatus::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
        }
    }
}

/// Loads the model artifact by trying each decoder in order.
pub struct ModelLoader {
    decoders: Vec<Box<dyn ModelDecoder>>,
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new(default_decoders())
    }
}

impl ModelLoader {
    pub fn new(decoders: Vec<Box<dyn ModelDecoder>>) -> Self {
        Self { decoders }
    }

    /// The first decoder that succeeds wins. Never panics: a total failure is
    /// returned as `LoadStatus::Failed` carrying every attempt.
    pub fn load(&self, path: &Path) -> LoadStatus {
        if !path.exists() {
            warn!("Model file not found at {:?}", path);
        }

        let mut attempts = Vec::with_capacity(self.decoders.len());
        for decoder in &self.decoders {
            match decoder.decode(path) {
                Ok(model) => {
                    info!(
                        "Loaded model '{}' from {:?} using {} decoder",
                        model.name(),
                        path,
                        decoder.name()
                    );
                    return LoadStatus::Loaded {
                        model,
                        decoder: decoder.name(),
                    };
                }
                Err(e) => {
                    warn!("{} decoder could not load {:?}: {}", decoder.name(), path, e);
                    attempts.push(DecodeAttempt {
                        decoder: decoder.name(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let err = ModelLoadError::from_attempts(path.display().to_string(), attempts);
        error!("{}", err);
        LoadStatus::Failed(err)
    }
}
