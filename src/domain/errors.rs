use thiserror::Error;

/// Errors produced while answering a prediction request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("Missing value for {field}")]
    MissingField { field: String },

    #[error("Invalid numeric value for {field}: '{value}'")]
    InvalidType { field: String, value: String },

    #[error("Invalid form submission: {reason}")]
    MalformedRequest { reason: String },

    #[error("Model not loaded: {reason}")]
    ModelUnavailable { reason: String },

    /// `reason` is kept for logs only; callers see the generic message.
    #[error("Model prediction failed")]
    Inference { reason: String },
}

impl PredictionError {
    /// True when the caller sent bad input, false when the server is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PredictionError::MissingField { .. }
                | PredictionError::InvalidType { .. }
                | PredictionError::MalformedRequest { .. }
        )
    }
}

/// One failed decoder attempt recorded while loading the model artifact
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeAttempt {
    pub decoder: &'static str,
    pub message: String,
}

/// Every decoder failed to produce a model from the artifact
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Model could not be loaded from {path}. Tried {tried}. Last error: {last_error}")]
pub struct ModelLoadError {
    pub path: String,
    pub tried: String,
    pub last_error: String,
    pub attempts: Vec<DecodeAttempt>,
}

impl ModelLoadError {
    pub fn from_attempts(path: impl Into<String>, attempts: Vec<DecodeAttempt>) -> Self {
        let tried = if attempts.is_empty() {
            "no decoders".to_string()
        } else {
            attempts
                .iter()
                .map(|a| a.decoder)
                .collect::<Vec<_>>()
                .join(", ")
        };
        let last_error = attempts
            .last()
            .map(|a| format!("{}: {}", a.decoder, a.message))
            .unwrap_or_else(|| "no decoder configured".to_string());

        Self {
            path: path.into(),
            tried,
            last_error,
            attempts,
        }
    }
}
