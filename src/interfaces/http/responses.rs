//! JSON bodies returned by `/predict`.

use crate::application::prediction_service::PredictionResult;
use crate::domain::errors::PredictionError;
use crate::domain::features::FeatureVector;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PredictSuccess {
    pub success: bool,
    pub prediction: f64,
    pub input: FeatureVector,
}

impl From<PredictionResult> for PredictSuccess {
    fn from(result: PredictionResult) -> Self {
        Self {
            success: true,
            prediction: result.prediction,
            input: result.input,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PredictFailure {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for PredictSuccess {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// 400 for bad input, 500 when the model is missing or inference failed
impl IntoResponse for PredictionError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = PredictFailure {
            success: false,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
