//! HTTP surface: the form page and the JSON prediction endpoint.
//!
//! ## Endpoints
//!
//! - `GET /` - HTML form for the six inputs, with a load-error banner when needed
//! - `POST /predict` - form-encoded inputs in, JSON prediction out

pub mod handlers;
pub mod page;
pub mod responses;

use crate::application::prediction_service::PredictionService;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
}

pub fn create_router(service: Arc<PredictionService>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::predict))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}
