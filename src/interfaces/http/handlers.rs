//! Route handlers

use super::AppState;
use super::page::render_index;
use super::responses::PredictSuccess;
use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::response::{Html, IntoResponse, Response};
use std::collections::HashMap;
use tracing::{debug, warn};

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(state.service.load_error().as_deref()))
}

/// `POST /predict`
///
/// Every failure, including an undecodable body, is answered with JSON.
pub async fn predict(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            warn!("Rejected /predict body: {}", rejection.body_text());
            return state
                .service
                .reject_malformed(rejection.body_text())
                .into_response();
        }
    };

    match state.service.predict_form(&form) {
        Ok(result) => PredictSuccess::from(result).into_response(),
        Err(e) => {
            debug!("Prediction request failed: {}", e);
            e.into_response()
        }
    }
}
