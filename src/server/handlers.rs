//! HTTP request handlers

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ScreeningError;
use crate::report::ScreeningReport;
use crate::server::routes::AppState;

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub version: String,
}

impl IntoResponse for ScreeningError {
    fn into_response(self) -> Response {
        let status = match &self {
            ScreeningError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ScreeningError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if self.is_client_error() {
            tracing::warn!(error = %self, "rejected screening request");
        } else {
            tracing::error!(error = %self, "screening failed");
        }

        let body = ErrorResponse {
            error: self.kind(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// `POST /predict`
///
/// The body is parsed as JSON whatever its `Content-Type`.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ScreeningReport>, ScreeningError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("predict", %request_id);

    let report = span.in_scope(|| state.pipeline.screen_json(&body))?;

    span.in_scope(|| {
        tracing::info!(
            probability = report.probability,
            label = report.label.as_u8(),
            symptom_sum = report.symptom_sum,
            "screening complete"
        )
    });

    Ok(Json(report))
}

/// `GET /health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.model_name.clone(),
        version: state.model_version.clone(),
    })
}
