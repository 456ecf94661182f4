use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::VoiceService;
use crate::application::services::TriggerError;
use crate::presentation::state::AppState;

use super::error_response::error_response;

#[derive(Serialize)]
pub struct ConversionStartedResponse {
    pub status: String,
    pub message: String,
}

/// Starts a conversion for the current session. The run continues in the
/// background; progress is read from `GET /api/v1/session`.
#[tracing::instrument(skip(state))]
pub async fn start_conversion_handler<V>(State(state): State<AppState<V>>) -> Response
where
    V: VoiceService + 'static,
{
    match state.conversions.trigger().await {
        Ok(_run) => {
            tracing::info!("Conversion started");
            (
                StatusCode::ACCEPTED,
                Json(ConversionStartedResponse {
                    status: "RUNNING".to_string(),
                    message: "Conversion started".to_string(),
                }),
            )
                .into_response()
        }
        Err(TriggerError::AlreadyRunning) => {
            error_response(StatusCode::CONFLICT, TriggerError::AlreadyRunning.to_string())
        }
        Err(e @ TriggerError::Configuration(_)) => {
            tracing::error!(error = %e, "Conversion refused: service not configured");
            error_response(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
        Err(e @ TriggerError::InvalidInput(_)) => {
            tracing::warn!(error = %e, "Conversion refused: incomplete input");
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}
