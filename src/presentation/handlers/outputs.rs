use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::application::ports::VoiceService;
use crate::domain::OutputId;
use crate::presentation::state::AppState;

use super::error_response::error_response;

#[tracing::instrument(skip(state))]
pub async fn download_output_handler<V>(
    State(state): State<AppState<V>>,
    Path(output_id): Path<String>,
) -> Response
where
    V: VoiceService + 'static,
{
    let Ok(uuid) = Uuid::parse_str(&output_id) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid output ID: {}", output_id),
        );
    };

    let mime_type = state.conversions.output_mime_type();
    let session = state.conversions.session().await;

    match session.output_by_id(OutputId::from_uuid(uuid)) {
        Some(output) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", output.filename),
                ),
            ],
            Body::from(output.wav.clone()),
        )
            .into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("Output not found: {}", output_id),
        ),
    }
}
