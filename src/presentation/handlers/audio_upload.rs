use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::Response;

use crate::domain::AudioClip;

use super::error_response::error_response;

/// Reads the first file field of a multipart form into an [`AudioClip`].
pub async fn read_audio_clip(multipart: &mut Multipart) -> Result<AudioClip, Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                tracing::warn!("Upload request with no file");
                return Err(error_response(StatusCode::BAD_REQUEST, "No file uploaded"));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err(error_response(
                    e.status(),
                    format!("Failed to read multipart: {}", e.body_text()),
                ));
            }
        };

        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);

        if let Some(mime) = content_type.as_deref() {
            if !mime.starts_with("audio/") && !mime.starts_with("video/") && mime != "application/octet-stream" {
                tracing::warn!(content_type = %mime, "Unsupported content type");
                return Err(error_response(
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    format!("Unsupported content type: {}", mime),
                ));
            }
        }

        let data = field.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read file bytes");
            error_response(e.status(), format!("Failed to read file: {}", e.body_text()))
        })?;

        if data.is_empty() {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                format!("Uploaded file {} is empty", filename),
            ));
        }

        tracing::debug!(filename = %filename, bytes = data.len(), "Audio file received");

        return Ok(AudioClip::new(filename, content_type.as_deref(), data));
    }
}
