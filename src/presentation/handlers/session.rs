use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::VoiceService;
use crate::application::services::{ConversionSession, ReferenceAdded};
use crate::domain::{AudioClip, ConversionMode, SpeakerId};
use crate::presentation::state::AppState;

use super::audio_upload::read_audio_clip;
use super::error_response::error_response;

#[derive(Serialize)]
pub struct SessionResponse {
    pub status: String,
    pub mode: ConversionMode,
    pub can_convert: bool,
    pub source: Option<ClipInfo>,
    pub references: Vec<ReferenceInfo>,
    pub profiles: Vec<ProfileInfo>,
    pub prosody_note: Option<String>,
    pub transcript: Option<String>,
    pub error: Option<String>,
    pub logs: Vec<String>,
    pub output: Option<OutputInfo>,
}

#[derive(Serialize)]
pub struct ClipInfo {
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: usize,
}

#[derive(Serialize)]
pub struct ReferenceInfo {
    pub speaker: String,
    #[serde(flatten)]
    pub clip: ClipInfo,
}

#[derive(Serialize)]
pub struct ProfileInfo {
    pub speaker: String,
    pub voice: Option<String>,
    pub assigned_voice: String,
    pub style_description: String,
}

#[derive(Serialize)]
pub struct OutputInfo {
    pub id: String,
    pub filename: String,
    pub download_url: String,
}

#[derive(Serialize)]
pub struct ReferenceUploadResponse {
    pub accepted: bool,
    pub speaker: Option<String>,
    pub reference_count: usize,
    pub message: String,
}

#[derive(Deserialize, Serialize)]
pub struct ModeRequest {
    pub mode: ConversionMode,
}

impl From<&AudioClip> for ClipInfo {
    fn from(clip: &AudioClip) -> Self {
        Self {
            filename: clip.filename.clone(),
            mime_type: clip.mime_type.clone(),
            size_bytes: clip.size_bytes(),
        }
    }
}

impl From<&ConversionSession> for SessionResponse {
    fn from(session: &ConversionSession) -> Self {
        let artifacts = session.artifacts();
        Self {
            status: session.status().as_str().to_string(),
            mode: session.mode(),
            can_convert: session.can_trigger(),
            source: session.source().map(ClipInfo::from),
            references: session
                .references()
                .iter()
                .enumerate()
                .map(|(index, clip)| ReferenceInfo {
                    speaker: SpeakerId::from_upload_index(index).label(),
                    clip: ClipInfo::from(clip),
                })
                .collect(),
            profiles: artifacts
                .profiles
                .iter()
                .map(|p| ProfileInfo {
                    speaker: p.label(),
                    voice: p.voice_name.map(|v| v.to_string()),
                    assigned_voice: p.assigned_voice().to_string(),
                    style_description: p.style_description.clone(),
                })
                .collect(),
            prosody_note: artifacts.prosody_note.clone(),
            transcript: artifacts.transcript.clone(),
            error: session.error_message().map(str::to_string),
            logs: session.log().lines(),
            output: session.output().map(|o| OutputInfo {
                id: o.id.as_uuid().to_string(),
                filename: o.filename.clone(),
                download_url: o.download_path(),
            }),
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn session_handler<V>(State(state): State<AppState<V>>) -> impl IntoResponse
where
    V: VoiceService + 'static,
{
    let session = state.conversions.session().await;
    (StatusCode::OK, Json(SessionResponse::from(&*session)))
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_source_handler<V>(
    State(state): State<AppState<V>>,
    mut multipart: Multipart,
) -> Response
where
    V: VoiceService + 'static,
{
    let clip = match read_audio_clip(&mut multipart).await {
        Ok(clip) => clip,
        Err(response) => return response,
    };

    let info = ClipInfo::from(&clip);
    state.conversions.session().await.set_source(clip);

    tracing::info!(filename = %info.filename, bytes = info.size_bytes, "Source clip uploaded");
    (StatusCode::OK, Json(info)).into_response()
}

#[tracing::instrument(skip(state))]
pub async fn delete_source_handler<V>(State(state): State<AppState<V>>) -> Response
where
    V: VoiceService + 'static,
{
    match state.conversions.session().await.clear_source() {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => error_response(StatusCode::NOT_FOUND, "No source clip uploaded"),
    }
}

/// Plays back the uploaded source clip.
#[tracing::instrument(skip(state))]
pub async fn source_preview_handler<V>(State(state): State<AppState<V>>) -> Response
where
    V: VoiceService + 'static,
{
    let session = state.conversions.session().await;
    let Some(clip) = session.source() else {
        return error_response(StatusCode::NOT_FOUND, "No source clip uploaded");
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, clip.mime_type.clone())],
        Body::from(clip.data.clone()),
    )
        .into_response()
}

#[tracing::instrument(skip(state, multipart))]
pub async fn add_reference_handler<V>(
    State(state): State<AppState<V>>,
    mut multipart: Multipart,
) -> Response
where
    V: VoiceService + 'static,
{
    let clip = match read_audio_clip(&mut multipart).await {
        Ok(clip) => clip,
        Err(response) => return response,
    };
    let filename = clip.filename.clone();

    let mut session = state.conversions.session().await;
    let outcome = session.add_reference(clip);
    let reference_count = session.references().len();
    drop(session);

    match outcome {
        ReferenceAdded::Accepted(speaker) => {
            tracing::info!(speaker = %speaker, filename = %filename, "Reference clip added");
            (
                StatusCode::CREATED,
                Json(ReferenceUploadResponse {
                    accepted: true,
                    speaker: Some(speaker.label()),
                    reference_count,
                    message: format!("{} mapped to {}", filename, speaker.label()),
                }),
            )
                .into_response()
        }
        ReferenceAdded::Rejected => {
            tracing::warn!(filename = %filename, "Reference clip rejected: list full");
            (
                StatusCode::OK,
                Json(ReferenceUploadResponse {
                    accepted: false,
                    speaker: None,
                    reference_count,
                    message: "Reference list is full; remove one before adding another".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn remove_reference_handler<V>(
    State(state): State<AppState<V>>,
    Path(index): Path<usize>,
) -> Response
where
    V: VoiceService + 'static,
{
    match state.conversions.session().await.remove_reference(index) {
        Ok(clip) => {
            tracing::info!(index, filename = %clip.filename, "Reference clip removed");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => error_response(StatusCode::NOT_FOUND, e.to_string()),
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn set_mode_handler<V>(
    State(state): State<AppState<V>>,
    Json(request): Json<ModeRequest>,
) -> impl IntoResponse
where
    V: VoiceService + 'static,
{
    state.conversions.session().await.set_mode(request.mode);
    tracing::debug!(mode = %request.mode, "Conversion mode changed");
    (StatusCode::OK, Json(ModeRequest { mode: request.mode }))
}
