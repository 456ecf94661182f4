use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use base64::{Engine as _, engine::general_purpose};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use polyvoice::application::ports::{SpeakerVoiceAssignment, VoiceService, VoiceServiceError};
use polyvoice::domain::{AudioClip, VoiceName};
use polyvoice::infrastructure::gemini::{GeminiConfig, GeminiVoiceService};

#[derive(Debug, Clone)]
struct RecordedRequest {
    call: String,
    api_key: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct MockState {
    status: u16,
    body: Value,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn generate_content(
    State(state): State<MockState>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(RecordedRequest {
        call,
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
    let status = StatusCode::from_u16(state.status).unwrap();
    (status, Json(state.body.clone())).into_response()
}

async fn start_mock_gemini_server(
    response_status: u16,
    response_body: Value,
) -> (String, Arc<Mutex<Vec<RecordedRequest>>>, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let requests = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/models/{call}", post(generate_content))
        .with_state(MockState {
            status: response_status,
            body: response_body,
            requests: Arc::clone(&requests),
        });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, requests, shutdown_tx)
}

fn service_for(base_url: &str, api_key: Option<&str>) -> GeminiVoiceService {
    GeminiVoiceService::new(GeminiConfig {
        api_key: api_key.map(str::to_string),
        base_url: base_url.to_string(),
        analysis_model: "analysis-model".to_string(),
        speech_model: "speech-model".to_string(),
        request_timeout: Duration::from_secs(10),
    })
}

fn text_response(text: &str) -> Value {
    json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })
}

fn clip() -> AudioClip {
    AudioClip::new("speaker.mp3", Some("audio/mpeg"), b"fake mp3 bytes".to_vec())
}

#[tokio::test]
async fn given_reference_clip_when_analyzing_profile_then_clip_and_schema_are_sent_inline() {
    let answer = r#"{"styleDescription": "calm", "closestVoice": "Kore"}"#;
    let (base_url, requests, shutdown_tx) =
        start_mock_gemini_server(200, text_response(answer)).await;
    let service = service_for(&base_url, Some("test-key"));

    let result = service.analyze_voice_profile(&clip()).await.unwrap();

    assert_eq!(result, answer);
    let recorded = requests.lock().unwrap()[0].clone();
    assert_eq!(recorded.call, "analysis-model:generateContent");
    assert_eq!(recorded.api_key.as_deref(), Some("test-key"));
    let parts = &recorded.body["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "audio/mpeg");
    assert_eq!(
        parts[0]["inlineData"]["data"],
        general_purpose::STANDARD.encode(b"fake mp3 bytes")
    );
    assert!(
        parts[1]["text"]
            .as_str()
            .unwrap()
            .contains("Puck, Charon, Kore, Fenrir, Zephyr")
    );
    let config = &recorded.body["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(
        config["responseSchema"]["required"],
        json!(["styleDescription", "closestVoice"])
    );
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_multi_part_text_answer_when_describing_prosody_then_parts_are_joined() {
    let body = json!({
        "candidates": [{ "content": { "parts": [{ "text": "Fast, " }, { "text": "breathless." }] } }]
    });
    let (base_url, requests, shutdown_tx) = start_mock_gemini_server(200, body).await;
    let service = service_for(&base_url, Some("test-key"));

    let result = service.describe_prosody(&clip()).await.unwrap();

    assert_eq!(result, "Fast, breathless.");
    let recorded = requests.lock().unwrap()[0].clone();
    assert!(recorded.body.get("generationConfig").is_none());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_several_speakers_when_transcribing_then_prompt_asks_for_speaker_labels() {
    let (base_url, requests, shutdown_tx) =
        start_mock_gemini_server(200, text_response("Speaker 1: Hi.\nSpeaker 2: Hey.")).await;
    let service = service_for(&base_url, Some("test-key"));

    let transcript = service.transcribe(&clip(), 2).await.unwrap();

    assert_eq!(transcript, "Speaker 1: Hi.\nSpeaker 2: Hey.");
    let recorded = requests.lock().unwrap()[0].clone();
    let prompt = recorded.body["contents"][0]["parts"][1]["text"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(prompt.contains("up to \"Speaker 2\""));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_audio_response_when_synthesizing_then_payload_is_base64_decoded() {
    let pcm = vec![0u8, 1, 2, 3, 4, 5];
    let body = json!({
        "candidates": [{ "content": { "parts": [{
            "inlineData": { "mimeType": "audio/L16;rate=24000", "data": general_purpose::STANDARD.encode(&pcm) }
        }] } }]
    });
    let (base_url, requests, shutdown_tx) = start_mock_gemini_server(200, body).await;
    let service = service_for(&base_url, Some("test-key"));
    let voices = vec![
        SpeakerVoiceAssignment {
            speaker: "Speaker 1".to_string(),
            voice: VoiceName::Puck,
        },
        SpeakerVoiceAssignment {
            speaker: "Speaker 2".to_string(),
            voice: VoiceName::Fenrir,
        },
    ];

    let audio = service.synthesize("Say it.", &voices).await.unwrap();

    assert_eq!(audio, Some(pcm));
    let recorded = requests.lock().unwrap()[0].clone();
    assert_eq!(recorded.call, "speech-model:generateContent");
    let config = &recorded.body["generationConfig"];
    assert_eq!(config["responseModalities"], json!(["AUDIO"]));
    let speakers = &config["speechConfig"]["multiSpeakerVoiceConfig"]["speakerVoiceConfigs"];
    assert_eq!(speakers[0]["speaker"], "Speaker 1");
    assert_eq!(
        speakers[0]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
        "Puck"
    );
    assert_eq!(
        speakers[1]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
        "Fenrir"
    );
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_response_without_audio_when_synthesizing_then_none_is_returned() {
    let (base_url, _requests, shutdown_tx) =
        start_mock_gemini_server(200, text_response("I cannot do that.")).await;
    let service = service_for(&base_url, Some("test-key"));

    let audio = service.synthesize("Say it.", &[]).await.unwrap();

    assert!(audio.is_none());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_calling_then_api_request_failed_is_returned() {
    let body = json!({ "error": { "code": 400, "message": "bad audio" } });
    let (base_url, _requests, shutdown_tx) = start_mock_gemini_server(400, body).await;
    let service = service_for(&base_url, Some("test-key"));

    let result = service.transcribe(&clip(), 1).await;

    match result {
        Err(VoiceServiceError::ApiRequestFailed(message)) => {
            assert!(message.contains("400"));
            assert!(message.contains("bad audio"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_rate_limit_status_when_calling_then_rate_limited_is_returned() {
    let (base_url, _requests, shutdown_tx) =
        start_mock_gemini_server(429, json!({ "error": {} })).await;
    let service = service_for(&base_url, Some("test-key"));

    let result = service.describe_prosody(&clip()).await;

    assert!(matches!(result, Err(VoiceServiceError::RateLimited)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_missing_or_blank_key_when_calling_then_missing_credential_and_no_request() {
    let (base_url, requests, shutdown_tx) =
        start_mock_gemini_server(200, text_response("unused")).await;

    for key in [None, Some("   ")] {
        let service = service_for(&base_url, key);
        assert!(matches!(
            service.ensure_configured(),
            Err(VoiceServiceError::MissingCredential(_))
        ));
        assert!(matches!(
            service.transcribe(&clip(), 1).await,
            Err(VoiceServiceError::MissingCredential(_))
        ));
    }

    assert!(requests.lock().unwrap().is_empty());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unparseable_body_when_calling_then_invalid_response_is_returned() {
    let (base_url, _requests, shutdown_tx) =
        start_mock_gemini_server(200, json!(["not", "an", "object"])).await;
    let service = service_for(&base_url, Some("test-key"));

    let result = service.transcribe(&clip(), 1).await;

    assert!(matches!(result, Err(VoiceServiceError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}
