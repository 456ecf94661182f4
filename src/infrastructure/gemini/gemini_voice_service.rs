use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;

use crate::application::ports::{SpeakerVoiceAssignment, VoiceService, VoiceServiceError};
use crate::domain::AudioClip;
use crate::infrastructure::observability::sanitize_prompt;

use super::gemini_types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    MultiSpeakerVoiceConfig, Part, PrebuiltVoiceConfig, SpeakerVoiceConfig, SpeechConfig,
    VoiceConfig,
};
use super::prompts::{
    PROSODY_PROMPT, transcription_prompt, voice_profile_prompt, voice_profile_schema,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub analysis_model: String,
    pub speech_model: String,
    pub request_timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            speech_model: DEFAULT_SPEECH_MODEL.to_string(),
            request_timeout: Duration::from_secs(300),
        }
    }
}

/// [`VoiceService`] backed by the Gemini `generateContent` REST endpoint.
pub struct GeminiVoiceService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    analysis_model: String,
    speech_model: String,
    request_timeout: Duration,
}

impl GeminiVoiceService {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            analysis_model: config.analysis_model,
            speech_model: config.speech_model,
            request_timeout: config.request_timeout,
        }
    }

    fn api_key(&self) -> Result<&str, VoiceServiceError> {
        self.api_key.as_deref().ok_or_else(|| {
            VoiceServiceError::MissingCredential(
                "GEMINI_API_KEY is not set; add it to the environment or a .env file".to_string(),
            )
        })
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, VoiceServiceError> {
        let api_key = self.api_key()?;
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .timeout(self.request_timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| VoiceServiceError::ApiRequestFailed(format!("request: {}", e)))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(VoiceServiceError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(VoiceServiceError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| VoiceServiceError::InvalidResponse(format!("parse response: {}", e)))
    }

    async fn ask_about_clip(
        &self,
        clip: &AudioClip,
        prompt: &str,
        generation_config: Option<GenerationConfig>,
    ) -> Result<String, VoiceServiceError> {
        tracing::debug!(
            model = %self.analysis_model,
            filename = %clip.filename,
            mime_type = %clip.mime_type,
            bytes = clip.size_bytes(),
            prompt = %sanitize_prompt(prompt),
            "Sending clip to Gemini"
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![
                    Part::inline(
                        clip.mime_type.clone(),
                        general_purpose::STANDARD.encode(&clip.data),
                    ),
                    Part::text(prompt),
                ],
            }],
            generation_config,
        };

        let text = self.generate(&self.analysis_model, &request).await?.text();
        tracing::debug!(chars = text.len(), "Gemini answered");
        Ok(text)
    }
}

#[async_trait]
impl VoiceService for GeminiVoiceService {
    fn ensure_configured(&self) -> Result<(), VoiceServiceError> {
        self.api_key().map(|_| ())
    }

    async fn analyze_voice_profile(&self, clip: &AudioClip) -> Result<String, VoiceServiceError> {
        let config = GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(voice_profile_schema()),
            ..Default::default()
        };
        self.ask_about_clip(clip, &voice_profile_prompt(), Some(config))
            .await
    }

    async fn describe_prosody(&self, clip: &AudioClip) -> Result<String, VoiceServiceError> {
        self.ask_about_clip(clip, PROSODY_PROMPT, None).await
    }

    async fn transcribe(
        &self,
        clip: &AudioClip,
        speaker_count: usize,
    ) -> Result<String, VoiceServiceError> {
        self.ask_about_clip(clip, &transcription_prompt(speaker_count), None)
            .await
    }

    async fn synthesize(
        &self,
        instruction: &str,
        voices: &[SpeakerVoiceAssignment],
    ) -> Result<Option<Vec<u8>>, VoiceServiceError> {
        let speaker_voice_configs = voices
            .iter()
            .map(|v| SpeakerVoiceConfig {
                speaker: v.speaker.clone(),
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: v.voice.as_str().to_string(),
                    },
                },
            })
            .collect();

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![Part::text(instruction)],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig {
                    multi_speaker_voice_config: MultiSpeakerVoiceConfig {
                        speaker_voice_configs,
                    },
                }),
                ..Default::default()
            }),
        };

        tracing::debug!(
            model = %self.speech_model,
            speakers = voices.len(),
            instruction = %sanitize_prompt(instruction),
            "Requesting multi-speaker synthesis"
        );

        let response = self.generate(&self.speech_model, &request).await?;

        let Some(inline) = response.first_inline_data() else {
            tracing::warn!("Synthesis response carried no audio payload");
            return Ok(None);
        };

        let audio = general_purpose::STANDARD
            .decode(inline.data.as_bytes())
            .map_err(|e| VoiceServiceError::InvalidResponse(format!("audio payload: {}", e)))?;

        tracing::info!(
            bytes = audio.len(),
            mime_type = %inline.mime_type,
            "Gemini synthesis completed"
        );

        Ok(Some(audio))
    }
}
