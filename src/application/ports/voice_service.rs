use async_trait::async_trait;

use crate::domain::{AudioClip, VoiceName};

/// The hosted model, reduced to the four calls the conversion pipeline makes.
///
/// Every method is a single request/response round trip. Implementations
/// return the service's text verbatim; interpreting it (JSON parsing, empty
/// checks) is the caller's job so scripted fakes exercise the same logic.
#[async_trait]
pub trait VoiceService: Send + Sync {
    /// Fails with [`VoiceServiceError::MissingCredential`] when no request can
    /// be authenticated. Called before any network traffic.
    fn ensure_configured(&self) -> Result<(), VoiceServiceError> {
        Ok(())
    }

    /// Returns the structured-output JSON text
    /// `{"styleDescription": "...", "closestVoice": "..."}`.
    async fn analyze_voice_profile(&self, clip: &AudioClip) -> Result<String, VoiceServiceError>;

    async fn describe_prosody(&self, clip: &AudioClip) -> Result<String, VoiceServiceError>;

    /// Verbatim transcript as newline separated `Speaker K: text` lines with
    /// `K` in `1..=speaker_count`.
    async fn transcribe(
        &self,
        clip: &AudioClip,
        speaker_count: usize,
    ) -> Result<String, VoiceServiceError>;

    /// Returns the first inline audio payload (raw PCM bytes), or `None` when
    /// the response carried no audio.
    async fn synthesize(
        &self,
        instruction: &str,
        voices: &[SpeakerVoiceAssignment],
    ) -> Result<Option<Vec<u8>>, VoiceServiceError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerVoiceAssignment {
    pub speaker: String,
    pub voice: VoiceName,
}

#[derive(Debug, thiserror::Error)]
pub enum VoiceServiceError {
    #[error("missing credential: {0}")]
    MissingCredential(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
