use std::sync::Arc;

use crate::application::ports::{AudioDecoder, AudioDecoderError, VoiceService, VoiceServiceError};
use crate::domain::{
    AudioClip, ConversionArtifacts, ConversionMode, ConversionRequest, InputError, PcmBuffer,
    PipelineResult, SpeakerId, SpeakerProfile, VoiceAnalysis,
};

use super::activity_log::ActivityLog;
use super::synthesis_prompt::{
    DEFAULT_PROSODY_NOTE, speaker_voice_assignments, synthesis_instruction,
};

/// Runs profile analysis, prosody analysis, transcription and synthesis, in
/// that order, one remote call at a time.
pub struct ConversionService<V>
where
    V: VoiceService,
{
    voice_service: Arc<V>,
    decoder: Arc<dyn AudioDecoder>,
}

impl<V> ConversionService<V>
where
    V: VoiceService,
{
    pub fn new(voice_service: Arc<V>, decoder: Arc<dyn AudioDecoder>) -> Self {
        Self {
            voice_service,
            decoder,
        }
    }

    pub fn ensure_configured(&self) -> Result<(), ConversionError> {
        self.voice_service
            .ensure_configured()
            .map_err(|e| ConversionError::Configuration(e.to_string()))
    }

    /// On failure the returned [`ConversionFailure`] still carries every
    /// artifact computed before the failing step.
    pub async fn run(
        &self,
        request: &ConversionRequest,
        log: &ActivityLog,
    ) -> Result<PipelineResult, ConversionFailure> {
        let mut artifacts = ConversionArtifacts::default();

        match self.execute(request, log, &mut artifacts).await {
            Ok(result) => Ok(result),
            Err(error) => {
                log.error(format!("Error: {}", error));
                Err(ConversionFailure {
                    error,
                    partial: artifacts,
                })
            }
        }
    }

    async fn execute(
        &self,
        request: &ConversionRequest,
        log: &ActivityLog,
        artifacts: &mut ConversionArtifacts,
    ) -> Result<PipelineResult, ConversionError> {
        self.ensure_configured()?;

        log.info("Initializing conversion pipeline...");

        let profiles = self.analyze_references(request.references(), log).await?;
        artifacts.profiles = profiles.clone();

        let prosody_note = match request.mode() {
            ConversionMode::Mimic => {
                let note = self.analyze_prosody(request.source(), log).await?;
                artifacts.prosody_note = Some(note.clone());
                Some(note)
            }
            ConversionMode::Clean => None,
        };

        let transcript = self
            .transcribe(request.source(), request.speaker_count(), log)
            .await?;
        artifacts.transcript = Some(transcript.clone());

        let audio = self
            .synthesize(request.mode(), &transcript, prosody_note.as_deref(), &profiles, log)
            .await?;

        log.info("Success! Conversion complete.");

        Ok(PipelineResult {
            transcript,
            prosody_note,
            profiles,
            audio,
        })
    }

    async fn analyze_references(
        &self,
        references: &[AudioClip],
        log: &ActivityLog,
    ) -> Result<Vec<SpeakerProfile>, ConversionError> {
        log.info(format!(
            "Step 1: analyzing {} reference voice(s)...",
            references.len()
        ));

        // Speaker ids follow upload order.
        let mut profiles = Vec::with_capacity(references.len());
        for (index, clip) in references.iter().enumerate() {
            let speaker = SpeakerId::from_upload_index(index);
            profiles.push(self.analyze_reference(speaker, clip, log).await?);
        }
        Ok(profiles)
    }

    async fn analyze_reference(
        &self,
        speaker: SpeakerId,
        clip: &AudioClip,
        log: &ActivityLog,
    ) -> Result<SpeakerProfile, ConversionError> {
        log.info(format!(
            "Analyzing speaker {} (reference file: {})...",
            speaker, clip.filename
        ));

        let response = self.voice_service.analyze_voice_profile(clip).await?;

        let profile = match VoiceAnalysis::parse(&response) {
            Ok(analysis) => SpeakerProfile::new(speaker, analysis),
            Err(e) => {
                tracing::debug!(speaker = %speaker, error = %e, "Voice analysis was not valid JSON");
                log.warn(format!(
                    "Warning: could not parse the analysis for speaker {}, using defaults.",
                    speaker
                ));
                SpeakerProfile::fallback(speaker)
            }
        };

        let voice = match profile.voice_name {
            Some(voice) => voice.to_string(),
            None => {
                log.warn(format!(
                    "Warning: speaker {} matched no known voice, {} will be used.",
                    speaker,
                    profile.assigned_voice()
                ));
                "unknown".to_string()
            }
        };

        log.info(format!(
            "Speaker {} -> voice: {} | style: \"{}\"",
            speaker, voice, profile.style_description
        ));

        Ok(profile)
    }

    async fn analyze_prosody(
        &self,
        source: &AudioClip,
        log: &ActivityLog,
    ) -> Result<String, ConversionError> {
        log.info("Step 2 (mimic): analyzing source pacing and prosody...");

        let response = self.voice_service.describe_prosody(source).await?;
        let note = match response.trim() {
            "" => DEFAULT_PROSODY_NOTE.to_string(),
            text => text.to_string(),
        };

        log.info(format!("Prosody captured: \"{}\"", note));
        Ok(note)
    }

    async fn transcribe(
        &self,
        source: &AudioClip,
        speaker_count: usize,
        log: &ActivityLog,
    ) -> Result<String, ConversionError> {
        log.info("Step 3: transcribing source audio and identifying speakers...");

        let response = self.voice_service.transcribe(source, speaker_count).await?;
        let transcript = response.trim();
        if transcript.is_empty() {
            return Err(ConversionError::EmptyTranscript);
        }

        log.info(format!(
            "Transcription complete ({} chars).",
            transcript.chars().count()
        ));
        Ok(transcript.to_string())
    }

    async fn synthesize(
        &self,
        mode: ConversionMode,
        transcript: &str,
        prosody_note: Option<&str>,
        profiles: &[SpeakerProfile],
        log: &ActivityLog,
    ) -> Result<PcmBuffer, ConversionError> {
        log.info(format!(
            "Step 4: synthesizing speech ({})...",
            match mode {
                ConversionMode::Mimic => "keeping source delivery",
                ConversionMode::Clean => "clean regeneration",
            }
        ));

        let voices = speaker_voice_assignments(profiles);
        let instruction = synthesis_instruction(mode, transcript, prosody_note);

        let payload = self
            .voice_service
            .synthesize(&instruction, &voices)
            .await?
            .ok_or(ConversionError::NoAudioReceived)?;

        log.info("Decoding audio stream...");
        let audio = self.decoder.decode(&payload)?;

        tracing::debug!(
            frames = audio.frames(),
            channels = audio.channel_count(),
            duration_secs = audio.duration_secs(),
            "Synthesized audio decoded"
        );

        Ok(audio)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    InvalidInput(#[from] InputError),
    #[error("could not transcribe the source audio")]
    EmptyTranscript,
    #[error("no audio received from the speech model")]
    NoAudioReceived,
    #[error("voice service: {0}")]
    Service(#[from] VoiceServiceError),
    #[error("{0}")]
    Decode(#[from] AudioDecoderError),
}

#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct ConversionFailure {
    pub error: ConversionError,
    pub partial: ConversionArtifacts,
}
