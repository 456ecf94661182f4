#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use polyvoice::application::ports::{
    AudioDecoder, SpeakerVoiceAssignment, VoiceService, VoiceServiceError,
};
use polyvoice::application::services::ConversionService;
use polyvoice::domain::{AudioClip, ConversionMode, ConversionRequest};
use polyvoice::infrastructure::audio::RawPcmDecoder;

pub const DEFAULT_PROFILE_RESPONSE: &str =
    r#"{"styleDescription": "warm baritone, calm", "closestVoice": "Charon"}"#;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AnalyzeProfile(String),
    DescribeProsody(String),
    Transcribe(String, usize),
    Synthesize {
        instruction: String,
        voices: Vec<SpeakerVoiceAssignment>,
    },
}

/// Voice service fake that replays scripted answers and records every call.
pub struct ScriptedVoiceService {
    configured: bool,
    profile_responses: Mutex<VecDeque<String>>,
    prosody: String,
    transcript: String,
    audio: Option<Vec<u8>>,
    transcription_failure: Option<String>,
    synthesis_gate: Option<Arc<Notify>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedVoiceService {
    pub fn new() -> Self {
        Self {
            configured: true,
            profile_responses: Mutex::new(VecDeque::new()),
            prosody: "Fast and excited, with short pauses.".to_string(),
            transcript: "Speaker 1: Hello there.".to_string(),
            audio: Some(pcm_bytes(&[0, 16384, -16384, 32767])),
            transcription_failure: None,
            synthesis_gate: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    pub fn with_profile_responses(self, responses: &[&str]) -> Self {
        *self.profile_responses.lock().unwrap() =
            responses.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn with_prosody(mut self, prosody: &str) -> Self {
        self.prosody = prosody.to_string();
        self
    }

    pub fn with_transcript(mut self, transcript: &str) -> Self {
        self.transcript = transcript.to_string();
        self
    }

    pub fn with_audio(mut self, audio: Option<Vec<u8>>) -> Self {
        self.audio = audio;
        self
    }

    pub fn failing_transcription(mut self, message: &str) -> Self {
        self.transcription_failure = Some(message.to_string());
        self
    }

    /// Synthesis waits until the returned `Notify` is signalled.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.synthesis_gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl VoiceService for ScriptedVoiceService {
    fn ensure_configured(&self) -> Result<(), VoiceServiceError> {
        if self.configured {
            Ok(())
        } else {
            Err(VoiceServiceError::MissingCredential(
                "GEMINI_API_KEY is not set".to_string(),
            ))
        }
    }

    async fn analyze_voice_profile(&self, clip: &AudioClip) -> Result<String, VoiceServiceError> {
        self.record(Call::AnalyzeProfile(clip.filename.clone()));
        Ok(self
            .profile_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| DEFAULT_PROFILE_RESPONSE.to_string()))
    }

    async fn describe_prosody(&self, clip: &AudioClip) -> Result<String, VoiceServiceError> {
        self.record(Call::DescribeProsody(clip.filename.clone()));
        Ok(self.prosody.clone())
    }

    async fn transcribe(
        &self,
        clip: &AudioClip,
        speaker_count: usize,
    ) -> Result<String, VoiceServiceError> {
        self.record(Call::Transcribe(clip.filename.clone(), speaker_count));
        match &self.transcription_failure {
            Some(message) => Err(VoiceServiceError::ApiRequestFailed(message.clone())),
            None => Ok(self.transcript.clone()),
        }
    }

    async fn synthesize(
        &self,
        instruction: &str,
        voices: &[SpeakerVoiceAssignment],
    ) -> Result<Option<Vec<u8>>, VoiceServiceError> {
        self.record(Call::Synthesize {
            instruction: instruction.to_string(),
            voices: voices.to_vec(),
        });
        if let Some(gate) = &self.synthesis_gate {
            gate.notified().await;
        }
        Ok(self.audio.clone())
    }
}

pub fn pcm_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

pub fn clip(name: &str) -> AudioClip {
    AudioClip::new(name, Some("audio/wav"), format!("bytes of {}", name).into_bytes())
}

pub fn references(count: usize) -> Vec<AudioClip> {
    (1..=count).map(|i| clip(&format!("ref{}.wav", i))).collect()
}

pub fn request(reference_count: usize, mode: ConversionMode) -> ConversionRequest {
    ConversionRequest::new(Some(clip("source.wav")), references(reference_count), mode).unwrap()
}

pub fn service(voice: Arc<ScriptedVoiceService>) -> ConversionService<ScriptedVoiceService> {
    let decoder: Arc<dyn AudioDecoder> = Arc::new(RawPcmDecoder::default());
    ConversionService::new(voice, decoder)
}
