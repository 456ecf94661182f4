mod gemini_types;
mod gemini_voice_service;
mod prompts;

pub use gemini_voice_service::{
    DEFAULT_ANALYSIS_MODEL, DEFAULT_BASE_URL, DEFAULT_SPEECH_MODEL, GeminiConfig,
    GeminiVoiceService,
};
pub use prompts::{PROSODY_PROMPT, transcription_prompt, voice_profile_prompt};
