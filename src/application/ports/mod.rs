mod audio_codec;
mod voice_service;

pub use audio_codec::{AudioDecoder, AudioDecoderError, AudioEncoder};
pub use voice_service::{SpeakerVoiceAssignment, VoiceService, VoiceServiceError};
