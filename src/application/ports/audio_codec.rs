use crate::domain::PcmBuffer;

/// Turns the synthesis payload into samples. One instance is created at
/// startup and reused by every run.
pub trait AudioDecoder: Send + Sync {
    fn decode(&self, raw: &[u8]) -> Result<PcmBuffer, AudioDecoderError>;
}

pub trait AudioEncoder: Send + Sync {
    fn encode(&self, audio: &PcmBuffer) -> Vec<u8>;

    fn mime_type(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioDecoderError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
}
