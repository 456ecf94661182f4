use crate::application::ports::{AudioDecoder, AudioDecoderError};
use crate::domain::PcmBuffer;

/// Sample rate of the speech model's inline audio.
pub const SPEECH_SAMPLE_RATE: u32 = 24_000;
pub const SPEECH_CHANNELS: u16 = 1;

/// Decoder for headerless signed 16-bit little-endian PCM.
///
/// Holds the fixed stream layout; created once at startup, shared by all runs
/// and dropped with the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPcmDecoder {
    sample_rate: u32,
    channels: u16,
}

impl RawPcmDecoder {
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels: channels.max(1),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }
}

impl Default for RawPcmDecoder {
    fn default() -> Self {
        Self::new(SPEECH_SAMPLE_RATE, SPEECH_CHANNELS)
    }
}

impl AudioDecoder for RawPcmDecoder {
    fn decode(&self, raw: &[u8]) -> Result<PcmBuffer, AudioDecoderError> {
        let channel_count = self.channels as usize;
        let frame_bytes = 2 * channel_count;

        if raw.len() % frame_bytes != 0 {
            return Err(AudioDecoderError::DecodingFailed(format!(
                "{} bytes is not a whole number of {}-channel 16-bit frames",
                raw.len(),
                channel_count
            )));
        }

        let frames = raw.len() / frame_bytes;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];

        for frame in raw.chunks_exact(frame_bytes) {
            for (channel, sample) in channels.iter_mut().zip(frame.chunks_exact(2)) {
                let value = i16::from_le_bytes([sample[0], sample[1]]);
                channel.push(value as f32 / 32768.0);
            }
        }

        PcmBuffer::new(self.sample_rate, channels)
            .map_err(|e| AudioDecoderError::DecodingFailed(e.to_string()))
    }
}
