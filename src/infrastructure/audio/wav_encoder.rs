use crate::application::ports::AudioEncoder;
use crate::domain::PcmBuffer;

pub const WAV_HEADER_LEN: usize = 44;
const BITS_PER_SAMPLE: u16 = 16;
const BYTES_PER_SAMPLE: u16 = BITS_PER_SAMPLE / 8;
const PCM_FORMAT: u16 = 1;

/// Serializes `audio` as a 16-bit PCM RIFF/WAVE file.
///
/// The result is exactly `44 + frames * channels * 2` bytes, samples
/// interleaved frame by frame. The sample rate is written through unchanged.
pub fn encode_wav(audio: &PcmBuffer) -> Vec<u8> {
    let channel_count = audio.channel_count();
    let frames = audio.frames();
    // PcmBuffer guarantees the channel count fits in a u16.
    let num_channels = channel_count as u16;
    let sample_rate = audio.sample_rate();

    let data_len = frames * channel_count * BYTES_PER_SAMPLE as usize;
    let total_len = WAV_HEADER_LEN + data_len;

    let byte_rate = sample_rate
        .wrapping_mul(BYTES_PER_SAMPLE as u32)
        .wrapping_mul(num_channels as u32);
    let block_align = num_channels * BYTES_PER_SAMPLE;

    let mut wav = Vec::with_capacity(total_len);

    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&((total_len - 8) as u32).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&PCM_FORMAT.to_le_bytes());
    wav.extend_from_slice(&num_channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&(data_len as u32).to_le_bytes());

    let channels = audio.channels();
    for frame in 0..frames {
        for channel in channels {
            wav.extend_from_slice(&sample_to_i16(channel[frame]).to_le_bytes());
        }
    }

    wav
}

/// Asymmetric mapping onto the i16 range: negatives scale by 32768,
/// the rest by 32767, truncating toward zero. NaN maps to 0.
pub fn sample_to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 32768.0) as i16
    } else {
        (clamped * 32767.0) as i16
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WavEncoder;

impl AudioEncoder for WavEncoder {
    fn encode(&self, audio: &PcmBuffer) -> Vec<u8> {
        encode_wav(audio)
    }

    fn mime_type(&self) -> &'static str {
        "audio/wav"
    }
}
