mod raw_pcm_decoder;
mod wav_encoder;

pub use raw_pcm_decoder::{RawPcmDecoder, SPEECH_CHANNELS, SPEECH_SAMPLE_RATE};
pub use wav_encoder::{WAV_HEADER_LEN, WavEncoder, encode_wav, sample_to_i16};
