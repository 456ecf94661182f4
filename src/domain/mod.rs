mod audio_clip;
mod conversion_mode;
mod conversion_request;
mod generated_output;
mod pcm_buffer;
mod pipeline_result;
mod run_status;
mod speaker_id;
mod speaker_profile;
mod voice_name;

pub use audio_clip::{AudioClip, DEFAULT_AUDIO_MIME};
pub use conversion_mode::ConversionMode;
pub use conversion_request::{ConversionRequest, InputError, MAX_REFERENCE_CLIPS};
pub use generated_output::{GeneratedOutput, OutputId};
pub use pcm_buffer::{InvalidPcmLayout, PcmBuffer};
pub use pipeline_result::{ConversionArtifacts, PipelineResult};
pub use run_status::RunStatus;
pub use speaker_id::SpeakerId;
pub use speaker_profile::{DEFAULT_STYLE_DESCRIPTION, SpeakerProfile, VoiceAnalysis};
pub use voice_name::VoiceName;
