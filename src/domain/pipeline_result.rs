use super::{PcmBuffer, SpeakerProfile};

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    pub transcript: String,
    pub prosody_note: Option<String>,
    pub profiles: Vec<SpeakerProfile>,
    pub audio: PcmBuffer,
}

/// Whatever a run produced so far. Survives a failed run so the caller can
/// still inspect the profiles or transcript that were computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionArtifacts {
    pub profiles: Vec<SpeakerProfile>,
    pub prosody_note: Option<String>,
    pub transcript: Option<String>,
}

impl ConversionArtifacts {
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty() && self.prosody_note.is_none() && self.transcript.is_none()
    }
}

impl From<&PipelineResult> for ConversionArtifacts {
    fn from(result: &PipelineResult) -> Self {
        Self {
            profiles: result.profiles.clone(),
            prosody_note: result.prosody_note.clone(),
            transcript: Some(result.transcript.clone()),
        }
    }
}
