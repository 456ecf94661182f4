use serde::Deserialize;

use super::{SpeakerId, VoiceName};

pub const DEFAULT_STYLE_DESCRIPTION: &str = "generic style";

#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerProfile {
    pub id: SpeakerId,
    /// `None` when the service named a voice outside the catalogue.
    pub voice_name: Option<VoiceName>,
    pub style_description: String,
}

impl SpeakerProfile {
    pub fn new(id: SpeakerId, analysis: VoiceAnalysis) -> Self {
        Self {
            id,
            voice_name: analysis.closest_voice,
            style_description: analysis.style_description,
        }
    }

    pub fn fallback(id: SpeakerId) -> Self {
        Self::new(id, VoiceAnalysis::fallback())
    }

    pub fn label(&self) -> String {
        self.id.label()
    }

    /// Voice handed to the speech model. A profile without a recognized voice
    /// is still synthesized, with [`VoiceName::DEFAULT`].
    pub fn assigned_voice(&self) -> VoiceName {
        self.voice_name.unwrap_or(VoiceName::DEFAULT)
    }
}

/// Structured answer of the voice-profile analysis call.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceAnalysis {
    pub style_description: String,
    pub closest_voice: Option<VoiceName>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVoiceAnalysis {
    style_description: String,
    closest_voice: String,
}

impl VoiceAnalysis {
    pub fn fallback() -> Self {
        Self {
            style_description: DEFAULT_STYLE_DESCRIPTION.to_string(),
            closest_voice: Some(VoiceName::DEFAULT),
        }
    }

    /// Parses the JSON object `{"styleDescription": .., "closestVoice": ..}`.
    /// An unknown voice name is not a parse failure; it yields `closest_voice: None`.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let raw: RawVoiceAnalysis = serde_json::from_str(text.trim())?;
        Ok(Self {
            closest_voice: raw.closest_voice.parse().ok(),
            style_description: raw.style_description,
        })
    }
}
